/// Console adapters: progress output and log subscriber setup
mod logging;
mod progress_reporter;

pub use logging::init_logging;
pub use progress_reporter::StderrProgressReporter;

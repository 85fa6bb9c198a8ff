/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod descriptor_repository;
pub mod formatter;
pub mod module_resolver;
pub mod output_presenter;
pub mod progress_reporter;
pub mod workspace_reader;

pub use descriptor_repository::DescriptorRepository;
pub use formatter::ReportFormatter;
pub use module_resolver::ModuleResolver;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use workspace_reader::WorkspaceReader;

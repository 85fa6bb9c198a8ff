/// Mock implementations for testing
mod mock_module_graph;
mod mock_progress_reporter;

pub use mock_module_graph::{MockModuleGraph, MockWorkspaceReader};
pub use mock_progress_reporter::MockProgressReporter;

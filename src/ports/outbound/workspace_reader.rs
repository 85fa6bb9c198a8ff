use crate::release_report::domain::Module;
use crate::shared::Result;
use std::path::Path;

/// WorkspaceReader port for discovering the modules built together
///
/// This port abstracts reactor discovery: starting from a project directory
/// it returns every module of the workspace in build order.
pub trait WorkspaceReader {
    /// Reads the workspace rooted at `project_path`
    ///
    /// # Errors
    /// Returns an error if the root descriptor does not exist or cannot be
    /// parsed. Broken sub-modules are skipped with a warning.
    fn read_workspace(&self, project_path: &Path) -> Result<Vec<Module>>;
}

impl<T: WorkspaceReader + ?Sized> WorkspaceReader for &T {
    fn read_workspace(&self, project_path: &Path) -> Result<Vec<Module>> {
        (**self).read_workspace(project_path)
    }
}

use crate::release_report::domain::ReportDocument;

/// ReportResponse - Result of the report use case, ready for formatting
#[derive(Debug, Clone)]
pub struct ReportResponse {
    pub document: ReportDocument,
    /// Modules found in the workspace (the traversal roots)
    pub workspace_module_count: usize,
}

impl ReportResponse {
    pub fn new(document: ReportDocument, workspace_module_count: usize) -> Self {
        Self {
            document,
            workspace_module_count,
        }
    }

    /// Number of top-level entries in the report
    pub fn reported_module_count(&self) -> usize {
        self.document.module_count()
    }
}

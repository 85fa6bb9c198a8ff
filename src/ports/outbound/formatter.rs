use crate::release_report::domain::ReportDocument;
use crate::shared::Result;

/// ReportFormatter port for formatting report output
///
/// This port abstracts the rendering of a finished report (JSON, Markdown).
pub trait ReportFormatter {
    /// Formats the report document
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, document: &ReportDocument) -> Result<String>;
}

use crate::ports::outbound::ReportFormatter;
use crate::release_report::domain::ReportDocument;
use crate::shared::Result;

/// JsonFormatter adapter producing the pretty-printed JSON report
///
/// Output ends with a newline. Serialization is deterministic: report
/// entries keep visit order and properties are sorted.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, document: &ReportDocument) -> Result<String> {
        let mut json = serde_json::to_string_pretty(document)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release_report::domain::{ModuleKey, ModuleNode, ProjectInfoReport, ReleaseReport};
    use serde_json::Value;

    #[test]
    fn test_release_report_json() {
        let mut report = ReleaseReport::new();
        report.insert(
            ModuleKey::new("com.acme", "app"),
            ModuleNode::new("com.acme", "app"),
        );

        let output = JsonFormatter::new()
            .format(&ReportDocument::Release(report))
            .unwrap();

        assert!(output.ends_with("}\n"));
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["com.acme:app"]["groupId"], "com.acme");
        assert!(value["com.acme:app"]["parent"].is_null());
    }

    #[test]
    fn test_empty_release_report_is_empty_object() {
        let output = JsonFormatter::new()
            .format(&ReportDocument::Release(ReleaseReport::new()))
            .unwrap();
        assert_eq!(output, "{}\n");
    }

    #[test]
    fn test_project_info_json() {
        let output = JsonFormatter::new()
            .format(&ReportDocument::ProjectInfo(ProjectInfoReport::default()))
            .unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["projects"], serde_json::json!([]));
    }
}

use crate::ports::outbound::ReportFormatter;
use crate::release_report::domain::{ProjectInfoReport, ReleaseReport, ReportDocument};
use crate::shared::Result;

/// Markdown table header for the module overview
const MODULE_TABLE_HEADER: &str = "| Module | Parent | Parent is snapshot |\n";
const MODULE_TABLE_SEPARATOR: &str = "|--------|--------|--------------------|\n";

const DEPENDENCY_TABLE_HEADER: &str = "| Module | Dependency | Version |\n";
const DEPENDENCY_TABLE_SEPARATOR: &str = "|--------|------------|---------|\n";

const PROPERTY_TABLE_HEADER: &str = "| Module | Property | Value |\n";
const PROPERTY_TABLE_SEPARATOR: &str = "|--------|----------|-------|\n";

/// MarkdownFormatter adapter rendering a report as Markdown tables
///
/// Meant for pasting into release tickets; JSON remains the canonical
/// machine-readable form.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_release_report(&self, output: &mut String, report: &ReleaseReport) {
        output.push_str("# Release Readiness Report\n\n");
        let pinned = report
            .iter()
            .filter(|(_, node)| {
                !node.snapshot_dependencies.is_empty() || !node.snapshot_properties.is_empty()
            })
            .count();
        output.push_str(&format!(
            "{} module(s) reported, {} with snapshot dependencies or properties; {} snapshot dependency edge(s) found.\n\n",
            report.len(),
            pinned,
            report.snapshot_dependency_count()
        ));

        self.render_modules(output, report);
        self.render_snapshot_dependencies(output, report);
        self.render_snapshot_properties(output, report);
    }

    fn render_modules(&self, output: &mut String, report: &ReleaseReport) {
        output.push_str("## Modules\n\n");
        if report.is_empty() {
            output.push_str("_No snapshot modules found._\n\n");
            return;
        }

        output.push_str(MODULE_TABLE_HEADER);
        output.push_str(MODULE_TABLE_SEPARATOR);
        for (key, node) in report.iter() {
            let (parent, snapshot) = match &node.parent {
                Some(p) => (
                    format!("{}:{}:{}", p.group_id, p.artifact_id, p.version),
                    if p.snapshot { "yes" } else { "no" },
                ),
                None => ("-".to_string(), "-"),
            };
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                Self::escape_markdown_table_cell(key.as_str()),
                Self::escape_markdown_table_cell(&parent),
                snapshot
            ));
        }
        output.push('\n');
    }

    fn render_snapshot_dependencies(&self, output: &mut String, report: &ReleaseReport) {
        output.push_str("## Snapshot Dependencies\n\n");
        if report.snapshot_dependency_count() == 0 {
            output.push_str("_None._\n\n");
            return;
        }

        output.push_str(DEPENDENCY_TABLE_HEADER);
        output.push_str(DEPENDENCY_TABLE_SEPARATOR);
        for (key, node) in report.iter() {
            for dependency in &node.snapshot_dependencies {
                output.push_str(&format!(
                    "| {} | {} | {} |\n",
                    Self::escape_markdown_table_cell(key.as_str()),
                    Self::escape_markdown_table_cell(dependency.key().as_str()),
                    Self::escape_markdown_table_cell(&dependency.version)
                ));
            }
        }
        output.push('\n');
    }

    fn render_snapshot_properties(&self, output: &mut String, report: &ReleaseReport) {
        output.push_str("## Snapshot Properties\n\n");
        if report.iter().all(|(_, node)| node.snapshot_properties.is_empty()) {
            output.push_str("_None._\n\n");
            return;
        }

        output.push_str(PROPERTY_TABLE_HEADER);
        output.push_str(PROPERTY_TABLE_SEPARATOR);
        for (key, node) in report.iter() {
            for (name, value) in &node.snapshot_properties {
                output.push_str(&format!(
                    "| {} | {} | {} |\n",
                    Self::escape_markdown_table_cell(key.as_str()),
                    Self::escape_markdown_table_cell(name),
                    Self::escape_markdown_table_cell(value)
                ));
            }
        }
        output.push('\n');
    }

    fn render_project_info(&self, output: &mut String, report: &ProjectInfoReport) {
        output.push_str("# Project Information\n\n");

        for project in &report.projects {
            output.push_str(&format!(
                "## {}:{} ({})\n\n",
                project.group_id, project.artifact_id, project.version
            ));
            if project.dependencies.is_empty() {
                output.push_str("_No dependencies._\n\n");
                continue;
            }
            output.push_str("| Dependency | Version |\n");
            output.push_str("|------------|---------|\n");
            for dependency in &project.dependencies {
                output.push_str(&format!(
                    "| {} | {} |\n",
                    Self::escape_markdown_table_cell(dependency.key().as_str()),
                    Self::escape_markdown_table_cell(&dependency.version)
                ));
            }
            output.push('\n');
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, document: &ReportDocument) -> Result<String> {
        let mut output = String::new();
        match document {
            ReportDocument::Release(report) => self.render_release_report(&mut output, report),
            ReportDocument::ProjectInfo(report) => self.render_project_info(&mut output, report),
        }
        Ok(output)
    }
}

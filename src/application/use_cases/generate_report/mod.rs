use crate::application::dto::{ReportGoal, ReportRequest, ReportResponse};
use crate::ports::outbound::{ModuleResolver, ProgressReporter, WorkspaceReader};
use crate::release_report::domain::{Module, ReleaseReport, ReportDocument};
use crate::release_report::policies::SnapshotPolicy;
use crate::release_report::services::{ProjectInfoBuilder, SnapshotReportBuilder};
use crate::shared::error::ReleaseHelperError;
use crate::shared::Result;
use tracing::info;

/// GenerateReportUseCase - Core use case for release report generation
///
/// This use case orchestrates the report workflow using generic
/// dependency injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `WR` - WorkspaceReader implementation
/// * `MR` - ModuleResolver implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateReportUseCase<WR, MR, PR> {
    workspace_reader: WR,
    module_resolver: MR,
    progress_reporter: PR,
}

impl<WR, MR, PR> GenerateReportUseCase<WR, MR, PR>
where
    WR: WorkspaceReader,
    MR: ModuleResolver,
    PR: ProgressReporter,
{
    /// Creates a new GenerateReportUseCase with injected dependencies
    pub fn new(workspace_reader: WR, module_resolver: MR, progress_reporter: PR) -> Self {
        Self {
            workspace_reader,
            module_resolver,
            progress_reporter,
        }
    }

    /// Executes the report use case
    ///
    /// Every call starts from an empty report, so repeated runs over the same
    /// workspace produce identical documents.
    ///
    /// # Errors
    /// Returns an error if the workspace cannot be read or contains no
    /// modules. Failures below the workspace level only make the report
    /// partial.
    pub fn execute(&self, request: ReportRequest) -> Result<ReportResponse> {
        let modules = self.read_workspace(&request)?;
        let policy = SnapshotPolicy::new(request.snapshot_marker.as_str())?;

        let document = match request.goal {
            ReportGoal::Helper => ReportDocument::Release(self.build_release_report(
                &modules,
                &policy,
                request.snapshot_modules_only,
            )),
            ReportGoal::ProjectInfo => ReportDocument::ProjectInfo(ProjectInfoBuilder::build(
                &self.module_resolver,
                &policy,
                &modules,
            )),
        };

        self.progress_reporter.report_completion(&format!(
            "✅ Report complete: {} module(s) reported",
            document.module_count()
        ));

        Ok(ReportResponse::new(document, modules.len()))
    }

    fn read_workspace(&self, request: &ReportRequest) -> Result<Vec<Module>> {
        self.progress_reporter.report(&format!(
            "📖 Loading reactor from: {}",
            request.project_path.display()
        ));

        let modules = self
            .workspace_reader
            .read_workspace(&request.project_path)?;

        if modules.is_empty() {
            return Err(ReleaseHelperError::InvalidProjectPath {
                path: request.project_path.clone(),
                reason: "the workspace contains no modules".to_string(),
            }
            .into());
        }

        self.progress_reporter
            .report(&format!("✅ Detected {} module(s)", modules.len()));
        Ok(modules)
    }

    fn build_release_report(
        &self,
        modules: &[Module],
        policy: &SnapshotPolicy,
        snapshot_modules_only: bool,
    ) -> ReleaseReport {
        self.progress_reporter
            .report("🔍 Walking parents and snapshot dependencies...");

        let mut builder = SnapshotReportBuilder::new(&self.module_resolver, policy)
            .snapshot_modules_only(snapshot_modules_only);

        for (index, module) in modules.iter().enumerate() {
            self.progress_reporter.report_progress(
                index + 1,
                modules.len(),
                Some(module.key().as_str()),
            );
            builder.visit_root(module);
        }

        let report = builder.finish();
        info!(
            "report contains {} module(s) and {} snapshot dependency edge(s)",
            report.len(),
            report.snapshot_dependency_count()
        );
        report
    }
}

#[cfg(test)]
mod tests;

use super::ReportGoal;
use crate::release_report::policies::DEFAULT_SNAPSHOT_MARKER;
use crate::shared::error::ReleaseHelperError;
use crate::shared::Result;
use std::path::PathBuf;

/// ReportRequest - Internal request DTO for the report use case
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Directory containing the root pom.xml
    pub project_path: PathBuf,
    pub goal: ReportGoal,
    /// Version suffix that marks a pre-release build
    pub snapshot_marker: String,
    /// Leave non-root modules with a release version out of the report
    pub snapshot_modules_only: bool,
}

impl ReportRequest {
    pub fn builder() -> ReportRequestBuilder {
        ReportRequestBuilder::default()
    }
}

/// Builder for [`ReportRequest`]
#[derive(Debug, Default)]
pub struct ReportRequestBuilder {
    project_path: Option<PathBuf>,
    goal: ReportGoal,
    snapshot_marker: Option<String>,
    snapshot_modules_only: Option<bool>,
}

impl ReportRequestBuilder {
    pub fn project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    pub fn goal(mut self, goal: ReportGoal) -> Self {
        self.goal = goal;
        self
    }

    pub fn snapshot_marker(mut self, marker: impl Into<String>) -> Self {
        self.snapshot_marker = Some(marker.into());
        self
    }

    pub fn snapshot_modules_only(mut self, enabled: bool) -> Self {
        self.snapshot_modules_only = Some(enabled);
        self
    }

    pub fn build(self) -> Result<ReportRequest> {
        let project_path = self.project_path.ok_or_else(|| ReleaseHelperError::Validation {
            message: "project_path is required".to_string(),
        })?;

        let snapshot_marker = self
            .snapshot_marker
            .unwrap_or_else(|| DEFAULT_SNAPSHOT_MARKER.to_string());
        if snapshot_marker.trim().is_empty() {
            return Err(ReleaseHelperError::Validation {
                message: "snapshot_marker must not be empty".to_string(),
            }
            .into());
        }

        Ok(ReportRequest {
            project_path,
            goal: self.goal,
            snapshot_marker,
            snapshot_modules_only: self.snapshot_modules_only.unwrap_or(true),
        })
    }
}

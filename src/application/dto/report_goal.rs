/// Which report to produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportGoal {
    /// Deep map of snapshot parents, dependencies and properties
    #[default]
    Helper,
    /// Flat list of workspace modules with their direct dependencies
    ProjectInfo,
}

impl std::str::FromStr for ReportGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "helper" => Ok(ReportGoal::Helper),
            "project-info" | "project_info" => Ok(ReportGoal::ProjectInfo),
            _ => Err(format!(
                "Invalid goal: {}. Please specify 'helper' or 'project-info'",
                s
            )),
        }
    }
}

impl std::fmt::Display for ReportGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportGoal::Helper => write!(f, "helper"),
            ReportGoal::ProjectInfo => write!(f, "project-info"),
        }
    }
}

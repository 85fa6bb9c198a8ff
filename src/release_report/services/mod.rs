mod project_info_builder;
mod report_builder;

pub use project_info_builder::ProjectInfoBuilder;
pub use report_builder::SnapshotReportBuilder;

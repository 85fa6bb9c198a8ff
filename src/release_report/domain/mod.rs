pub mod coordinates;
pub mod module;
pub mod report;

pub use coordinates::{Coordinates, ModuleKey, Version};
pub use module::{DeclaredDependency, Dependency, Module};
pub use report::{
    DependencySummary, ModuleNode, ParentSummary, ProjectEntry, ProjectInfoReport,
    ReleaseReport, ReportDocument,
};

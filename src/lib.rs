//! release-helper - release readiness report for Maven multi-module projects
//!
//! Starting from every module of a reactor, the library walks parents and
//! snapshot dependencies and reports which modules still depend on
//! pre-release builds, following hexagonal architecture.
//!
//! # Architecture
//!
//! - **Domain Layer** (`release_report`): module model, snapshot policy, graph traversal
//! - **Application Layer** (`application`): use cases, DTOs and factories
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): pom.xml resolution, repositories, formatters, console
//! - **Shared** (`shared`): error types and file-safety helpers
//!
//! # Example
//!
//! ```no_run
//! use release_helper::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let repositories = RepositoryChain::new()
//!     .with_repository(Box::new(LocalRepository::new("/home/me/.m2/repository")));
//! let resolver = MavenModuleResolver::new(CachingRepository::new(repositories));
//!
//! let use_case = GenerateReportUseCase::new(
//!     MavenWorkspaceReader::new(&resolver),
//!     &resolver,
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = ReportRequest::builder().project_path(".").build()?;
//! let response = use_case.execute(request)?;
//!
//! println!("{}", JsonFormatter::new().format(&response.document)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod release_report;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::maven::{MavenModuleResolver, MavenWorkspaceReader};
    pub use crate::adapters::outbound::repository::{
        CachingRepository, LocalRepository, RemoteRepository, RepositoryChain,
    };
    pub use crate::application::dto::{OutputFormat, ReportGoal, ReportRequest, ReportResponse};
    pub use crate::application::use_cases::GenerateReportUseCase;
    pub use crate::ports::outbound::{
        DescriptorRepository, ModuleResolver, OutputPresenter, ProgressReporter,
        ReportFormatter, WorkspaceReader,
    };
    pub use crate::release_report::domain::{
        Coordinates, Dependency, Module, ModuleKey, ModuleNode, ReleaseReport, ReportDocument,
    };
    pub use crate::release_report::policies::SnapshotPolicy;
    pub use crate::release_report::services::{ProjectInfoBuilder, SnapshotReportBuilder};
    pub use crate::shared::Result;
}

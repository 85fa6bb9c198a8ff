use crate::ports::outbound::ModuleResolver;
use crate::release_report::domain::{DependencySummary, Module, ProjectEntry, ProjectInfoReport};
use crate::release_report::policies::SnapshotPolicy;
use tracing::error;

/// ProjectInfoBuilder lists every workspace module with its direct
/// resolved dependencies, without recursing
pub struct ProjectInfoBuilder;

impl ProjectInfoBuilder {
    pub fn build<R: ModuleResolver + ?Sized>(
        resolver: &R,
        policy: &SnapshotPolicy,
        modules: &[Module],
    ) -> ProjectInfoReport {
        let projects = modules
            .iter()
            .map(|module| Self::entry(resolver, policy, module))
            .collect();
        ProjectInfoReport { projects }
    }

    fn entry<R: ModuleResolver + ?Sized>(
        resolver: &R,
        policy: &SnapshotPolicy,
        module: &Module,
    ) -> ProjectEntry {
        let dependencies = match resolver.resolved_dependencies(module) {
            Ok(dependencies) => dependencies
                .iter()
                .map(|d| DependencySummary::new(d.coordinates(), policy.base_version(d.version())))
                .collect(),
            Err(e) => {
                error!("invalid dependency version in {}: {:#}", module.key(), e);
                Vec::new()
            }
        };

        ProjectEntry {
            group_id: module.group_id().to_string(),
            artifact_id: module.artifact_id().to_string(),
            version: module.version().to_string(),
            dependencies,
        }
    }
}

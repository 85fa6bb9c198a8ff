use crate::ports::outbound::ModuleResolver;
use crate::release_report::domain::{
    DependencySummary, Module, ModuleKey, ModuleNode, ParentSummary, ReleaseReport,
};
use crate::release_report::policies::SnapshotPolicy;
use std::collections::BTreeMap;
use tracing::{error, info, warn};

/// SnapshotReportBuilder walks parents and snapshot dependencies of the
/// requested root modules and accumulates a deduplicated [`ReleaseReport`]
///
/// Each builder owns its report; [`SnapshotReportBuilder::finish`] consumes
/// it, so nothing leaks between runs.
pub struct SnapshotReportBuilder<'a, R: ModuleResolver + ?Sized> {
    resolver: &'a R,
    policy: &'a SnapshotPolicy,
    snapshot_modules_only: bool,
    report: ReleaseReport,
}

impl<'a, R: ModuleResolver + ?Sized> SnapshotReportBuilder<'a, R> {
    /// Maximum traversal depth; parent and snapshot chains are a handful of
    /// levels in practice
    pub const MAX_VISIT_DEPTH: usize = 100;

    pub fn new(resolver: &'a R, policy: &'a SnapshotPolicy) -> Self {
        Self {
            resolver,
            policy,
            snapshot_modules_only: true,
            report: ReleaseReport::new(),
        }
    }

    /// When enabled (the default), non-root modules whose own version is
    /// not a pre-release are left out of the report.
    pub fn snapshot_modules_only(mut self, enabled: bool) -> Self {
        self.snapshot_modules_only = enabled;
        self
    }

    /// Visits an explicitly requested root module
    pub fn visit_root(&mut self, module: &Module) {
        self.visit(module, true, 0);
    }

    /// Returns the number of modules recorded so far
    pub fn visited_count(&self) -> usize {
        self.report.len()
    }

    pub fn finish(self) -> ReleaseReport {
        self.report
    }

    /// Convenience: visit every root in order and return the report
    pub fn build(
        resolver: &'a R,
        policy: &'a SnapshotPolicy,
        snapshot_modules_only: bool,
        roots: &[Module],
    ) -> ReleaseReport {
        let mut builder = Self::new(resolver, policy).snapshot_modules_only(snapshot_modules_only);
        for root in roots {
            builder.visit_root(root);
        }
        builder.finish()
    }

    fn visit(&mut self, module: &Module, is_root: bool, depth: usize) {
        let key = module.key();

        if self.report.contains(&key) {
            info!("already visited {}", key);
            return;
        }

        info!("visiting module {}", key);

        if self.snapshot_modules_only && !is_root && !self.policy.is_snapshot(module.version()) {
            info!("{} is not a snapshot ({})", key, module.version());
            return;
        }

        if depth >= Self::MAX_VISIT_DEPTH {
            warn!(
                "Maximum traversal depth ({}) reached at {}. Report may be truncated.",
                Self::MAX_VISIT_DEPTH,
                key
            );
            return;
        }

        // Registered before recursing so a cycle back to this module stops here.
        self.report.insert(
            key.clone(),
            ModuleNode::new(module.group_id(), module.artifact_id()),
        );

        self.visit_parent(&key, module, depth);

        let properties = self.snapshot_properties(module);
        if let Some(node) = self.report.get_mut(&key) {
            node.snapshot_properties = properties;
        }

        self.visit_dependencies(&key, module, depth);
    }

    fn visit_parent(&mut self, key: &ModuleKey, module: &Module, depth: usize) {
        let summary = match self.resolver.resolve_parent(module) {
            Ok(None) => return,
            Ok(Some(parent)) => {
                self.visit(&parent, false, depth + 1);
                ParentSummary::new(
                    parent.coordinates(),
                    self.policy.is_snapshot(parent.version()),
                )
            }
            Err(e) => {
                let Some(declared) = module.parent() else {
                    error!("unable to resolve parent of {}: {:#}", key, e);
                    return;
                };
                error!("unable to resolve parent {} of {}: {:#}", declared, key, e);
                ParentSummary::new(declared, self.policy.is_snapshot(declared.version()))
            }
        };

        if let Some(node) = self.report.get_mut(key) {
            node.parent = Some(summary);
        }
    }

    fn snapshot_properties(&self, module: &Module) -> BTreeMap<String, String> {
        module
            .properties()
            .iter()
            .filter(|(_, value)| self.policy.is_snapshot_value(value))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    fn visit_dependencies(&mut self, key: &ModuleKey, module: &Module, depth: usize) {
        let dependencies = match self.resolver.resolved_dependencies(module) {
            Ok(dependencies) => dependencies,
            Err(e) => {
                error!("invalid dependency version in {}: {:#}", key, e);
                Vec::new()
            }
        };

        if dependencies.is_empty() {
            info!("no dependency artifacts for {}", key);
            return;
        }

        for dependency in dependencies {
            if !self.policy.is_snapshot(dependency.version()) {
                continue;
            }

            info!("{} -> {}", key, dependency.key());

            let summary = DependencySummary::new(
                dependency.coordinates(),
                self.policy.base_version(dependency.version()),
            );
            if let Some(node) = self.report.get_mut(key) {
                node.snapshot_dependencies.push(summary);
            }

            match self.resolver.resolve_dependency(&dependency) {
                Ok(target) => self.visit(&target, false, depth + 1),
                Err(e) => error!(
                    "unable to build module {} required by {}: {:#}",
                    dependency.coordinates(),
                    key,
                    e
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release_report::domain::{Coordinates, Dependency};
    use crate::shared::Result;
    use std::collections::{HashMap, HashSet};

    /// In-memory module graph keyed by `group:artifact`
    #[derive(Default)]
    struct GraphResolver {
        modules: HashMap<String, Module>,
        dependencies: HashMap<String, Vec<Dependency>>,
        broken_dependency_sets: HashSet<String>,
    }

    fn coords(gav: &str) -> Coordinates {
        let parts: Vec<&str> = gav.split(':').collect();
        Coordinates::new(parts[0], parts[1], parts[2]).unwrap()
    }

    impl GraphResolver {
        fn add(&mut self, module: Module, dependencies: &[&str]) {
            let key = module.key().to_string();
            self.dependencies.insert(
                key.clone(),
                dependencies.iter().map(|d| Dependency::new(coords(d))).collect(),
            );
            self.modules.insert(key, module);
        }

        fn module(&self, key: &str) -> Module {
            self.modules[key].clone()
        }
    }

    impl ModuleResolver for GraphResolver {
        fn resolve_parent(&self, module: &Module) -> Result<Option<Module>> {
            match module.parent() {
                None => Ok(None),
                Some(parent) => self
                    .modules
                    .get(parent.key().as_str())
                    .cloned()
                    .map(Some)
                    .ok_or_else(|| anyhow::anyhow!("parent {} not found", parent)),
            }
        }

        fn resolved_dependencies(&self, module: &Module) -> Result<Vec<Dependency>> {
            let key = module.key().to_string();
            if self.broken_dependency_sets.contains(&key) {
                anyhow::bail!("version conflict in {}", key);
            }
            Ok(self.dependencies.get(&key).cloned().unwrap_or_default())
        }

        fn resolve_dependency(&self, dependency: &Dependency) -> Result<Module> {
            self.modules
                .get(dependency.key().as_str())
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("{} not in repository", dependency.coordinates()))
        }
    }

    fn acme_graph() -> GraphResolver {
        let mut graph = GraphResolver::default();
        graph.add(
            Module::new(coords("com.acme:parent-pom:1.0.0-SNAPSHOT")),
            &[],
        );
        graph.add(
            Module::new(coords("com.acme:app:1.0.0-SNAPSHOT"))
                .with_parent(coords("com.acme:parent-pom:1.0.0-SNAPSHOT")),
            &["com.acme:lib:2.3.1-SNAPSHOT", "com.acme:util:4.0.0"],
        );
        graph.add(Module::new(coords("com.acme:lib:2.3.1-SNAPSHOT")), &[]);
        graph.add(Module::new(coords("com.acme:util:4.0.0")), &[]);
        graph
    }

    fn key(s: &str) -> ModuleKey {
        let (group, artifact) = s.split_once(':').unwrap();
        ModuleKey::new(group, artifact)
    }

    #[test]
    fn test_acme_example() {
        let graph = acme_graph();
        let policy = SnapshotPolicy::default();
        let report =
            SnapshotReportBuilder::build(&graph, &policy, true, &[graph.module("com.acme:app")]);

        let keys: Vec<&str> = report.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["com.acme:app", "com.acme:parent-pom", "com.acme:lib"]);

        let app = report.get(&key("com.acme:app")).unwrap();
        let parent = app.parent.as_ref().unwrap();
        assert_eq!(parent.artifact_id, "parent-pom");
        assert!(parent.snapshot);
        assert_eq!(app.snapshot_dependencies.len(), 1);
        assert_eq!(app.snapshot_dependencies[0].artifact_id, "lib");
        assert_eq!(app.snapshot_dependencies[0].version, "2.3.1-SNAPSHOT");

        let lib = report.get(&key("com.acme:lib")).unwrap();
        assert!(lib.snapshot_dependencies.is_empty());
        assert!(lib.parent.is_none());
    }

    #[test]
    fn test_diamond_visits_each_module_once() {
        let mut graph = GraphResolver::default();
        graph.add(
            Module::new(coords("g:top:1-SNAPSHOT")),
            &["g:left:1-SNAPSHOT", "g:right:1-SNAPSHOT"],
        );
        graph.add(Module::new(coords("g:left:1-SNAPSHOT")), &["g:bottom:1-SNAPSHOT"]);
        graph.add(Module::new(coords("g:right:1-SNAPSHOT")), &["g:bottom:1-SNAPSHOT"]);
        graph.add(Module::new(coords("g:bottom:1-SNAPSHOT")), &[]);

        let policy = SnapshotPolicy::default();
        let report = SnapshotReportBuilder::build(&graph, &policy, true, &[graph.module("g:top")]);

        assert_eq!(report.len(), 4);
        // Both edges into bottom are still recorded
        assert_eq!(report.get(&key("g:left")).unwrap().snapshot_dependencies.len(), 1);
        assert_eq!(report.get(&key("g:right")).unwrap().snapshot_dependencies.len(), 1);
    }

    #[test]
    fn test_dependency_cycle_terminates() {
        let mut graph = GraphResolver::default();
        graph.add(Module::new(coords("g:a:1-SNAPSHOT")), &["g:b:1-SNAPSHOT"]);
        graph.add(Module::new(coords("g:b:1-SNAPSHOT")), &["g:a:1-SNAPSHOT"]);

        let policy = SnapshotPolicy::default();
        let report = SnapshotReportBuilder::build(&graph, &policy, true, &[graph.module("g:a")]);

        assert_eq!(report.len(), 2);
        assert_eq!(
            report.get(&key("g:b")).unwrap().snapshot_dependencies[0].artifact_id,
            "a"
        );
    }

    #[test]
    fn test_parent_cycle_terminates() {
        let mut graph = GraphResolver::default();
        graph.add(
            Module::new(coords("g:a:1-SNAPSHOT")).with_parent(coords("g:b:1-SNAPSHOT")),
            &[],
        );
        graph.add(
            Module::new(coords("g:b:1-SNAPSHOT")).with_parent(coords("g:a:1-SNAPSHOT")),
            &[],
        );

        let policy = SnapshotPolicy::default();
        let report = SnapshotReportBuilder::build(&graph, &policy, true, &[graph.module("g:a")]);

        assert_eq!(report.len(), 2);
        assert_eq!(report.get(&key("g:a")).unwrap().parent.as_ref().unwrap().artifact_id, "b");
        assert_eq!(report.get(&key("g:b")).unwrap().parent.as_ref().unwrap().artifact_id, "a");
    }

    #[test]
    fn test_self_dependency_terminates() {
        let mut graph = GraphResolver::default();
        graph.add(Module::new(coords("g:a:1-SNAPSHOT")), &["g:a:1-SNAPSHOT"]);

        let policy = SnapshotPolicy::default();
        let report = SnapshotReportBuilder::build(&graph, &policy, true, &[graph.module("g:a")]);
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_stable_root_is_visited_but_stable_parent_is_not() {
        let mut graph = GraphResolver::default();
        graph.add(Module::new(coords("g:corp-parent:7")), &[]);
        graph.add(
            Module::new(coords("g:service:2.0.0")).with_parent(coords("g:corp-parent:7")),
            &["g:lib:1-SNAPSHOT"],
        );
        graph.add(Module::new(coords("g:lib:1-SNAPSHOT")), &[]);

        let policy = SnapshotPolicy::default();
        let report =
            SnapshotReportBuilder::build(&graph, &policy, true, &[graph.module("g:service")]);

        let keys: Vec<&str> = report.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["g:service", "g:lib"]);

        let parent = report.get(&key("g:service")).unwrap().parent.clone().unwrap();
        assert_eq!(parent.version, "7");
        assert!(!parent.snapshot);
    }

    #[test]
    fn test_stable_parent_visited_when_restriction_disabled() {
        let mut graph = GraphResolver::default();
        graph.add(Module::new(coords("g:corp-parent:7")), &[]);
        graph.add(
            Module::new(coords("g:service:2.0.0")).with_parent(coords("g:corp-parent:7")),
            &[],
        );

        let policy = SnapshotPolicy::default();
        let report =
            SnapshotReportBuilder::build(&graph, &policy, false, &[graph.module("g:service")]);

        assert!(report.contains(&key("g:corp-parent")));
    }

    #[test]
    fn test_stable_dependencies_never_listed() {
        let mut graph = GraphResolver::default();
        graph.add(
            Module::new(coords("g:app:1-SNAPSHOT")),
            &["g:stable:1.0", "g:also-stable:2.0.1"],
        );
        graph.add(Module::new(coords("g:stable:1.0")), &[]);

        let policy = SnapshotPolicy::default();
        let report = SnapshotReportBuilder::build(&graph, &policy, false, &[graph.module("g:app")]);

        assert_eq!(report.len(), 1);
        assert!(report.get(&key("g:app")).unwrap().snapshot_dependencies.is_empty());
    }

    #[test]
    fn test_snapshot_properties_filtered_by_marker() {
        let mut graph = GraphResolver::default();
        graph.add(
            Module::new(coords("g:app:1-SNAPSHOT"))
                .with_property("contracts-version", "12.12.19-SNAPSHOT")
                .with_property("java.version", "17")
                .with_property("properties-version", "12.12.19.1-SNAPSHOT"),
            &[],
        );

        let policy = SnapshotPolicy::default();
        let report = SnapshotReportBuilder::build(&graph, &policy, true, &[graph.module("g:app")]);

        let properties = &report.get(&key("g:app")).unwrap().snapshot_properties;
        assert_eq!(properties.len(), 2);
        assert_eq!(properties["contracts-version"], "12.12.19-SNAPSHOT");
        assert!(!properties.contains_key("java.version"));
    }

    #[test]
    fn test_dependency_resolution_failure_yields_empty_list() {
        let mut graph = acme_graph();
        graph.broken_dependency_sets.insert("com.acme:app".to_string());

        let policy = SnapshotPolicy::default();
        let report =
            SnapshotReportBuilder::build(&graph, &policy, true, &[graph.module("com.acme:app")]);

        let app = report.get(&key("com.acme:app")).unwrap();
        assert!(app.snapshot_dependencies.is_empty());
        assert!(app.parent.is_some());
        assert!(!report.contains(&key("com.acme:lib")));
    }

    #[test]
    fn test_unresolvable_dependency_keeps_edge_without_node() {
        let mut graph = GraphResolver::default();
        graph.add(Module::new(coords("g:app:1-SNAPSHOT")), &["g:missing:3-SNAPSHOT"]);

        let policy = SnapshotPolicy::default();
        let report = SnapshotReportBuilder::build(&graph, &policy, true, &[graph.module("g:app")]);

        assert_eq!(report.len(), 1);
        let edges = &report.get(&key("g:app")).unwrap().snapshot_dependencies;
        assert_eq!(edges[0].artifact_id, "missing");
    }

    #[test]
    fn test_unresolvable_parent_uses_declared_coordinates() {
        let mut graph = GraphResolver::default();
        graph.add(
            Module::new(coords("g:app:1-SNAPSHOT")).with_parent(coords("g:gone:5-SNAPSHOT")),
            &[],
        );

        let policy = SnapshotPolicy::default();
        let report = SnapshotReportBuilder::build(&graph, &policy, true, &[graph.module("g:app")]);

        assert_eq!(report.len(), 1);
        let parent = report.get(&key("g:app")).unwrap().parent.clone().unwrap();
        assert_eq!(parent.artifact_id, "gone");
        assert!(parent.snapshot);
    }

    #[test]
    fn test_timestamped_dependency_reported_with_base_version() {
        let mut graph = GraphResolver::default();
        graph.add(
            Module::new(coords("g:app:1-SNAPSHOT")),
            &["g:lib:2.0-20240101.120000-3"],
        );

        let policy = SnapshotPolicy::default();
        let report = SnapshotReportBuilder::build(&graph, &policy, true, &[graph.module("g:app")]);

        let edges = &report.get(&key("g:app")).unwrap().snapshot_dependencies;
        assert_eq!(edges[0].version, "2.0-SNAPSHOT");
    }

    #[test]
    fn test_multiple_roots_share_visited_set() {
        let graph = acme_graph();
        let policy = SnapshotPolicy::default();
        let roots = vec![graph.module("com.acme:parent-pom"), graph.module("com.acme:app")];
        let report = SnapshotReportBuilder::build(&graph, &policy, true, &roots);

        let keys: Vec<&str> = report.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["com.acme:parent-pom", "com.acme:app", "com.acme:lib"]);
    }

    #[test]
    fn test_report_is_deterministic() {
        let graph = acme_graph();
        let policy = SnapshotPolicy::default();
        let roots = vec![graph.module("com.acme:app")];

        let first = serde_json::to_string_pretty(&SnapshotReportBuilder::build(
            &graph, &policy, true, &roots,
        ))
        .unwrap();
        let second = serde_json::to_string_pretty(&SnapshotReportBuilder::build(
            &graph, &policy, true, &roots,
        ))
        .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_long_chain_is_truncated_at_max_depth() {
        let mut graph = GraphResolver::default();
        let length = SnapshotReportBuilder::<GraphResolver>::MAX_VISIT_DEPTH + 10;
        for i in 0..length {
            let next = format!("g:m{}:1-SNAPSHOT", i + 1);
            let deps: Vec<&str> = if i + 1 < length { vec![next.as_str()] } else { vec![] };
            graph.add(Module::new(coords(&format!("g:m{}:1-SNAPSHOT", i))), &deps);
        }

        let policy = SnapshotPolicy::default();
        let report = SnapshotReportBuilder::build(&graph, &policy, true, &[graph.module("g:m0")]);
        assert_eq!(
            report.len(),
            SnapshotReportBuilder::<GraphResolver>::MAX_VISIT_DEPTH
        );
    }
}

use release_helper::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// In-memory module graph implementing ModuleResolver
///
/// Modules are registered with their resolved dependencies. Keys listed with
/// `with_failing` make `resolve_dependency` fail, and keys listed with
/// `with_invalid_versions` make `resolved_dependencies` fail.
#[derive(Default)]
pub struct MockModuleGraph {
    modules: HashMap<ModuleKey, Module>,
    dependencies: HashMap<ModuleKey, Vec<Dependency>>,
    failing: HashSet<ModuleKey>,
    invalid_versions: HashSet<ModuleKey>,
}

impl MockModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `group:artifact:version`
    pub fn coordinates(gav: &str) -> Coordinates {
        let parts: Vec<&str> = gav.split(':').collect();
        Coordinates::new(parts[0], parts[1], parts[2]).unwrap()
    }

    pub fn with_module(mut self, module: Module, dependencies: &[&str]) -> Self {
        let key = module.key();
        self.dependencies.insert(
            key.clone(),
            dependencies
                .iter()
                .map(|gav| Dependency::new(Self::coordinates(gav)))
                .collect(),
        );
        self.modules.insert(key, module);
        self
    }

    pub fn with_failing(mut self, group_id: &str, artifact_id: &str) -> Self {
        self.failing.insert(ModuleKey::new(group_id, artifact_id));
        self
    }

    pub fn with_invalid_versions(mut self, group_id: &str, artifact_id: &str) -> Self {
        self.invalid_versions
            .insert(ModuleKey::new(group_id, artifact_id));
        self
    }

    pub fn module(&self, group_id: &str, artifact_id: &str) -> Module {
        self.modules[&ModuleKey::new(group_id, artifact_id)].clone()
    }
}

impl ModuleResolver for MockModuleGraph {
    fn resolve_parent(&self, module: &Module) -> Result<Option<Module>> {
        match module.parent() {
            None => Ok(None),
            Some(parent) => match self.modules.get(&parent.key()) {
                Some(m) => Ok(Some(m.clone())),
                None => anyhow::bail!("parent {} not found", parent),
            },
        }
    }

    fn resolved_dependencies(&self, module: &Module) -> Result<Vec<Dependency>> {
        if self.invalid_versions.contains(&module.key()) {
            anyhow::bail!("dependency version of {} is not interpolated", module.key());
        }
        Ok(self
            .dependencies
            .get(&module.key())
            .cloned()
            .unwrap_or_default())
    }

    fn resolve_dependency(&self, dependency: &Dependency) -> Result<Module> {
        let key = dependency.key();
        if self.failing.contains(&key) {
            anyhow::bail!("Mock resolution failure for {}", key);
        }
        self.modules
            .get(&key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("{} not found", key))
    }
}

/// Mock WorkspaceReader returning a fixed module list
pub struct MockWorkspaceReader {
    pub modules: Vec<Module>,
    pub should_fail: bool,
}

impl MockWorkspaceReader {
    pub fn new(modules: Vec<Module>) -> Self {
        Self {
            modules,
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            modules: Vec::new(),
            should_fail: true,
        }
    }
}

impl WorkspaceReader for MockWorkspaceReader {
    fn read_workspace(&self, _project_path: &Path) -> Result<Vec<Module>> {
        if self.should_fail {
            anyhow::bail!("Mock workspace read failure");
        }
        Ok(self.modules.clone())
    }
}

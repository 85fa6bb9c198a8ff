use super::effective_model::{declared_parent, EffectiveModel};
use super::interpolation::has_unresolved_expression;
use super::pom::{parse_pom, Pom};
use crate::ports::outbound::{DescriptorRepository, ModuleResolver};
use crate::release_report::domain::{Coordinates, Dependency, Module, ModuleKey};
use crate::shared::error::ReleaseHelperError;
use crate::shared::security::read_descriptor_file;
use crate::shared::Result;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, warn};

const DEFAULT_PARENT_PATH: &str = "../pom.xml";

/// MavenModuleResolver builds effective models from `pom.xml` files
///
/// Workspace descriptors are read from disk; everything else is fetched
/// through a [`DescriptorRepository`]. Built models are cached for the
/// lifetime of the resolver.
pub struct MavenModuleResolver<R: DescriptorRepository> {
    repository: R,
    reactor: RefCell<HashMap<ModuleKey, Rc<EffectiveModel>>>,
    by_path: RefCell<HashMap<PathBuf, Rc<EffectiveModel>>>,
    by_coordinates: RefCell<HashMap<String, Rc<EffectiveModel>>>,
    loading: RefCell<HashSet<String>>,
}

impl<R: DescriptorRepository> MavenModuleResolver<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            reactor: RefCell::new(HashMap::new()),
            by_path: RefCell::new(HashMap::new()),
            by_coordinates: RefCell::new(HashMap::new()),
            loading: RefCell::new(HashSet::new()),
        }
    }

    /// Marks a model as part of the workspace so dependencies on it are
    /// answered from disk rather than the repository
    pub(super) fn register_workspace_model(&self, model: Rc<EffectiveModel>) {
        self.reactor
            .borrow_mut()
            .entry(model.coordinates().key())
            .or_insert(model);
    }

    fn workspace_model(&self, key: &ModuleKey) -> Option<Rc<EffectiveModel>> {
        self.reactor.borrow().get(key).cloned()
    }

    /// Loads the effective model of a descriptor file on disk
    pub(super) fn load_file(&self, path: &Path) -> Result<Rc<EffectiveModel>> {
        let path = path.canonicalize().map_err(|e| ReleaseHelperError::DescriptorNotFound {
            path: path.to_path_buf(),
            suggestion: format!("Unable to access the descriptor ({})", e),
        })?;

        if let Some(model) = self.by_path.borrow().get(&path) {
            return Ok(Rc::clone(model));
        }

        let guard = path.display().to_string();
        self.enter(&guard)?;
        let result = self.build_file(&path);
        self.loading.borrow_mut().remove(&guard);

        let model = Rc::new(result?);
        self.by_path
            .borrow_mut()
            .insert(path, Rc::clone(&model));
        self.by_coordinates
            .borrow_mut()
            .entry(model.coordinates().to_string())
            .or_insert_with(|| Rc::clone(&model));
        Ok(model)
    }

    fn build_file(&self, path: &Path) -> Result<EffectiveModel> {
        let location = path.display().to_string();
        let content = read_descriptor_file(path, "pom.xml")?;
        let pom = parse_pom(&content, &location)?;
        let parent = self.load_parent(&pom, path.parent(), &location)?;
        self.finish_model(EffectiveModel::build(&pom, parent.as_deref(), &location)?)
    }

    /// Loads the effective model for coordinates from the workspace cache or
    /// the repository
    pub(super) fn load_coordinates(&self, coordinates: &Coordinates) -> Result<Rc<EffectiveModel>> {
        let id = coordinates.to_string();
        if let Some(model) = self.by_coordinates.borrow().get(&id) {
            return Ok(Rc::clone(model));
        }

        self.enter(&id)?;
        let result = self.build_remote(coordinates);
        self.loading.borrow_mut().remove(&id);

        let model = Rc::new(result.map_err(|e| ReleaseHelperError::ModuleResolutionError {
            coordinates: id.clone(),
            details: format!("{:#}", e),
        })?);
        self.by_coordinates
            .borrow_mut()
            .insert(id, Rc::clone(&model));
        Ok(model)
    }

    fn build_remote(&self, coordinates: &Coordinates) -> Result<EffectiveModel> {
        let content = self.repository.fetch_descriptor(coordinates)?;
        let location = format!("{} ({})", coordinates, self.repository.location());
        let pom = parse_pom(&content, &location)?;
        let parent = self.load_parent(&pom, None, &location)?;
        self.finish_model(EffectiveModel::build(&pom, parent.as_deref(), &location)?)
    }

    fn enter(&self, id: &str) -> Result<()> {
        if !self.loading.borrow_mut().insert(id.to_string()) {
            anyhow::bail!("cyclic parent or BOM reference involving {}", id);
        }
        Ok(())
    }

    fn finish_model(&self, mut model: EffectiveModel) -> Result<EffectiveModel> {
        for bom in model.bom_imports().to_vec() {
            match self.load_coordinates(&bom) {
                Ok(imported) => model.import_managed(&imported),
                Err(e) => warn!(
                    "{}: unable to import BOM {}: {:#}",
                    model.location(),
                    bom,
                    e
                ),
            }
        }
        Ok(model)
    }

    /// Finds the parent model: relativePath first (when its coordinates
    /// match), then the workspace, then the repository
    ///
    /// A parent that cannot be found is logged and treated as absent so the
    /// child can still be built from its own content.
    fn load_parent(
        &self,
        pom: &Pom,
        base_dir: Option<&Path>,
        location: &str,
    ) -> Result<Option<Rc<EffectiveModel>>> {
        let Some(declared) = declared_parent(pom, location)? else {
            return Ok(None);
        };

        if let Some(dir) = base_dir {
            if let Some(model) = self.parent_from_relative_path(pom, dir, &declared) {
                return Ok(Some(model));
            }
        }

        if let Some(model) = self.workspace_model(&declared.key()) {
            if model.coordinates() == &declared {
                return Ok(Some(model));
            }
        }

        match self.load_coordinates(&declared) {
            Ok(model) => Ok(Some(model)),
            Err(e) => {
                warn!(
                    "{}: parent {} not found, building without inheritance: {:#}",
                    location, declared, e
                );
                Ok(None)
            }
        }
    }

    fn parent_from_relative_path(
        &self,
        pom: &Pom,
        dir: &Path,
        declared: &Coordinates,
    ) -> Option<Rc<EffectiveModel>> {
        let relative = match pom.parent.as_ref().and_then(|p| p.relative_path.as_deref()) {
            Some(path) if path.trim().is_empty() => return None,
            Some(path) => path.trim(),
            None => DEFAULT_PARENT_PATH,
        };

        let mut candidate = dir.join(relative);
        if candidate.is_dir() {
            candidate = candidate.join("pom.xml");
        }
        if !candidate.is_file() {
            return None;
        }

        match self.load_file(&candidate) {
            Ok(model) if model.coordinates() == declared => Some(model),
            Ok(model) => {
                debug!(
                    "{} is {}, not the declared parent {}",
                    candidate.display(),
                    model.coordinates(),
                    declared
                );
                None
            }
            Err(e) => {
                debug!("unable to use {} as parent: {:#}", candidate.display(), e);
                None
            }
        }
    }

    fn model_for(&self, coordinates: &Coordinates) -> Result<Rc<EffectiveModel>> {
        if let Some(model) = self.workspace_model(&coordinates.key()) {
            return Ok(model);
        }
        self.load_coordinates(coordinates)
    }
}

/// Accepts `[1.0]`, `[1.0,2.0)`, `(,1.0],[1.2,)` and similar
fn is_well_formed_range(version: &str) -> bool {
    let mut open = false;
    let mut commas = 0;
    let mut segments = 0;

    for c in version.chars() {
        match c {
            '[' | '(' if !open => {
                open = true;
                commas = 0;
            }
            ']' | ')' if open => {
                open = false;
                segments += 1;
            }
            '[' | '(' | ']' | ')' => return false,
            ',' if open => {
                commas += 1;
                if commas > 1 {
                    return false;
                }
            }
            ',' => {}
            _ if !open => return false,
            _ => {}
        }
    }

    !open && segments > 0
}

fn check_version(module: &Module, key: &ModuleKey, version: Option<&str>) -> Result<String> {
    let invalid = |reason: String| -> anyhow::Error {
        ReleaseHelperError::InvalidDependencyVersion {
            module: module.coordinates().to_string(),
            dependency: key.to_string(),
            reason,
        }
        .into()
    };

    let version = version.ok_or_else(|| invalid("version is neither declared nor managed".into()))?;
    if has_unresolved_expression(version) {
        return Err(invalid(format!("unresolved expression '{}'", version)));
    }
    if version.contains(&['[', ']', '(', ')'][..]) && !is_well_formed_range(version) {
        return Err(invalid(format!("malformed version range '{}'", version)));
    }
    Ok(version.to_string())
}

impl<R: DescriptorRepository> ModuleResolver for MavenModuleResolver<R> {
    fn resolve_parent(&self, module: &Module) -> Result<Option<Module>> {
        match module.parent() {
            None => Ok(None),
            Some(parent) => {
                let model = match self.workspace_model(&parent.key()) {
                    Some(model) if model.coordinates() == parent => model,
                    _ => self.load_coordinates(parent)?,
                };
                Ok(Some(model.to_module()))
            }
        }
    }

    fn resolved_dependencies(&self, module: &Module) -> Result<Vec<Dependency>> {
        let mut seen = HashSet::new();
        let mut dependencies = Vec::new();

        for declared in module.declared_dependencies() {
            let key = declared.key();
            if !seen.insert(key.clone()) {
                continue;
            }

            let version = check_version(module, &key, declared.version.as_deref())?;
            let coordinates = Coordinates::new(&declared.group_id, &declared.artifact_id, &version)
                .map_err(|e| ReleaseHelperError::InvalidDependencyVersion {
                    module: module.coordinates().to_string(),
                    dependency: key.to_string(),
                    reason: e.to_string(),
                })?;
            dependencies.push(Dependency::new(coordinates).with_scope(declared.scope.clone()));
        }

        Ok(dependencies)
    }

    fn resolve_dependency(&self, dependency: &Dependency) -> Result<Module> {
        Ok(self.model_for(dependency.coordinates())?.to_module())
    }
}

use super::interpolation::interpolate;
use super::pom::{text, Pom, PomDependency};
use crate::release_report::domain::{Coordinates, DeclaredDependency, Module, ModuleKey};
use crate::shared::error::ReleaseHelperError;
use crate::shared::Result;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ManagedDependency {
    version: Option<String>,
    scope: Option<String>,
}

/// A dependency entry as written in the descriptor, before interpolation
#[derive(Debug, Clone)]
struct RawDependency {
    group_id: String,
    artifact_id: String,
    version: Option<String>,
    scope: Option<String>,
    bom_import: bool,
}

impl RawDependency {
    fn from_pom(entry: &PomDependency, location: &str) -> Option<Self> {
        let (Some(group), Some(artifact)) = (text(&entry.group_id), text(&entry.artifact_id))
        else {
            warn!("{}: skipping dependency without groupId/artifactId", location);
            return None;
        };
        Some(Self {
            group_id: group.to_string(),
            artifact_id: artifact.to_string(),
            version: text(&entry.version).map(str::to_string),
            scope: text(&entry.scope).map(str::to_string),
            bom_import: entry.is_bom_import(),
        })
    }

    fn interpolated(&self, values: &HashMap<String, String>) -> DeclaredDependency {
        let mut declared = DeclaredDependency::new(
            interpolate(&self.group_id, values),
            interpolate(&self.artifact_id, values),
            self.version.as_deref().map(|v| interpolate(v, values)),
        );
        if let Some(scope) = &self.scope {
            declared = declared.with_scope(interpolate(scope, values));
        }
        declared
    }
}

/// A descriptor merged with its parent chain
///
/// The uninterpolated property table and dependency entries of the whole
/// chain are kept, so a child re-interpolates inherited values against its
/// own coordinates and property overrides.
#[derive(Debug, Clone)]
pub struct EffectiveModel {
    coordinates: Coordinates,
    parent: Option<Coordinates>,
    packaging: String,
    modules: Vec<String>,
    raw_properties: BTreeMap<String, String>,
    properties: BTreeMap<String, String>,
    raw_managed: Vec<RawDependency>,
    managed: HashMap<ModuleKey, ManagedDependency>,
    imported: HashMap<ModuleKey, ManagedDependency>,
    raw_dependencies: Vec<RawDependency>,
    dependencies: Vec<DeclaredDependency>,
    bom_imports: Vec<Coordinates>,
    location: String,
}

fn parse_error(location: &str, details: impl Into<String>) -> anyhow::Error {
    ReleaseHelperError::DescriptorParseError {
        location: location.to_string(),
        details: details.into(),
    }
    .into()
}

/// Reads the declared `<parent>` coordinates without any inheritance
pub fn declared_parent(pom: &Pom, location: &str) -> Result<Option<Coordinates>> {
    let Some(parent) = &pom.parent else {
        return Ok(None);
    };

    match (
        text(&parent.group_id),
        text(&parent.artifact_id),
        text(&parent.version),
    ) {
        (Some(group), Some(artifact), Some(version)) => Coordinates::new(group, artifact, version)
            .map(Some)
            .map_err(|e| parse_error(location, format!("invalid parent coordinates: {}", e))),
        _ => Err(parse_error(
            location,
            "<parent> must declare groupId, artifactId and version",
        )),
    }
}

impl EffectiveModel {
    /// Builds the effective model of `pom` on top of its already-built parent
    pub fn build(pom: &Pom, parent: Option<&EffectiveModel>, location: &str) -> Result<Self> {
        let parent_coordinates = declared_parent(pom, location)?;

        let artifact_id = text(&pom.artifact_id)
            .ok_or_else(|| parse_error(location, "missing <artifactId>"))?
            .to_string();
        let raw_group = text(&pom.group_id)
            .or_else(|| parent_coordinates.as_ref().map(|p| p.group_id()))
            .ok_or_else(|| parse_error(location, "missing <groupId> and no <parent>"))?
            .to_string();
        let raw_version = text(&pom.version)
            .or_else(|| parent_coordinates.as_ref().map(|p| p.version()))
            .ok_or_else(|| parse_error(location, "missing <version> and no <parent>"))?
            .to_string();
        let packaging = text(&pom.packaging).unwrap_or("jar").to_string();

        let mut raw_properties = parent
            .map(|p| p.raw_properties.clone())
            .unwrap_or_default();
        if let Some(own) = &pom.properties {
            for (name, value) in own {
                raw_properties.insert(name.clone(), value.trim().to_string());
            }
        }

        // Coordinates may use CI-friendly properties such as ${revision}
        let mut values: HashMap<String, String> = raw_properties
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let group_id = interpolate(&raw_group, &values);
        let version = interpolate(&raw_version, &values);

        for prefix in ["project.", "pom.", ""] {
            values.insert(format!("{}groupId", prefix), group_id.clone());
            values.insert(format!("{}artifactId", prefix), artifact_id.clone());
            values.insert(format!("{}version", prefix), version.clone());
        }
        values.insert("project.packaging".to_string(), packaging.clone());
        if let Some(p) = &parent_coordinates {
            values.insert("project.parent.groupId".to_string(), p.group_id().to_string());
            values.insert("project.parent.artifactId".to_string(), p.artifact_id().to_string());
            values.insert("project.parent.version".to_string(), p.version().to_string());
        }

        let properties: BTreeMap<String, String> = raw_properties
            .iter()
            .map(|(k, v)| (k.clone(), interpolate(v, &values)))
            .collect();
        for (name, value) in &properties {
            values.insert(name.clone(), value.clone());
        }

        let coordinates = Coordinates::new(&group_id, &artifact_id, &version)
            .map_err(|e| parse_error(location, format!("invalid coordinates: {}", e)))?;

        // Own entries first so they shadow inherited ones with the same key
        let raw_managed = Self::merge_raw(
            pom.managed_dependency_list(),
            parent.map(|p| p.raw_managed.as_slice()),
            location,
        );
        let mut managed = HashMap::new();
        let mut bom_imports = Vec::new();
        for raw in &raw_managed {
            let declared = raw.interpolated(&values);
            if raw.bom_import {
                match declared
                    .version
                    .as_deref()
                    .map(|v| Coordinates::new(&declared.group_id, &declared.artifact_id, v))
                {
                    Some(Ok(bom)) if !bom_imports.contains(&bom) => bom_imports.push(bom),
                    Some(Ok(_)) => {}
                    _ => warn!(
                        "{}: ignoring BOM import {} without a usable version",
                        location,
                        declared.key()
                    ),
                }
                continue;
            }
            managed.entry(declared.key()).or_insert(ManagedDependency {
                version: declared.version,
                scope: declared.scope,
            });
        }

        let raw_dependencies = Self::merge_raw(
            pom.dependency_list(),
            parent.map(|p| p.raw_dependencies.as_slice()),
            location,
        );
        let own_count = raw_dependencies.len()
            - parent.map_or(0, |p| p.raw_dependencies.len());
        let mut dependencies: Vec<DeclaredDependency> = Vec::new();
        for (index, raw) in raw_dependencies.iter().enumerate() {
            let declared = raw.interpolated(&values);
            if index >= own_count && dependencies.iter().any(|d| d.key() == declared.key()) {
                continue;
            }
            dependencies.push(declared);
        }

        Ok(Self {
            coordinates,
            parent: parent_coordinates,
            packaging,
            modules: pom.module_names().iter().map(|m| m.trim().to_string()).collect(),
            raw_properties,
            properties,
            raw_managed,
            managed,
            imported: HashMap::new(),
            raw_dependencies,
            dependencies,
            bom_imports,
            location: location.to_string(),
        })
    }

    /// Own entries followed by every inherited entry, all uninterpolated
    fn merge_raw(
        own: &[PomDependency],
        inherited: Option<&[RawDependency]>,
        location: &str,
    ) -> Vec<RawDependency> {
        own.iter()
            .filter_map(|entry| RawDependency::from_pom(entry, location))
            .chain(inherited.unwrap_or_default().iter().cloned())
            .collect()
    }

    /// Merges managed versions from an imported BOM
    ///
    /// Entries declared in the descriptor chain win, then the first import
    /// that manages a key.
    pub fn import_managed(&mut self, bom: &EffectiveModel) {
        for (key, entry) in bom.managed.iter().chain(&bom.imported) {
            self.imported
                .entry(key.clone())
                .or_insert_with(|| entry.clone());
        }
    }

    pub fn bom_imports(&self) -> &[Coordinates] {
        &self.bom_imports
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn parent(&self) -> Option<&Coordinates> {
        self.parent.as_ref()
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Declared dependencies with managed versions and scopes filled in
    ///
    /// Versions that are still missing stay `None`; the resolver reports them.
    pub fn declared_dependencies(&self) -> Vec<DeclaredDependency> {
        self.dependencies
            .iter()
            .map(|d| {
                let mut d = d.clone();
                let key = d.key();
                if let Some(managed) = self.managed.get(&key).or_else(|| self.imported.get(&key)) {
                    if d.version.is_none() {
                        d.version = managed.version.clone();
                    }
                    if d.scope.is_none() {
                        d.scope = managed.scope.clone();
                    }
                }
                d
            })
            .collect()
    }

    pub fn to_module(&self) -> Module {
        let mut module = Module::new(self.coordinates.clone());
        if let Some(parent) = &self.parent {
            module = module.with_parent(parent.clone());
        }
        for (name, value) in &self.properties {
            module = module.with_property(name, value);
        }
        for dependency in self.declared_dependencies() {
            module = module.with_declared_dependency(dependency);
        }
        module
    }
}

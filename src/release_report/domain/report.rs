use super::{Coordinates, ModuleKey};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Summary of a module's parent as embedded in its report node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentSummary {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub snapshot: bool,
}

impl ParentSummary {
    pub fn new(coordinates: &Coordinates, snapshot: bool) -> Self {
        Self {
            group_id: coordinates.group_id().to_string(),
            artifact_id: coordinates.artifact_id().to_string(),
            version: coordinates.version().to_string(),
            snapshot,
        }
    }
}

/// One dependency edge: `{groupId, artifactId, version}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencySummary {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl DependencySummary {
    pub fn new(coordinates: &Coordinates, version: impl Into<String>) -> Self {
        Self {
            group_id: coordinates.group_id().to_string(),
            artifact_id: coordinates.artifact_id().to_string(),
            version: version.into(),
        }
    }

    pub fn key(&self) -> ModuleKey {
        ModuleKey::new(&self.group_id, &self.artifact_id)
    }
}

/// Report node for a single visited module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleNode {
    pub group_id: String,
    pub artifact_id: String,
    /// `None` serializes as `null`: the module has no parent
    pub parent: Option<ParentSummary>,
    pub snapshot_properties: BTreeMap<String, String>,
    pub snapshot_dependencies: Vec<DependencySummary>,
}

impl ModuleNode {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            parent: None,
            snapshot_properties: BTreeMap::new(),
            snapshot_dependencies: Vec::new(),
        }
    }
}

/// Deep release report: module key -> node, in visit order
///
/// The key index doubles as the visited set of the traversal, so a key can
/// be inserted at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseReport {
    nodes: Vec<(ModuleKey, ModuleNode)>,
    index: HashMap<ModuleKey, usize>,
}

impl ReleaseReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &ModuleKey) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts a node for `key`; returns `false` and leaves the report
    /// unchanged if the key was already present.
    pub fn insert(&mut self, key: ModuleKey, node: ModuleNode) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key.clone(), self.nodes.len());
        self.nodes.push((key, node));
        true
    }

    pub fn get(&self, key: &ModuleKey) -> Option<&ModuleNode> {
        self.index.get(key).map(|&i| &self.nodes[i].1)
    }

    pub fn get_mut(&mut self, key: &ModuleKey) -> Option<&mut ModuleNode> {
        match self.index.get(key) {
            Some(&i) => Some(&mut self.nodes[i].1),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ModuleKey> {
        self.nodes.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModuleKey, &ModuleNode)> {
        self.nodes.iter().map(|(key, node)| (key, node))
    }

    /// Total number of snapshot dependency edges across all nodes
    pub fn snapshot_dependency_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|(_, node)| node.snapshot_dependencies.len())
            .sum()
    }
}

impl Serialize for ReleaseReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.nodes.len()))?;
        for (key, node) in &self.nodes {
            map.serialize_entry(key.as_str(), node)?;
        }
        map.end()
    }
}

/// One module in the shallow project-info report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub dependencies: Vec<DependencySummary>,
}

/// Shallow report: every workspace module with its direct dependencies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectInfoReport {
    pub projects: Vec<ProjectEntry>,
}

/// Either report shape, as handed to formatters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReportDocument {
    Release(ReleaseReport),
    ProjectInfo(ProjectInfoReport),
}

impl ReportDocument {
    pub fn module_count(&self) -> usize {
        match self {
            ReportDocument::Release(report) => report.len(),
            ReportDocument::ProjectInfo(report) => report.projects.len(),
        }
    }
}

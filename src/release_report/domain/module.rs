use super::{Coordinates, ModuleKey};

/// A dependency exactly as written in a descriptor
///
/// The version may be absent (managed elsewhere) or contain unresolved
/// expressions; turning it into a [`Dependency`] is the resolver's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
}

impl DeclaredDependency {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version,
            scope: None,
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn key(&self) -> ModuleKey {
        ModuleKey::new(&self.group_id, &self.artifact_id)
    }
}

/// A resolved reference from one module to another at a concrete version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    coordinates: Coordinates,
    scope: Option<String>,
}

impl Dependency {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            scope: None,
        }
    }

    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope;
        self
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn version(&self) -> &str {
        self.coordinates.version()
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn key(&self) -> ModuleKey {
        self.coordinates.key()
    }
}

/// Module aggregate: one buildable unit with its parent link, properties
/// and declared dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    coordinates: Coordinates,
    parent: Option<Coordinates>,
    properties: Vec<(String, String)>,
    declared_dependencies: Vec<DeclaredDependency>,
}

impl Module {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            parent: None,
            properties: Vec::new(),
            declared_dependencies: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: Coordinates) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }

    pub fn with_declared_dependency(mut self, dependency: DeclaredDependency) -> Self {
        self.declared_dependencies.push(dependency);
        self
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn group_id(&self) -> &str {
        self.coordinates.group_id()
    }

    pub fn artifact_id(&self) -> &str {
        self.coordinates.artifact_id()
    }

    pub fn version(&self) -> &str {
        self.coordinates.version()
    }

    pub fn key(&self) -> ModuleKey {
        self.coordinates.key()
    }

    /// Declared parent coordinates, if any
    pub fn parent(&self) -> Option<&Coordinates> {
        self.parent.as_ref()
    }

    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    pub fn declared_dependencies(&self) -> &[DeclaredDependency] {
        &self.declared_dependencies
    }
}

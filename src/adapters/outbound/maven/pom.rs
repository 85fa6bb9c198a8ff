use crate::shared::error::ReleaseHelperError;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Serde model of the subset of `pom.xml` the report needs
///
/// Everything else (build, profiles, reporting...) is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pom {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
    pub parent: Option<PomParent>,
    pub modules: Option<PomModules>,
    pub properties: Option<BTreeMap<String, String>>,
    pub dependencies: Option<PomDependencies>,
    pub dependency_management: Option<PomDependencyManagement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PomParent {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    /// `None` means the default `../pom.xml`; an empty element disables
    /// the filesystem lookup
    pub relative_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PomModules {
    pub module: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PomDependencies {
    pub dependency: Vec<PomDependency>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PomDependencyManagement {
    pub dependencies: Option<PomDependencies>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PomDependency {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub scope: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub classifier: Option<String>,
    pub optional: Option<String>,
}

impl Pom {
    pub fn module_names(&self) -> &[String] {
        self.modules.as_ref().map(|m| m.module.as_slice()).unwrap_or(&[])
    }

    pub fn dependency_list(&self) -> &[PomDependency] {
        self.dependencies
            .as_ref()
            .map(|d| d.dependency.as_slice())
            .unwrap_or(&[])
    }

    pub fn managed_dependency_list(&self) -> &[PomDependency] {
        self.dependency_management
            .as_ref()
            .and_then(|m| m.dependencies.as_ref())
            .map(|d| d.dependency.as_slice())
            .unwrap_or(&[])
    }
}

impl PomDependency {
    /// `import`-scoped `pom` entries in dependencyManagement pull in a BOM
    pub fn is_bom_import(&self) -> bool {
        self.scope.as_deref().map(str::trim) == Some("import")
            && self.kind.as_deref().map(str::trim) == Some("pom")
    }
}

/// Returns the trimmed value, treating blank elements as absent
pub(crate) fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parses descriptor text; `location` is only used for error messages
pub fn parse_pom(content: &str, location: &str) -> Result<Pom> {
    quick_xml::de::from_str(content).map_err(|e| {
        ReleaseHelperError::DescriptorParseError {
            location: location.to_string(),
            details: e.to_string(),
        }
        .into()
    })
}

use crate::shared::Result;
use serde::Serialize;

/// Maximum length for groupId / artifactId (security limit)
const MAX_IDENTIFIER_LENGTH: usize = 255;

/// Maximum length for versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

fn validate_identifier(kind: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        anyhow::bail!("{} cannot be empty", kind);
    }

    if value.len() > MAX_IDENTIFIER_LENGTH {
        anyhow::bail!(
            "{} is too long ({} bytes). Maximum allowed: {} bytes",
            kind,
            value.len(),
            MAX_IDENTIFIER_LENGTH
        );
    }

    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        anyhow::bail!(
            "{} '{}' contains invalid characters. Only alphanumeric, hyphens, underscores and dots are allowed.",
            kind,
            value
        );
    }

    Ok(())
}

/// NewType wrapper for a module version with validation
///
/// Accepts plain versions (`1.0.0`, `2.3.1-SNAPSHOT`) as well as version
/// ranges (`[1.0,2.0)`); expressions such as `${revision}` are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    pub fn new(version: String) -> Result<Self> {
        if version.is_empty() {
            anyhow::bail!("Version cannot be empty");
        }

        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        if !version.chars().all(|c| {
            c.is_alphanumeric()
                || matches!(c, '.' | '-' | '_' | '+' | '[' | ']' | '(' | ')' | ',')
        }) {
            anyhow::bail!(
                "Version '{}' contains invalid characters. Only alphanumeric, dots, hyphens, underscores, plus and range delimiters are allowed.",
                version
            );
        }

        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a module regardless of version: `groupId:artifactId`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleKey(String);

impl ModuleKey {
    pub fn new(group_id: &str, artifact_id: &str) -> Self {
        Self(format!("{}:{}", group_id, artifact_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fully qualified module coordinates (groupId, artifactId, version)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinates {
    group_id: String,
    artifact_id: String,
    version: Version,
}

impl Coordinates {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self> {
        let group_id = group_id.into();
        let artifact_id = artifact_id.into();
        validate_identifier("groupId", &group_id)?;
        validate_identifier("artifactId", &artifact_id)?;

        Ok(Self {
            group_id,
            artifact_id,
            version: Version::new(version.into())?,
        })
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    pub fn key(&self) -> ModuleKey {
        ModuleKey::new(&self.group_id, &self.artifact_id)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

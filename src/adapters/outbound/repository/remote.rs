use crate::ports::outbound::DescriptorRepository;
use crate::release_report::domain::Coordinates;
use crate::release_report::policies::split_timestamped_snapshot;
use crate::shared::Result;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RepositoryMetadata {
    versioning: Option<Versioning>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Versioning {
    snapshot: Option<SnapshotVersioning>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SnapshotVersioning {
    timestamp: Option<String>,
    build_number: Option<String>,
}

/// RemoteRepository adapter fetching descriptors from an HTTP repository
///
/// Snapshot versions are looked up through the version directory's
/// `maven-metadata.xml` to find the latest timestamped descriptor; when
/// there is none the plain `-SNAPSHOT` file name is tried.
pub struct RemoteRepository {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl RemoteRepository {
    pub fn new(base_url: &str) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("release-helper/{}", version);
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Validates a path segment before it is placed in a URL
    fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
        if component.is_empty() || component == "." || component == ".." {
            anyhow::bail!("Security: {} segment '{}' is not allowed", component_type, component);
        }

        if component.contains('/') || component.contains('\\') {
            anyhow::bail!(
                "Security: {} contains path separators which are not allowed",
                component_type
            );
        }

        Ok(())
    }

    fn version_dir_url(&self, coordinates: &Coordinates, version_dir: &str) -> Result<String> {
        let mut url = self.base_url.clone();
        for segment in coordinates.group_id().split('.') {
            Self::validate_url_component(segment, "groupId")?;
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        Self::validate_url_component(coordinates.artifact_id(), "artifactId")?;
        Self::validate_url_component(version_dir, "version")?;
        url.push('/');
        url.push_str(&urlencoding::encode(coordinates.artifact_id()));
        url.push('/');
        url.push_str(&urlencoding::encode(version_dir));
        Ok(url)
    }

    fn get_text(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            anyhow::bail!("{} returned status code {}", url, response.status());
        }

        Ok(response.text()?)
    }

    /// Timestamped version (`1.0-20240101.120000-3`) of the latest deployed
    /// snapshot, if the repository publishes one
    fn latest_snapshot(&self, dir_url: &str, base: &str) -> Option<String> {
        let metadata_url = format!("{}/maven-metadata.xml", dir_url);
        let xml = match self.get_text(&metadata_url) {
            Ok(xml) => xml,
            Err(e) => {
                debug!("no snapshot metadata: {:#}", e);
                return None;
            }
        };

        let metadata: RepositoryMetadata = match quick_xml::de::from_str(&xml) {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!("unreadable snapshot metadata at {}: {}", metadata_url, e);
                return None;
            }
        };

        let snapshot = metadata.versioning?.snapshot?;
        let timestamp = snapshot.timestamp?;
        let build_number = snapshot.build_number?;
        Some(format!(
            "{}-{}-{}",
            base,
            timestamp.trim(),
            build_number.trim()
        ))
    }

    fn descriptor_url(dir_url: &str, artifact: &str, version: &str) -> String {
        format!(
            "{}/{}",
            dir_url,
            urlencoding::encode(&format!("{}-{}.pom", artifact, version))
        )
    }
}

impl DescriptorRepository for RemoteRepository {
    fn fetch_descriptor(&self, coordinates: &Coordinates) -> Result<String> {
        let version = coordinates.version();
        let artifact = coordinates.artifact_id();

        if let Some(base) = split_timestamped_snapshot(version) {
            let dir_url = self.version_dir_url(coordinates, &format!("{}{}", base, SNAPSHOT_SUFFIX))?;
            return self.get_text(&Self::descriptor_url(&dir_url, artifact, version));
        }

        let dir_url = self.version_dir_url(coordinates, version)?;
        if let Some(base) = version.strip_suffix(SNAPSHOT_SUFFIX) {
            if let Some(stamped) = self.latest_snapshot(&dir_url, base) {
                match self.get_text(&Self::descriptor_url(&dir_url, artifact, &stamped)) {
                    Ok(content) => return Ok(content),
                    Err(e) => debug!("falling back to {}: {:#}", version, e),
                }
            }
        }

        self.get_text(&Self::descriptor_url(&dir_url, artifact, version))
    }

    fn location(&self) -> String {
        self.base_url.clone()
    }
}

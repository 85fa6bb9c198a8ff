use crate::ports::outbound::DescriptorRepository;
use crate::release_report::domain::Coordinates;
use crate::release_report::policies::split_timestamped_snapshot;
use crate::shared::security::read_descriptor_file;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// LocalRepository reads descriptors from a Maven repository directory
///
/// Uses the standard layout `group/path/artifact/version/artifact-version.pom`.
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.m2/repository`, when a home directory is known
    pub fn default_root() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(|home| Path::new(&home).join(".m2").join("repository"))
    }

    fn version_dir(&self, coordinates: &Coordinates) -> PathBuf {
        let mut dir = self.root.clone();
        for segment in coordinates.group_id().split('.') {
            dir.push(segment);
        }
        dir.push(coordinates.artifact_id());
        match split_timestamped_snapshot(coordinates.version()) {
            Some(base) => dir.push(format!("{}-SNAPSHOT", base)),
            None => dir.push(coordinates.version()),
        }
        dir
    }

    /// Candidate descriptor files, most specific first
    fn descriptor_candidates(&self, coordinates: &Coordinates) -> Vec<PathBuf> {
        let dir = self.version_dir(coordinates);
        let artifact = coordinates.artifact_id();
        let mut candidates = vec![dir.join(format!("{}-{}.pom", artifact, coordinates.version()))];
        if let Some(base) = split_timestamped_snapshot(coordinates.version()) {
            candidates.push(dir.join(format!("{}-{}-SNAPSHOT.pom", artifact, base)));
        }
        candidates
    }
}

impl DescriptorRepository for LocalRepository {
    fn fetch_descriptor(&self, coordinates: &Coordinates) -> Result<String> {
        let candidates = self.descriptor_candidates(coordinates);
        match candidates.iter().find(|path| path.is_file()) {
            Some(path) => read_descriptor_file(path, "pom.xml"),
            None => anyhow::bail!(
                "{} not found in local repository (looked for {})",
                coordinates,
                candidates[0].display()
            ),
        }
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

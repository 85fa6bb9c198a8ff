use crate::ports::outbound::DescriptorRepository;
use crate::release_report::domain::Coordinates;
use crate::shared::error::ReleaseHelperError;
use crate::shared::Result;

/// RepositoryChain consults repositories in order and returns the first hit
pub struct RepositoryChain {
    repositories: Vec<Box<dyn DescriptorRepository>>,
}

impl RepositoryChain {
    pub fn new() -> Self {
        Self {
            repositories: Vec::new(),
        }
    }

    pub fn with_repository(mut self, repository: Box<dyn DescriptorRepository>) -> Self {
        self.repositories.push(repository);
        self
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

impl Default for RepositoryChain {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorRepository for RepositoryChain {
    fn fetch_descriptor(&self, coordinates: &Coordinates) -> Result<String> {
        if self.repositories.is_empty() {
            anyhow::bail!("no repositories configured to fetch {}", coordinates);
        }

        let mut failures = Vec::new();
        for repository in &self.repositories {
            match repository.fetch_descriptor(coordinates) {
                Ok(content) => return Ok(content),
                Err(e) => failures.push(format!("{}: {:#}", repository.location(), e)),
            }
        }

        Err(ReleaseHelperError::ModuleResolutionError {
            coordinates: coordinates.to_string(),
            details: failures.join("; "),
        }
        .into())
    }

    fn location(&self) -> String {
        self.repositories
            .iter()
            .map(|r| r.location())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

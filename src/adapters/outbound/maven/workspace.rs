use super::effective_model::EffectiveModel;
use super::resolver::MavenModuleResolver;
use crate::ports::outbound::{DescriptorRepository, WorkspaceReader};
use crate::release_report::domain::Module;
use crate::shared::error::ReleaseHelperError;
use crate::shared::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{info, warn};

/// MavenWorkspaceReader discovers the reactor from a root `pom.xml`
///
/// `<modules>` entries are followed recursively in declaration order; a
/// descriptor reached twice is only listed once. Every discovered module is
/// registered with the resolver so dependencies between reactor modules are
/// answered from disk.
pub struct MavenWorkspaceReader<'a, R: DescriptorRepository> {
    resolver: &'a MavenModuleResolver<R>,
}

impl<'a, R: DescriptorRepository> MavenWorkspaceReader<'a, R> {
    pub fn new(resolver: &'a MavenModuleResolver<R>) -> Self {
        Self { resolver }
    }

    fn collect(
        &self,
        descriptor: &Path,
        seen: &mut HashSet<PathBuf>,
        reactor: &mut Vec<Rc<EffectiveModel>>,
    ) -> Result<()> {
        let canonical = descriptor
            .canonicalize()
            .unwrap_or_else(|_| descriptor.to_path_buf());
        if !seen.insert(canonical) {
            return Ok(());
        }

        let model = self.resolver.load_file(descriptor)?;
        info!("reactor module {} ({})", model.coordinates(), descriptor.display());
        self.resolver.register_workspace_model(Rc::clone(&model));
        reactor.push(Rc::clone(&model));

        let base = descriptor.parent().unwrap_or_else(|| Path::new("."));
        for name in model.modules() {
            let child = module_descriptor(base, name);
            if let Err(e) = self.collect(&child, seen, reactor) {
                warn!(
                    "skipping module '{}' of {}: {:#}",
                    name,
                    model.coordinates(),
                    e
                );
            }
        }
        Ok(())
    }
}

/// `<module>` names a directory containing `pom.xml`, or a descriptor file
fn module_descriptor(base: &Path, name: &str) -> PathBuf {
    let path = base.join(name);
    if path.extension().is_some_and(|ext| ext == "xml") {
        path
    } else {
        path.join("pom.xml")
    }
}

impl<R: DescriptorRepository> WorkspaceReader for MavenWorkspaceReader<'_, R> {
    fn read_workspace(&self, project_path: &Path) -> Result<Vec<Module>> {
        let root = project_path.join("pom.xml");
        if !root.is_file() {
            return Err(ReleaseHelperError::DescriptorNotFound {
                path: root,
                suggestion: "Run in the root directory of a Maven project, or pass --path <DIR>"
                    .to_string(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        let mut reactor = Vec::new();
        self.collect(&root, &mut seen, &mut reactor)?;

        Ok(reactor.iter().map(|model| model.to_module()).collect())
    }
}

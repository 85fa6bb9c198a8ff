/// Maven descriptor adapters: `pom.xml` model, inheritance and reactor discovery
mod effective_model;
mod interpolation;
mod pom;
mod resolver;
mod workspace;

pub use resolver::MavenModuleResolver;
pub use workspace::MavenWorkspaceReader;

use crate::release_report::domain::{Dependency, Module};
use crate::shared::Result;

/// ModuleResolver port for navigating the module graph
///
/// This port abstracts the build tool's project model: given a module it
/// yields the parent module and the resolved dependency set, and given a
/// dependency it yields the full module descriptor.
pub trait ModuleResolver {
    /// Resolves the parent of a module
    ///
    /// # Returns
    /// `Ok(None)` when the module declares no parent
    ///
    /// # Errors
    /// Returns an error if a parent is declared but its descriptor cannot be
    /// located or parsed
    fn resolve_parent(&self, module: &Module) -> Result<Option<Module>>;

    /// Resolves the module's dependency artifacts to concrete versions
    ///
    /// # Errors
    /// Returns an error if any dependency version is missing, unresolvable
    /// or malformed. Callers treat this as "no dependencies".
    fn resolved_dependencies(&self, module: &Module) -> Result<Vec<Dependency>>;

    /// Resolves the module a dependency points to
    ///
    /// Workspace modules are preferred; anything else comes from a
    /// descriptor repository.
    fn resolve_dependency(&self, dependency: &Dependency) -> Result<Module>;
}

impl<T: ModuleResolver + ?Sized> ModuleResolver for &T {
    fn resolve_parent(&self, module: &Module) -> Result<Option<Module>> {
        (**self).resolve_parent(module)
    }

    fn resolved_dependencies(&self, module: &Module) -> Result<Vec<Dependency>> {
        (**self).resolved_dependencies(module)
    }

    fn resolve_dependency(&self, dependency: &Dependency) -> Result<Module> {
        (**self).resolve_dependency(dependency)
    }
}

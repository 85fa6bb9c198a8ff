/// Descriptor repositories: local directory, remote HTTP, and decorators
mod caching;
mod chain;
mod local;
mod remote;

pub use caching::CachingRepository;
pub use chain::RepositoryChain;
pub use local::LocalRepository;
pub use remote::RemoteRepository;

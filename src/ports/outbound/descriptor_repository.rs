use crate::release_report::domain::Coordinates;
use crate::shared::Result;

/// DescriptorRepository port for fetching module descriptors by coordinates
///
/// Implementations cover the local repository directory, remote HTTP
/// repositories, and decorators such as caching or chaining.
pub trait DescriptorRepository {
    /// Fetches the raw descriptor (pom.xml content) for the given coordinates
    ///
    /// # Errors
    /// Returns an error if the descriptor does not exist in this repository
    /// or cannot be read
    fn fetch_descriptor(&self, coordinates: &Coordinates) -> Result<String>;

    /// Human-readable location of the repository, used in log and error messages
    fn location(&self) -> String;
}

impl<T: DescriptorRepository + ?Sized> DescriptorRepository for Box<T> {
    fn fetch_descriptor(&self, coordinates: &Coordinates) -> Result<String> {
        (**self).fetch_descriptor(coordinates)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

use std::path::Path;

use crate::error::SourceError;

/// Reads the page count of a source document when it is added.
///
/// The count is taken once; later changes to the file on disk are not
/// reflected in the registry.
pub trait PageCounter {
    fn count_pages(&self, path: &Path) -> Result<usize, SourceError>;
}

//! External collaborators of the assembly engine.
//!
//! - [`DocumentConverter`]: turns an editable document into a PDF. The
//!   shipped implementation drives LibreOffice in headless mode.
//! - [`ActiveDocumentSource`]: finds the document open in a running word
//!   processor. Only some platforms have one; see [`active_document_source`].

mod discovery;
mod error;
mod soffice;

pub use discovery::{ActiveDocumentSource, active_document_source, discover_active_document};
pub use error::{ConvertError, DiscoveryError};
pub use soffice::{DEFAULT_PROGRAM, SofficeConverter};

use std::path::Path;

/// Converts an editable document into a fixed-layout PDF.
pub trait DocumentConverter: Send + Sync {
    /// Convert `input` and write the PDF to `destination`.
    ///
    /// # Errors
    ///
    /// [`ConvertError::ToolUnavailable`] when the converter itself cannot be
    /// started; other variants when the conversion of this document failed.
    fn convert(&self, input: &Path, destination: &Path) -> Result<(), ConvertError>;
}

impl<T: DocumentConverter + ?Sized> DocumentConverter for std::sync::Arc<T> {
    fn convert(&self, input: &Path, destination: &Path) -> Result<(), ConvertError> {
        (**self).convert(input, destination)
    }
}

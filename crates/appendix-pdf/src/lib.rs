//! Page-level access to PDF documents.
//!
//! Two halves:
//!
//! - [`SourcePdf`] / [`page_count`] read a document and report its pages;
//! - [`PdfComposer`] builds a new document from whole documents or single
//!   pages of other documents, in the order they are appended.
//!
//! Pages are copied, never edited. Attributes a page inherits from its page
//! tree (`Resources`, `MediaBox`, `CropBox`, `Rotate`) are copied onto the page
//! itself so it renders the same once it hangs off the composed tree.

mod composer;
mod error;
mod source;

pub use composer::PdfComposer;
pub use error::{PdfError, Result};
pub use source::{PdfPageCounter, SourcePdf, page_count};

//! Appendix model: page-range expressions, appendix entries and the ordered
//! registry that keeps positional labels in step with every edit.
//!
//! # Example
//!
//! ```
//! use appendix_model::{AppendixRegistry, MoveDirection};
//!
//! let mut registry = AppendixRegistry::new();
//! registry.add("survey.pdf", 12);
//! registry.add("photos.pdf", 3);
//! registry.set_page_range(0, Some("1-3, 7")).unwrap();
//! registry.move_one(1, MoveDirection::Up).unwrap();
//!
//! assert_eq!(registry.entries()[0].default_label(), "Appendix A");
//! assert_eq!(registry.entries()[0].custom_title(), "Appendix B");
//! ```

mod entry;
mod error;
pub mod label;
pub mod page_range;
mod registry;
mod source;

pub use entry::{AppendixEntry, PageSelection};
pub use error::{PageRangeError, RegistryError, Result, SourceError};
pub use label::{default_label, index_from_letter, letter};
pub use page_range::{PageRange, parse_page_range};
pub use registry::{AddReport, AppendixRegistry, MoveDirection};
pub use source::PageCounter;

//! Library side of the `appendix-wizard` binary.

pub mod edits;
pub mod hints;
pub mod logging;
pub mod prompt;
pub mod settings;
pub mod summary;

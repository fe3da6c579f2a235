//! Appendix assembly.
//!
//! Converts a base document to PDF, inserts a generated title page before
//! each appendix and merges the selected appendix pages into a single
//! output file. The pipeline can run inline ([`assemble`]) or on a worker
//! thread ([`spawn_assembly`]); [`Session`] ties editing and assembly
//! together so that the registry cannot change while an assembly runs.

mod error;
mod pipeline;
mod session;
mod title;
mod worker;

pub use error::{AssemblyError, ErrorKind, Result, SessionError};
pub use pipeline::{
    AppendixSummary, AssemblyObserver, AssemblyOutcome, AssemblyPhase, AssemblyReport,
    AssemblyRequest, AssemblyServices, DEFAULT_OUTPUT_SUFFIX, assemble,
};
pub use session::Session;
pub use title::{TitlePageStyle, write_title_page};
pub use worker::{AssemblyHandle, AssemblyUpdate, LocationRequest, spawn_assembly};

//! Follow-up advice printed under a failed command's error.

use std::path::Path;

use appendix_assembly::{AssemblyError, ErrorKind};
use appendix_convert::DiscoveryError;

/// Suggested next step for `error`, if the error chain contains something the
/// user can act on. `config_path` is the settings file named in the advice.
pub fn hint_for(error: &anyhow::Error, config_path: &Path) -> Option<String> {
    if let Some(discovery) = error.downcast_ref::<DiscoveryError>() {
        return match discovery {
            DiscoveryError::Unsupported => {
                Some("pass --base <DOCX> to name the document explicitly".to_string())
            }
            DiscoveryError::NotRunning | DiscoveryError::NoDocumentOpen => {
                Some("open a document in Word, or pass --base <DOCX>".to_string())
            }
            DiscoveryError::Failed(_) => None,
        };
    }
    match error.downcast_ref::<AssemblyError>()?.kind() {
        ErrorKind::Environment => Some(format!(
            "install LibreOffice, or point `conversion.program` in {} \
             (or --soffice) at the soffice executable",
            config_path.display()
        )),
        ErrorKind::Precondition => {
            Some("fix the document or appendix list and run again".to_string())
        }
        ErrorKind::Unexpected => None,
    }
}

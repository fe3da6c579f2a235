//! Finding the document open in a running word processor.
//!
//! Only Windows has a source: Word is queried over COM through PowerShell.
//! Every other platform reports [`DiscoveryError::Unsupported`].

use std::path::PathBuf;

use crate::error::DiscoveryError;

/// Reports the full path of the document currently open in the editor.
pub trait ActiveDocumentSource: Send + Sync {
    fn active_document(&self) -> Result<PathBuf, DiscoveryError>;
}

/// The discovery source for this platform, if there is one.
pub fn active_document_source() -> Option<Box<dyn ActiveDocumentSource>> {
    platform::source()
}

/// Path of the active document, or [`DiscoveryError::Unsupported`] when this
/// platform has no discovery source.
pub fn discover_active_document() -> Result<PathBuf, DiscoveryError> {
    active_document_source()
        .ok_or(DiscoveryError::Unsupported)?
        .active_document()
}

#[cfg(windows)]
mod platform {
    use std::path::PathBuf;
    use std::process::Command;

    use tracing::debug;

    use super::ActiveDocumentSource;
    use crate::error::DiscoveryError;

    const EXIT_NOT_RUNNING: i32 = 3;
    const EXIT_NO_DOCUMENT: i32 = 4;

    const SCRIPT: &str = r#"
$ErrorActionPreference = 'Stop'
try { $word = [Runtime.InteropServices.Marshal]::GetActiveObject('Word.Application') }
catch { exit 3 }
if ($word.Documents.Count -lt 1) { exit 4 }
[Console]::OutputEncoding = [Text.Encoding]::UTF8
Write-Output $word.ActiveDocument.FullName
"#;

    struct WordAutomation;

    impl ActiveDocumentSource for WordAutomation {
        fn active_document(&self) -> Result<PathBuf, DiscoveryError> {
            let output = Command::new("powershell")
                .args(["-NoProfile", "-NonInteractive", "-Command", SCRIPT])
                .output()
                .map_err(|error| DiscoveryError::Failed(error.to_string()))?;

            match output.status.code() {
                Some(0) => {}
                Some(EXIT_NOT_RUNNING) => return Err(DiscoveryError::NotRunning),
                Some(EXIT_NO_DOCUMENT) => return Err(DiscoveryError::NoDocumentOpen),
                _ => {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    return Err(DiscoveryError::Failed(stderr.trim().to_string()));
                }
            }

            let stdout = String::from_utf8_lossy(&output.stdout);
            let path = stdout.trim();
            if path.is_empty() {
                return Err(DiscoveryError::NoDocumentOpen);
            }
            debug!(path, "active document");
            Ok(PathBuf::from(path))
        }
    }

    pub(super) fn source() -> Option<Box<dyn ActiveDocumentSource>> {
        Some(Box::new(WordAutomation))
    }
}

#[cfg(not(windows))]
mod platform {
    use super::ActiveDocumentSource;

    pub(super) fn source() -> Option<Box<dyn ActiveDocumentSource>> {
        None
    }
}

//! Conversion through LibreOffice's headless mode.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::{debug, info_span};

use crate::DocumentConverter;
use crate::error::ConvertError;

/// Program name looked up on `PATH` when nothing else is configured.
pub const DEFAULT_PROGRAM: &str = "soffice";

/// Runs `soffice --headless --convert-to pdf` once per document.
#[derive(Debug, Clone)]
pub struct SofficeConverter {
    program: OsString,
}

impl Default for SofficeConverter {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl SofficeConverter {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        Path::new(&self.program)
    }

    /// Version line reported by the program, if it starts.
    pub fn version(&self) -> Option<String> {
        let output = Command::new(&self.program).arg("--version").output().ok()?;
        if !output.status.success() {
            return None;
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Some(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    pub fn is_available(&self) -> bool {
        self.version().is_some()
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl DocumentConverter for SofficeConverter {
    fn convert(&self, input: &Path, destination: &Path) -> Result<(), ConvertError> {
        let span = info_span!("soffice", input = %input.display());
        let _guard = span.enter();

        if !input.exists() {
            return Err(ConvertError::failed(input, "input file does not exist"));
        }
        let stem = input
            .file_stem()
            .ok_or_else(|| ConvertError::failed(input, "input has no file name"))?;

        // Convert next to the destination so the final move is a rename.
        let outdir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => TempDir::new_in(parent)?,
            _ => TempDir::new()?,
        };

        let output = Command::new(&self.program)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(outdir.path())
            .arg(input)
            .output()
            .map_err(|source| ConvertError::ToolUnavailable {
                program: self.program_name(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                text => text.to_string(),
            };
            return Err(ConvertError::failed(input, message));
        }

        let mut produced = PathBuf::from(stem);
        produced.set_extension("pdf");
        let produced = outdir.path().join(produced);
        if !produced.is_file() {
            return Err(ConvertError::MissingOutput {
                input: input.to_path_buf(),
            });
        }

        std::fs::rename(&produced, destination)?;
        debug!(destination = %destination.display(), "converted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_an_environment_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("base.docx");
        std::fs::write(&input, b"not really a docx").unwrap();

        let converter = SofficeConverter::new("appendix-convert-no-such-program");
        let err = converter
            .convert(&input, &dir.path().join("base.pdf"))
            .unwrap_err();
        assert!(err.is_environment(), "{err}");
        assert!(!converter.is_available());
    }

    #[test]
    fn missing_input_is_a_conversion_failure() {
        let dir = TempDir::new().unwrap();
        let converter = SofficeConverter::default();
        let err = converter
            .convert(&dir.path().join("gone.docx"), &dir.path().join("gone.pdf"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::Failed { .. }));
    }
}

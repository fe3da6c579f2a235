//! User settings, stored as TOML in the platform config directory.

use std::path::{Path, PathBuf};

use appendix_assembly::{DEFAULT_OUTPUT_SUFFIX, TitlePageStyle};
use appendix_convert::{DEFAULT_PROGRAM, SofficeConverter};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub conversion: ConversionSettings,
    pub title_page: TitlePageSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// LibreOffice executable, either a name on `PATH` or a full path.
    pub program: String,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitlePageSettings {
    pub font: String,
    pub title_size_pt: usize,
    pub subtitle_size_pt: usize,
    pub leading_blank_lines: usize,
}

impl Default for TitlePageSettings {
    fn default() -> Self {
        let style = TitlePageStyle::default();
        Self {
            font: style.font,
            title_size_pt: style.title_size_pt,
            subtitle_size_pt: style.subtitle_size_pt,
            leading_blank_lines: style.leading_blank_lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Appended to the base document's name for the suggested output file.
    pub file_suffix: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            file_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        }
    }
}

impl Settings {
    /// Load from `path`, or from [`Settings::config_path`] when `None`.
    ///
    /// A missing file at the default location yields the defaults; an
    /// explicitly requested file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Default settings file location.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "AppendixWizard", "AppendixWizard")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    pub fn converter(&self) -> SofficeConverter {
        SofficeConverter::new(&self.conversion.program)
    }

    pub fn title_style(&self) -> TitlePageStyle {
        TitlePageStyle {
            font: self.title_page.font.clone(),
            title_size_pt: self.title_page.title_size_pt,
            subtitle_size_pt: self.title_page.subtitle_size_pt,
            leading_blank_lines: self.title_page.leading_blank_lines,
        }
    }
}

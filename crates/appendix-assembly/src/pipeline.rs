//! The assembly pipeline.
//!
//! Steps run strictly in order: convert the base document, generate and
//! convert one title page per appendix, ask for the output location, then
//! merge. All intermediate files live in a scratch directory that is removed
//! when the pipeline returns, whatever the outcome. The output file is only
//! created once the merged document is complete.

use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use appendix_convert::DocumentConverter;
use appendix_model::{AppendixEntry, AppendixRegistry, PageSelection};
use appendix_pdf::{PdfComposer, SourcePdf};
use tempfile::{NamedTempFile, TempDir};
use tracing::{debug, info, info_span};

use crate::error::{AssemblyError, Result};
use crate::title::{TitlePageStyle, write_title_page};

/// Appended to the base document's stem to suggest an output name.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_with_appendices";

/// What to assemble. Entries are a snapshot; later registry edits do not
/// affect a running assembly.
#[derive(Debug, Clone)]
pub struct AssemblyRequest {
    pub base_document: PathBuf,
    pub entries: Vec<AppendixEntry>,
}

impl AssemblyRequest {
    pub fn new(base_document: impl Into<PathBuf>, registry: &AppendixRegistry) -> Self {
        Self {
            base_document: base_document.into(),
            entries: registry.snapshot(),
        }
    }
}

/// Collaborators and settings shared by every assembly.
#[derive(Clone)]
pub struct AssemblyServices {
    pub converter: Arc<dyn DocumentConverter>,
    pub title_style: TitlePageStyle,
    pub output_suffix: String,
    /// Parent of the per-assembly scratch directory. Defaults to the system
    /// temp directory.
    pub scratch_root: Option<PathBuf>,
}

impl AssemblyServices {
    pub fn new(converter: Arc<dyn DocumentConverter>) -> Self {
        Self {
            converter,
            title_style: TitlePageStyle::default(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            scratch_root: None,
        }
    }

    /// `<dir>/<stem><suffix>.pdf` next to the base document.
    pub fn suggested_output(&self, base_document: &Path) -> PathBuf {
        let stem = base_document
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        base_document.with_file_name(format!("{stem}{}.pdf", self.output_suffix))
    }

    fn scratch_dir(&self) -> std::io::Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("appendix-assembly-");
        match &self.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
    }
}

impl fmt::Debug for AssemblyServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssemblyServices")
            .field("title_style", &self.title_style)
            .field("output_suffix", &self.output_suffix)
            .field("scratch_root", &self.scratch_root)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyPhase {
    ConvertingBase,
    GeneratingTitles,
    AwaitingLocation,
    Merging,
}

impl AssemblyPhase {
    pub fn step(self) -> Option<(usize, usize)> {
        match self {
            Self::ConvertingBase => Some((1, 3)),
            Self::GeneratingTitles => Some((2, 3)),
            Self::AwaitingLocation => None,
            Self::Merging => Some((3, 3)),
        }
    }
}

impl fmt::Display for AssemblyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ConvertingBase => "Converting base document to PDF",
            Self::GeneratingTitles => "Generating appendix title pages",
            Self::AwaitingLocation => "Waiting for output location",
            Self::Merging => "Merging final PDF",
        };
        match self.step() {
            Some((step, total)) => write!(f, "Step {step}/{total}: {text}"),
            None => f.write_str(text),
        }
    }
}

/// Pages contributed by one appendix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendixSummary {
    pub label: String,
    pub title: String,
    pub file_name: String,
    pub pages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyReport {
    pub output: PathBuf,
    pub base_pages: usize,
    pub title_pages: usize,
    pub appendices: Vec<AppendixSummary>,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyOutcome {
    Completed(AssemblyReport),
    /// The user declined to pick an output location, or the run was
    /// cancelled. Nothing was written.
    Cancelled,
}

/// Receives progress and answers the output-location question.
pub trait AssemblyObserver {
    fn phase(&mut self, _phase: AssemblyPhase) {}

    /// Where to write the result. `None` cancels the assembly.
    fn output_location(&mut self, suggested: &Path) -> Option<PathBuf>;

    /// Checked between steps.
    fn is_cancelled(&mut self) -> bool {
        false
    }
}

/// Pages of one appendix, resolved before any conversion runs.
struct Planned<'a> {
    entry: &'a AppendixEntry,
    selection: PageSelection,
}

/// Run the whole pipeline on the calling thread.
pub fn assemble(
    request: &AssemblyRequest,
    services: &AssemblyServices,
    observer: &mut dyn AssemblyObserver,
) -> Result<AssemblyOutcome> {
    let span = info_span!(
        "assemble",
        base = %request.base_document.display(),
        appendices = request.entries.len()
    );
    let _guard = span.enter();

    let planned = check_preconditions(request)?;
    let scratch = services.scratch_dir()?;
    debug!(scratch = %scratch.path().display(), "scratch directory created");

    observer.phase(AssemblyPhase::ConvertingBase);
    info!("converting base document");
    let base_pdf = scratch.path().join("base_document.pdf");
    services
        .converter
        .convert(&request.base_document, &base_pdf)
        .map_err(|source| AssemblyError::conversion(&request.base_document, source))?;
    if observer.is_cancelled() {
        return Ok(cancelled());
    }

    observer.phase(AssemblyPhase::GeneratingTitles);
    info!(count = planned.len(), "generating title pages");
    let mut title_pdfs = Vec::with_capacity(planned.len());
    for (index, plan) in planned.iter().enumerate() {
        let docx = scratch.path().join(format!("title_{index}.docx"));
        let pdf = scratch.path().join(format!("title_{index}.pdf"));
        write_title_page(
            &docx,
            plan.entry.custom_title(),
            &plan.entry.file_name(),
            &services.title_style,
        )?;
        services
            .converter
            .convert(&docx, &pdf)
            .map_err(|source| AssemblyError::conversion(&docx, source))?;
        debug!(title = plan.entry.custom_title(), "title page ready");
        title_pdfs.push(pdf);
        if observer.is_cancelled() {
            return Ok(cancelled());
        }
    }

    observer.phase(AssemblyPhase::AwaitingLocation);
    let suggested = services.suggested_output(&request.base_document);
    let Some(output) = observer.output_location(&suggested) else {
        return Ok(cancelled());
    };

    observer.phase(AssemblyPhase::Merging);
    info!(output = %output.display(), "merging");
    let mut composer = PdfComposer::new();
    let base_pages = composer.append_document(&SourcePdf::open(&base_pdf)?)?;
    let mut title_pages = 0;
    let mut appendices = Vec::with_capacity(planned.len());
    for (plan, title_pdf) in planned.iter().zip(&title_pdfs) {
        title_pages += composer.append_document(&SourcePdf::open(title_pdf)?)?;
        let source = SourcePdf::open(plan.entry.source_path())?;
        let pages = match &plan.selection {
            PageSelection::All => composer.append_document(&source)?,
            PageSelection::Pages(indices) => composer.append_pages(&source, indices)?,
        };
        appendices.push(AppendixSummary {
            label: plan.entry.default_label().to_string(),
            title: plan.entry.custom_title().to_string(),
            file_name: plan.entry.file_name(),
            pages,
        });
    }

    let total_pages = write_atomically(composer, &output)?;
    info!(output = %output.display(), total_pages, "assembly complete");
    Ok(AssemblyOutcome::Completed(AssemblyReport {
        output,
        base_pages,
        title_pages,
        appendices,
        total_pages,
    }))
}

fn cancelled() -> AssemblyOutcome {
    info!("assembly cancelled");
    AssemblyOutcome::Cancelled
}

fn check_preconditions(request: &AssemblyRequest) -> Result<Vec<Planned<'_>>> {
    if !request.base_document.is_file() {
        return Err(AssemblyError::BaseDocumentMissing {
            path: request.base_document.clone(),
        });
    }
    if request.entries.is_empty() {
        return Err(AssemblyError::NoAppendices);
    }
    request
        .entries
        .iter()
        .map(|entry| {
            if !entry.source_path().is_file() {
                return Err(AssemblyError::AppendixMissing {
                    label: entry.custom_title().to_string(),
                    path: entry.source_path().to_path_buf(),
                });
            }
            let selection =
                entry
                    .selected_pages()
                    .map_err(|source| AssemblyError::InvalidPageRange {
                        label: entry.custom_title().to_string(),
                        source,
                    })?;
            Ok(Planned { entry, selection })
        })
        .collect()
}

/// Write into a temporary file beside `output` and rename it into place.
fn write_atomically(composer: PdfComposer, output: &Path) -> Result<usize> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| AssemblyError::Output {
        path: output.to_path_buf(),
        source,
    })?;
    let file = NamedTempFile::new_in(dir).map_err(|source| AssemblyError::Output {
        path: output.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    let pages = composer.write_to(&mut writer)?;
    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|error| AssemblyError::Output {
            path: output.to_path_buf(),
            source: error.into_error(),
        })?;
    file.persist(output).map_err(|error| AssemblyError::Output {
        path: output.to_path_buf(),
        source: error.error,
    })?;
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Refusing;

    impl DocumentConverter for Refusing {
        fn convert(
            &self,
            input: &Path,
            _destination: &Path,
        ) -> std::result::Result<(), appendix_convert::ConvertError> {
            Err(appendix_convert::ConvertError::failed(input, "unused"))
        }
    }

    #[test]
    fn suggests_name_beside_base() {
        let services = AssemblyServices::new(Arc::new(Refusing));
        assert_eq!(
            services.suggested_output(Path::new("/work/Report v2.docx")),
            PathBuf::from("/work/Report v2_with_appendices.pdf")
        );
    }

    #[test]
    fn phases_read_as_steps() {
        assert_eq!(
            AssemblyPhase::ConvertingBase.to_string(),
            "Step 1/3: Converting base document to PDF"
        );
        assert_eq!(
            AssemblyPhase::AwaitingLocation.to_string(),
            "Waiting for output location"
        );
        assert_eq!(AssemblyPhase::Merging.step(), Some((3, 3)));
    }
}

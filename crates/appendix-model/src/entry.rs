use std::path::{Path, PathBuf};

use crate::error::PageRangeError;
use crate::label::default_label;
use crate::page_range::parse_page_range;

/// One appendix source: a document, its display title and selected pages.
///
/// Fields are private so that the default label can only change through a
/// registry relabeling pass and the title can never become empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendixEntry {
    default_label: String,
    custom_title: String,
    source_path: PathBuf,
    total_page_count: usize,
    page_range_spec: Option<String>,
}

/// Pages of a source that go into the assembled output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page, in natural order.
    All,
    /// Zero-based indices, ascending and unique.
    Pages(Vec<usize>),
}

impl AppendixEntry {
    pub(crate) fn new(position: usize, source_path: PathBuf, total_page_count: usize) -> Self {
        let label = default_label(position);
        Self {
            custom_title: label.clone(),
            default_label: label,
            source_path,
            total_page_count,
            page_range_spec: None,
        }
    }

    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    pub fn custom_title(&self) -> &str {
        &self.custom_title
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Page count read when the source was added.
    pub fn total_page_count(&self) -> usize {
        self.total_page_count
    }

    /// Raw range expression, `None` meaning all pages.
    pub fn page_range_spec(&self) -> Option<&str> {
        self.page_range_spec.as_deref()
    }

    /// File name of the source, used on title pages and in listings.
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_path.display().to_string())
    }

    /// `"Pages: 1-3"` when a range is set, otherwise `"12 pages"`.
    pub fn page_info(&self) -> String {
        match &self.page_range_spec {
            Some(spec) => format!("Pages: {spec}"),
            None => format!("{} pages", self.total_page_count),
        }
    }

    /// Listing line: `"<title>  |  <page info>  (<file name>)"`.
    pub fn display_line(&self) -> String {
        format!(
            "{}  |  {}  ({})",
            self.custom_title,
            self.page_info(),
            self.file_name()
        )
    }

    /// Re-parse the stored range expression against the recorded page count.
    pub fn selected_pages(&self) -> Result<PageSelection, PageRangeError> {
        match &self.page_range_spec {
            None => Ok(PageSelection::All),
            Some(spec) => parse_page_range(spec, self.total_page_count).map(PageSelection::Pages),
        }
    }

    pub(crate) fn relabel(&mut self, position: usize) {
        self.default_label = default_label(position);
    }

    pub(crate) fn set_custom_title(&mut self, title: String) {
        self.custom_title = title;
    }

    pub(crate) fn set_page_range_spec(&mut self, spec: Option<String>) {
        self.page_range_spec = spec;
    }
}

//! Ordered appendix registry.
//!
//! The order of entries is the output order. Every structural edit (add,
//! remove, move) ends with [`AppendixRegistry::relabel`], the only place
//! where default labels are derived from positions.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::entry::AppendixEntry;
use crate::error::{RegistryError, Result, SourceError};
use crate::page_range::PageRange;
use crate::source::PageCounter;

/// Direction for [`AppendixRegistry::move_one`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Outcome of adding several sources at once.
#[derive(Debug, Default)]
pub struct AddReport {
    /// Positions of the entries that were added, in order.
    pub added: Vec<usize>,
    /// Sources that could not be read; nothing was added for them.
    pub failed: Vec<SourceError>,
}

impl AddReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppendixRegistry {
    entries: Vec<AppendixEntry>,
}

impl AppendixRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in output order.
    pub fn entries(&self) -> &[AppendixEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&AppendixEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AppendixEntry> {
        self.entries.iter()
    }

    /// Listing lines for every entry, in order.
    pub fn display_lines(&self) -> Vec<String> {
        self.entries.iter().map(AppendixEntry::display_line).collect()
    }

    /// Append a source whose page count is already known. Returns its position.
    pub fn add(&mut self, source_path: impl Into<PathBuf>, total_page_count: usize) -> usize {
        let position = self.entries.len();
        let entry = AppendixEntry::new(position, source_path.into(), total_page_count);
        debug!(
            label = entry.default_label(),
            path = %entry.source_path().display(),
            pages = total_page_count,
            "appendix added"
        );
        self.entries.push(entry);
        self.relabel();
        position
    }

    /// Read the page count of `path` once and append it.
    ///
    /// # Errors
    ///
    /// Returns the counter's error when the source is missing or unreadable;
    /// the registry is left unchanged.
    pub fn add_source(
        &mut self,
        path: &Path,
        counter: &dyn PageCounter,
    ) -> std::result::Result<usize, SourceError> {
        let pages = counter.count_pages(path)?;
        Ok(self.add(path, pages))
    }

    /// Add several sources in order, skipping (and reporting) unreadable ones.
    pub fn add_sources<I, P>(&mut self, paths: I, counter: &dyn PageCounter) -> AddReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut report = AddReport::default();
        for path in paths {
            match self.add_source(path.as_ref(), counter) {
                Ok(position) => report.added.push(position),
                Err(error) => {
                    warn!(%error, "appendix source rejected");
                    report.failed.push(error);
                }
            }
        }
        report
    }

    /// Remove every position in `indices` in one step.
    ///
    /// An empty selection is a no-op. If any index is out of bounds nothing
    /// is removed. Returns the number of entries removed.
    pub fn remove_at(&mut self, indices: &BTreeSet<usize>) -> Result<usize> {
        if indices.is_empty() {
            return Ok(0);
        }
        if let Some(&index) = indices.iter().find(|&&index| index >= self.entries.len()) {
            return Err(self.out_of_bounds(index));
        }
        let mut position = 0;
        self.entries.retain(|_| {
            let keep = !indices.contains(&position);
            position += 1;
            keep
        });
        self.relabel();
        debug!(removed = indices.len(), remaining = self.entries.len(), "appendices removed");
        Ok(indices.len())
    }

    /// Swap the entry at `index` with its neighbour in `direction`.
    ///
    /// At the top (moving up) or bottom (moving down) this is a no-op and the
    /// original index is returned. Otherwise returns the new position.
    pub fn move_one(&mut self, index: usize, direction: MoveDirection) -> Result<usize> {
        self.check_index(index)?;
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|&next| next < self.entries.len()),
        };
        let Some(target) = target else {
            debug!(index, ?direction, "appendix already at boundary");
            return Ok(index);
        };
        self.entries.swap(index, target);
        self.relabel();
        Ok(target)
    }

    /// Move a selection that must contain exactly one position.
    pub fn move_selection(
        &mut self,
        selection: &BTreeSet<usize>,
        direction: MoveDirection,
    ) -> Result<usize> {
        match selection.iter().next() {
            Some(&index) if selection.len() == 1 => self.move_one(index, direction),
            _ => Err(RegistryError::SelectionNotSingle {
                count: selection.len(),
            }),
        }
    }

    /// Set the user-visible title. Blank titles are rejected and the previous
    /// title is kept.
    pub fn rename(&mut self, index: usize, new_title: &str) -> Result<()> {
        self.check_index(index)?;
        if new_title.trim().is_empty() {
            return Err(RegistryError::EmptyTitle);
        }
        let entry = &mut self.entries[index];
        debug!(label = entry.default_label(), title = new_title, "appendix renamed");
        entry.set_custom_title(new_title.to_string());
        Ok(())
    }

    /// Set or clear the page selection of one entry.
    ///
    /// `None` or a blank expression means all pages. Anything else must parse
    /// against the entry's page count, otherwise the entry is unchanged.
    pub fn set_page_range(&mut self, index: usize, expr: Option<&str>) -> Result<()> {
        self.check_index(index)?;
        let entry = &mut self.entries[index];
        let spec = match expr.map(str::trim).filter(|expr| !expr.is_empty()) {
            None => None,
            Some(expr) => {
                let range = PageRange::parse(expr, entry.total_page_count()).map_err(|source| {
                    RegistryError::InvalidPageRange {
                        label: entry.custom_title().to_string(),
                        source,
                    }
                })?;
                Some(range.as_str().to_string())
            }
        };
        debug!(label = entry.default_label(), range = ?spec, "page range updated");
        entry.set_page_range_spec(spec);
        Ok(())
    }

    /// Copy of the current entries, in order.
    pub fn snapshot(&self) -> Vec<AppendixEntry> {
        self.entries.clone()
    }

    fn relabel(&mut self) {
        for (position, entry) in self.entries.iter_mut().enumerate() {
            entry.relabel(position);
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(self.out_of_bounds(index))
        }
    }

    fn out_of_bounds(&self, index: usize) -> RegistryError {
        RegistryError::IndexOutOfBounds {
            index,
            len: self.entries.len(),
        }
    }
}

impl<'a> IntoIterator for &'a AppendixRegistry {
    type Item = &'a AppendixEntry;
    type IntoIter = std::slice::Iter<'a, AppendixEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

//! Editing session: the connected base document, the appendix registry and
//! whether an assembly is in flight.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use appendix_model::{AddReport, AppendixRegistry, MoveDirection, PageCounter};
use tracing::info;

use crate::error::SessionError;
use crate::pipeline::{AssemblyRequest, AssemblyServices};
use crate::worker::{AssemblyHandle, spawn_assembly};

type Result<T> = std::result::Result<T, SessionError>;

/// Application state shared by the front end.
///
/// While an assembly runs every edit is refused with [`SessionError::Busy`].
/// Call [`Session::finish_assembly`] once the run has reported its outcome.
#[derive(Debug, Default)]
pub struct Session {
    base_document: Option<PathBuf>,
    registry: AppendixRegistry,
    busy: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_document(&self) -> Option<&Path> {
        self.base_document.as_deref()
    }

    pub fn registry(&self) -> &AppendixRegistry {
        &self.registry
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn connect_base(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.ensure_idle()?;
        let path = path.into();
        info!(base = %path.display(), "base document connected");
        self.base_document = Some(path);
        Ok(())
    }

    pub fn add_sources<I, P>(&mut self, paths: I, counter: &dyn PageCounter) -> Result<AddReport>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.ensure_idle()?;
        Ok(self.registry.add_sources(paths, counter))
    }

    pub fn remove_at(&mut self, selection: &BTreeSet<usize>) -> Result<usize> {
        self.ensure_idle()?;
        Ok(self.registry.remove_at(selection)?)
    }

    pub fn move_one(&mut self, index: usize, direction: MoveDirection) -> Result<usize> {
        self.ensure_idle()?;
        Ok(self.registry.move_one(index, direction)?)
    }

    pub fn move_selection(
        &mut self,
        selection: &BTreeSet<usize>,
        direction: MoveDirection,
    ) -> Result<usize> {
        self.ensure_idle()?;
        Ok(self.registry.move_selection(selection, direction)?)
    }

    pub fn rename(&mut self, index: usize, title: &str) -> Result<()> {
        self.ensure_idle()?;
        Ok(self.registry.rename(index, title)?)
    }

    pub fn set_page_range(&mut self, index: usize, expr: Option<&str>) -> Result<()> {
        self.ensure_idle()?;
        Ok(self.registry.set_page_range(index, expr)?)
    }

    /// Snapshot of the current state for an assembly run.
    pub fn assembly_request(&self) -> Result<AssemblyRequest> {
        let base = self
            .base_document
            .as_ref()
            .ok_or(SessionError::NoBaseDocument)?;
        Ok(AssemblyRequest::new(base, &self.registry))
    }

    /// Spawn an assembly of the current state and lock editing until
    /// [`Session::finish_assembly`].
    pub fn start_assembly(&mut self, services: AssemblyServices) -> Result<AssemblyHandle> {
        self.ensure_idle()?;
        let request = self.assembly_request()?;
        self.busy = true;
        Ok(spawn_assembly(request, services))
    }

    /// Re-enable editing after a run, whatever its outcome.
    pub fn finish_assembly(&mut self) -> Result<()> {
        if !self.busy {
            return Err(SessionError::NoAssembly);
        }
        self.busy = false;
        Ok(())
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.busy {
            Err(SessionError::Busy)
        } else {
            Ok(())
        }
    }
}

//! Background assembly thread.
//!
//! The worker reports progress over a channel. When it needs the output
//! location it sends a [`LocationRequest`] and blocks until that request is
//! answered, dropped, or the handle cancels the run.

use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded, select, unbounded};
use tracing::{debug, warn};

use crate::error::Result;
use crate::pipeline::{
    AssemblyObserver, AssemblyOutcome, AssemblyPhase, AssemblyRequest, AssemblyServices, assemble,
};

/// Messages from the worker to its owner.
#[derive(Debug)]
pub enum AssemblyUpdate {
    Phase(AssemblyPhase),
    LocationRequested(LocationRequest),
    /// Always the last update of a run.
    Finished(Result<AssemblyOutcome>),
}

/// One-shot question for the output path. Dropping it without an answer
/// cancels the assembly.
#[derive(Debug)]
pub struct LocationRequest {
    suggested: PathBuf,
    reply: Sender<Option<PathBuf>>,
}

impl LocationRequest {
    pub fn suggested(&self) -> &Path {
        &self.suggested
    }

    /// Answer with a path, or `None` to cancel.
    pub fn respond(self, location: Option<PathBuf>) {
        // The worker may already have been cancelled.
        let _ = self.reply.send(location);
    }

    pub fn accept_suggested(self) {
        let suggested = self.suggested.clone();
        self.respond(Some(suggested));
    }
}

/// Owner's side of a running assembly. Dropping the handle cancels the run
/// at its next checkpoint.
#[derive(Debug)]
pub struct AssemblyHandle {
    updates: Receiver<AssemblyUpdate>,
    cancel: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl AssemblyHandle {
    pub fn updates(&self) -> &Receiver<AssemblyUpdate> {
        &self.updates
    }

    /// Ask the worker to stop. Takes effect between steps or while it waits
    /// for the output location.
    pub fn cancel(&self) {
        let _ = self.cancel.try_send(());
    }

    /// Drain updates until the run finishes, answering the location request
    /// with `choose`.
    pub fn wait_with(
        mut self,
        mut choose: impl FnMut(&Path) -> Option<PathBuf>,
    ) -> Result<AssemblyOutcome> {
        let mut finished = None;
        for update in self.updates.iter() {
            match update {
                AssemblyUpdate::Phase(_) => {}
                AssemblyUpdate::LocationRequested(request) => {
                    let location = choose(request.suggested());
                    request.respond(location);
                }
                AssemblyUpdate::Finished(result) => {
                    finished = Some(result);
                    break;
                }
            }
        }
        self.join();
        // The worker always sends `Finished` unless it panicked.
        finished.unwrap_or(Ok(AssemblyOutcome::Cancelled))
    }

    /// Wait for the worker thread to exit.
    pub fn join(&mut self) {
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            warn!("assembly worker panicked");
        }
    }
}

/// Start an assembly on a new thread.
pub fn spawn_assembly(request: AssemblyRequest, services: AssemblyServices) -> AssemblyHandle {
    let (updates_tx, updates_rx) = unbounded();
    let (cancel_tx, cancel_rx) = bounded(1);

    let thread = std::thread::spawn(move || {
        let mut observer = ChannelObserver {
            updates: updates_tx.clone(),
            cancel: cancel_rx,
            cancelled: false,
        };
        let result = assemble(&request, &services, &mut observer);
        if updates_tx.send(AssemblyUpdate::Finished(result)).is_err() {
            debug!("assembly finished after its handle was dropped");
        }
    });

    AssemblyHandle {
        updates: updates_rx,
        cancel: cancel_tx,
        thread: Some(thread),
    }
}

struct ChannelObserver {
    updates: Sender<AssemblyUpdate>,
    cancel: Receiver<()>,
    cancelled: bool,
}

impl AssemblyObserver for ChannelObserver {
    fn phase(&mut self, phase: AssemblyPhase) {
        let _ = self.updates.send(AssemblyUpdate::Phase(phase));
    }

    fn output_location(&mut self, suggested: &Path) -> Option<PathBuf> {
        if self.is_cancelled() {
            return None;
        }
        let (reply_tx, reply_rx) = bounded(1);
        let request = LocationRequest {
            suggested: suggested.to_path_buf(),
            reply: reply_tx,
        };
        self.updates
            .send(AssemblyUpdate::LocationRequested(request))
            .ok()?;

        select! {
            recv(reply_rx) -> answer => answer.ok().flatten(),
            recv(self.cancel) -> _ => {
                self.cancelled = true;
                None
            }
        }
    }

    fn is_cancelled(&mut self) -> bool {
        if !self.cancelled {
            // A disconnected channel means the handle is gone.
            self.cancelled = !matches!(self.cancel.try_recv(), Err(TryRecvError::Empty));
        }
        self.cancelled
    }
}

//! Registry edits given on the command line.
//!
//! Appendices are addressed by letter (`B`), by default label
//! (`Appendix B`) or by one-based position (`2`). A label is resolved when
//! its edit runs, so after `--remove A` the former `B` is addressed as `A`.

use std::fmt;
use std::str::FromStr;

use appendix_assembly::{Session, SessionError};
use appendix_model::label::LABEL_PREFIX;
use appendix_model::{AppendixRegistry, MoveDirection, index_from_letter};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("expected LABEL=VALUE, got '{0}'")]
    InvalidAssignment(String),

    #[error("no appendix labelled '{label}' (there are {count})")]
    UnknownLabel { label: String, count: usize },

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// `LABEL=VALUE` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub label: String,
    pub value: String,
}

impl FromStr for Assignment {
    type Err = EditError;

    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        match arg.split_once('=') {
            Some((label, value)) if !label.trim().is_empty() => Ok(Self {
                label: label.trim().to_string(),
                value: value.to_string(),
            }),
            _ => Err(EditError::InvalidAssignment(arg.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Title(Assignment),
    Pages(Assignment),
    Remove(String),
    Move(String, MoveDirection),
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title(a) => write!(f, "--title {}={}", a.label, a.value),
            Self::Pages(a) => write!(f, "--pages {}={}", a.label, a.value),
            Self::Remove(label) => write!(f, "--remove {label}"),
            Self::Move(label, MoveDirection::Up) => write!(f, "--move-up {label}"),
            Self::Move(label, MoveDirection::Down) => write!(f, "--move-down {label}"),
        }
    }
}

/// Position of the appendix addressed by `label`.
pub fn resolve_label(registry: &AppendixRegistry, label: &str) -> Result<usize, EditError> {
    let trimmed = label.trim();
    let code = trimmed
        .strip_prefix(LABEL_PREFIX)
        .map(str::trim_start)
        .unwrap_or(trimmed);
    let index = match code.parse::<usize>() {
        Ok(position) => position.checked_sub(1),
        Err(_) => index_from_letter(code),
    };
    index
        .filter(|&index| index < registry.len())
        .ok_or_else(|| EditError::UnknownLabel {
            label: label.to_string(),
            count: registry.len(),
        })
}

/// Apply one edit to the session's registry.
pub fn apply(session: &mut Session, edit: &Edit) -> Result<(), EditError> {
    match edit {
        Edit::Title(assignment) => {
            let index = resolve_label(session.registry(), &assignment.label)?;
            session.rename(index, &assignment.value)?;
        }
        Edit::Pages(assignment) => {
            let index = resolve_label(session.registry(), &assignment.label)?;
            session.set_page_range(index, Some(&assignment.value))?;
        }
        Edit::Remove(label) => {
            let index = resolve_label(session.registry(), label)?;
            session.remove_at(&[index].into_iter().collect())?;
        }
        Edit::Move(label, direction) => {
            let index = resolve_label(session.registry(), label)?;
            session.move_one(index, *direction)?;
        }
    }
    Ok(())
}

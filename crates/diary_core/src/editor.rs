//! Transient note-editing flow.
//!
//! # Responsibility
//! - Track draft text and the pending confirmation for one note at a time.
//! - Commit confirmed changes to the `NoteStore`.
//!
//! # Invariants
//! - Nothing is persisted before a confirmation.
//! - Cancelling a confirmation returns to the draft it came from; cancelling
//!   a draft returns to `Idle`.
//! - Confirming whitespace-only text stores nothing and reopens the draft.

use crate::model::note_date::NoteDate;
use crate::service::note_store::NoteStore;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Idle,
    Drafting { date: NoteDate, text: String },
    ConfirmingSave { date: NoteDate, text: String },
    Editing { date: NoteDate, text: String },
    ConfirmingEdit { date: NoteDate, text: String },
    ConfirmingDelete { date: NoteDate },
}

impl EditorState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Drafting { .. } => "drafting",
            Self::ConfirmingSave { .. } => "confirming_save",
            Self::Editing { .. } => "editing",
            Self::ConfirmingEdit { .. } => "confirming_edit",
            Self::ConfirmingDelete { .. } => "confirming_delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    Saved(NoteDate),
    Deleted(NoteDate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
    EmptyNote,
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition { state, action } => {
                write!(f, "cannot {action} while {state}")
            }
            Self::EmptyNote => write!(f, "note text cannot be empty"),
        }
    }
}

impl Error for EditorError {}

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Debug, Default)]
pub struct NoteEditor {
    state: EditorState,
}

impl NoteEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Opens an empty draft for `date`.
    pub fn select_date(&mut self, date: NoteDate) -> EditorResult<()> {
        self.require_idle("select a date")?;
        self.state = EditorState::Drafting {
            date,
            text: String::new(),
        };
        Ok(())
    }

    /// Opens an existing note for editing.
    pub fn begin_edit(&mut self, date: NoteDate, current: &str) -> EditorResult<()> {
        self.require_idle("edit a note")?;
        self.state = EditorState::Editing {
            date,
            text: current.to_string(),
        };
        Ok(())
    }

    pub fn request_delete(&mut self, date: NoteDate) -> EditorResult<()> {
        self.require_idle("delete a note")?;
        self.state = EditorState::ConfirmingDelete { date };
        Ok(())
    }

    pub fn set_text(&mut self, value: impl Into<String>) -> EditorResult<()> {
        match &mut self.state {
            EditorState::Drafting { text, .. } | EditorState::Editing { text, .. } => {
                *text = value.into();
                Ok(())
            }
            other => Err(EditorError::InvalidTransition {
                state: other.name(),
                action: "change the text",
            }),
        }
    }

    /// Moves the current draft to its confirmation step.
    pub fn request_save(&mut self) -> EditorResult<()> {
        let next = match &self.state {
            EditorState::Drafting { date, text } => EditorState::ConfirmingSave {
                date: *date,
                text: text.clone(),
            },
            EditorState::Editing { date, text } => EditorState::ConfirmingEdit {
                date: *date,
                text: text.clone(),
            },
            other => {
                return Err(EditorError::InvalidTransition {
                    state: other.name(),
                    action: "save",
                })
            }
        };
        self.state = next;
        Ok(())
    }

    /// Steps back one level.
    pub fn cancel(&mut self) {
        let previous = std::mem::take(&mut self.state);
        self.state = match previous {
            EditorState::ConfirmingSave { date, text } => EditorState::Drafting { date, text },
            EditorState::ConfirmingEdit { date, text } => EditorState::Editing { date, text },
            EditorState::Idle
            | EditorState::Drafting { .. }
            | EditorState::Editing { .. }
            | EditorState::ConfirmingDelete { .. } => EditorState::Idle,
        };
    }

    /// Commits the pending confirmation for `email`.
    pub fn confirm(&mut self, store: &mut NoteStore, email: &str) -> EditorResult<EditorOutcome> {
        let pending = std::mem::take(&mut self.state);
        match pending {
            EditorState::ConfirmingSave { date, text } => {
                if store.upsert(email, date, &text) {
                    Ok(EditorOutcome::Saved(date))
                } else {
                    self.state = EditorState::Drafting { date, text };
                    Err(EditorError::EmptyNote)
                }
            }
            EditorState::ConfirmingEdit { date, text } => {
                if store.upsert(email, date, &text) {
                    Ok(EditorOutcome::Saved(date))
                } else {
                    self.state = EditorState::Editing { date, text };
                    Err(EditorError::EmptyNote)
                }
            }
            EditorState::ConfirmingDelete { date } => {
                store.remove(email, date);
                Ok(EditorOutcome::Deleted(date))
            }
            other => {
                let state = other.name();
                self.state = other;
                Err(EditorError::InvalidTransition {
                    state,
                    action: "confirm",
                })
            }
        }
    }

    fn require_idle(&self, action: &'static str) -> EditorResult<()> {
        match self.state {
            EditorState::Idle => Ok(()),
            ref other => Err(EditorError::InvalidTransition {
                state: other.name(),
                action,
            }),
        }
    }
}

//! Per-user diary notes keyed by calendar date.
//!
//! # Responsibility
//! - Read, upsert and delete one user's notes inside the shared `userNotes` slot.
//! - Provide the newest-first diary listing and calendar markers.
//!
//! # Invariants
//! - At most one note per (email, date); an absent key means "no note".
//! - Stored text is trimmed and never empty.
//! - Writes copy the outer map and the touched user map only, then persist
//!   the whole slot through the cell.

use super::USER_NOTES_SLOT;
use crate::cell::PersistentCell;
use crate::model::note_date::NoteDate;
use crate::store::StorageContext;
use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet};

/// Date key (`yyyy-MM-dd`) to note text.
pub type UserNotes = BTreeMap<String, String>;
/// Email to that user's notes.
pub type AllNotes = BTreeMap<String, UserNotes>;

pub struct NoteStore {
    notes: PersistentCell<AllNotes>,
}

impl NoteStore {
    pub fn open(context: &StorageContext) -> Self {
        Self {
            notes: PersistentCell::open(context, USER_NOTES_SLOT, AllNotes::new()),
        }
    }

    /// Returns the user's notes, or an empty map when there are none.
    pub fn list_for_user(&self, email: &str) -> UserNotes {
        self.notes.get().get(email).cloned().unwrap_or_default()
    }

    pub fn get(&self, email: &str, date: NoteDate) -> Option<&str> {
        self.notes
            .get()
            .get(email)
            .and_then(|user_notes| user_notes.get(&date.key()))
            .map(String::as_str)
    }

    /// Stores trimmed `text` for the user and date.
    ///
    /// Returns `false` without touching storage when the trimmed text is empty.
    pub fn upsert(&mut self, email: &str, date: NoteDate, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }

        let key = date.key();
        self.notes.update(|prev| {
            let mut next = prev.clone();
            next.entry(email.to_string())
                .or_default()
                .insert(key, trimmed.to_string());
            next
        });
        info!(
            "event=note_upsert module=notes status=ok chars={}",
            trimmed.chars().count()
        );
        true
    }

    /// Deletes the note for the user and date. Absent notes are a no-op.
    pub fn remove(&mut self, email: &str, date: NoteDate) -> bool {
        let key = date.key();
        let present = self
            .notes
            .get()
            .get(email)
            .is_some_and(|user_notes| user_notes.contains_key(&key));
        if !present {
            return false;
        }

        self.notes.update(|prev| {
            let mut next = prev.clone();
            if let Some(user_notes) = next.get_mut(email) {
                user_notes.remove(&key);
            }
            next
        });
        info!("event=note_remove module=notes status=ok");
        true
    }

    /// Diary listing sorted by date, newest first.
    ///
    /// Keys that are not valid dates are skipped.
    pub fn entries_newest_first(&self, email: &str) -> Vec<(NoteDate, String)> {
        let Some(user_notes) = self.notes.get().get(email) else {
            return Vec::new();
        };

        let mut entries: Vec<(NoteDate, String)> = user_notes
            .iter()
            .filter_map(|(key, text)| match NoteDate::parse(key) {
                Ok(date) => Some((date, text.clone())),
                Err(err) => {
                    warn!("event=note_list module=notes status=skip error={err}");
                    None
                }
            })
            .collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        entries
    }

    /// Dates that carry a note, for calendar markers.
    pub fn note_dates(&self, email: &str) -> BTreeSet<NoteDate> {
        self.notes
            .get()
            .get(email)
            .map(|user_notes| {
                user_notes
                    .keys()
                    .filter_map(|key| NoteDate::parse(key).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn sync_external(&mut self) -> usize {
        self.notes.sync_external()
    }
}

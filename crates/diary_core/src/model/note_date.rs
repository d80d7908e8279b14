//! Calendar date used as a note key.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Storage format of note keys.
pub const NOTE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar day identifying one note slot entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteDate(NaiveDate);

impl NoteDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses a strict `yyyy-MM-dd` key.
    pub fn parse(value: &str) -> Result<Self, NoteDateError> {
        let trimmed = value.trim();
        NaiveDate::parse_from_str(trimmed, NOTE_DATE_FORMAT)
            .map(Self)
            .map_err(|_| NoteDateError(trimmed.to_string()))
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// Key used inside the `userNotes` slot.
    pub fn key(self) -> String {
        self.0.format(NOTE_DATE_FORMAT).to_string()
    }
}

impl From<NaiveDate> for NoteDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl FromStr for NoteDate {
    type Err = NoteDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for NoteDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(NOTE_DATE_FORMAT))
    }
}

/// Input was not a valid `yyyy-MM-dd` date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDateError(pub String);

impl Display for NoteDateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date `{}`; expected YYYY-MM-DD", self.0)
    }
}

impl Error for NoteDateError {}

//! Persisted domain shapes.
//!
//! # Responsibility
//! - Define the JSON shapes stored in the `users`, `currentUser` and
//!   `userNotes` slots.
//! - Provide the validated calendar date used to key notes.
//!
//! # Invariants
//! - Field names match the stored JSON exactly (`email`, `password`).
//! - Note dates always serialize as `yyyy-MM-dd`.

pub mod account;
pub mod note_date;

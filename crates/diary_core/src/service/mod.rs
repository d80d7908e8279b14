//! Use-case services over persistent cells.
//!
//! # Responsibility
//! - Bind each persisted slot to a typed cell with its access contract.
//! - Keep callers (CLI, editor, route guards) decoupled from slot layout.
//!
//! # Invariants
//! - Services receive their `StorageContext` explicitly; no global state.

pub mod auth_service;
pub mod directory;
pub mod note_store;
pub mod session;

/// Slot holding the registered accounts.
pub const USERS_SLOT: &str = "users";
/// Slot holding the logged-in identity.
pub const CURRENT_USER_SLOT: &str = "currentUser";
/// Slot holding every user's notes.
pub const USER_NOTES_SLOT: &str = "userNotes";

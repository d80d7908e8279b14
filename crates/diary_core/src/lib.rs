//! Core logic for the diary: persisted slots, accounts, sessions and notes.
//! Every persisted value flows through `cell::PersistentCell`.

pub mod calendar;
pub mod cell;
pub mod db;
pub mod editor;
pub mod logging;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;

pub use calendar::{month_grid, DayCell, Locale, MonthGrid};
pub use cell::PersistentCell;
pub use editor::{EditorError, EditorOutcome, EditorState, NoteEditor};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{Session, UserAccount};
pub use model::note_date::{NoteDate, NoteDateError};
pub use routes::{guard, landing, Navigation, Route};
pub use service::auth_service::{AuthError, AuthService, DEFAULT_AUTH_LATENCY};
pub use service::directory::UserDirectory;
pub use service::note_store::{AllNotes, NoteStore, UserNotes};
pub use service::session::SessionMarker;
pub use store::{
    MemorySlotStore, SlotStore, SqliteSlotStore, StorageContext, StorageEvent, StoreError,
    StoreResult, Subscription,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

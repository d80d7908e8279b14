use diary_core::{MemorySlotStore, PersistentCell, StorageContext};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Prefs {
    theme: String,
    zoom: u8,
}

fn defaults() -> Prefs {
    Prefs {
        theme: "light".to_string(),
        zoom: 100,
    }
}

fn memory_context() -> StorageContext {
    StorageContext::new(Arc::new(MemorySlotStore::new()))
}

#[test]
fn set_then_get_round_trips_within_one_context() {
    let context = memory_context();
    let mut cell = PersistentCell::open(&context, "prefs", defaults());
    let next = Prefs {
        theme: "dark".to_string(),
        zoom: 120,
    };

    cell.set(next.clone());

    assert_eq!(cell.get(), &next);
    let reopened = PersistentCell::open(&context, "prefs", defaults());
    assert_eq!(reopened.get(), &next);
}

#[test]
fn absent_slot_yields_default() {
    let context = memory_context();
    let cell = PersistentCell::open(&context, "prefs", defaults());
    assert_eq!(cell.get(), &defaults());
    assert_eq!(context.read("prefs").unwrap(), None);
}

#[test]
fn malformed_slot_yields_default_without_failing() {
    let context = memory_context();
    for raw in ["{not json", "\"a string\"", r#"{"theme":1}"#, ""] {
        context.write("prefs", raw).unwrap();
        let cell = PersistentCell::open(&context, "prefs", defaults());
        assert_eq!(cell.get(), &defaults(), "raw value {raw:?}");
    }
}

#[test]
fn failed_write_keeps_previous_value() {
    let context = StorageContext::new(Arc::new(MemorySlotStore::with_quota(24)));
    let mut cell = PersistentCell::open(&context, "note", String::new());

    cell.set("short".to_string());
    assert_eq!(cell.get(), "short");

    cell.set("this text is far too long for the quota".to_string());
    assert_eq!(cell.get(), "short");
    assert_eq!(context.read("note").unwrap().as_deref(), Some("\"short\""));
}

#[test]
fn external_writes_apply_only_after_sync() {
    let first = memory_context();
    let second = first.sibling();
    let mut writer = PersistentCell::open(&first, "counter", 0_u32);
    let mut reader = PersistentCell::open(&second, "counter", 0_u32);

    writer.set(1);
    writer.set(2);
    assert_eq!(*reader.get(), 0);

    assert_eq!(reader.sync_external(), 2);
    assert_eq!(*reader.get(), 2);
    assert_eq!(writer.sync_external(), 0);
}

#[test]
fn external_clear_and_garbage_reset_to_default() {
    let first = memory_context();
    let second = first.sibling();
    let mut writer = PersistentCell::open(&first, "prefs", defaults());
    let mut reader = PersistentCell::open(&second, "prefs", defaults());

    writer.set(Prefs {
        theme: "dark".to_string(),
        zoom: 90,
    });
    reader.sync_external();
    assert_eq!(reader.get().theme, "dark");

    writer.clear();
    reader.sync_external();
    assert_eq!(reader.get(), &defaults());

    first.write("prefs", "][").unwrap();
    reader.sync_external();
    assert_eq!(reader.get(), &defaults());
}

#[test]
fn reload_reads_current_slot_and_drops_pending_events() {
    let first = memory_context();
    let second = first.sibling();
    let mut writer = PersistentCell::open(&first, "counter", 0_u32);
    let mut reader = PersistentCell::open(&second, "counter", 0_u32);

    writer.set(5);
    reader.reload();
    assert_eq!(*reader.get(), 5);
    assert_eq!(reader.sync_external(), 0);
}

#[test]
fn dropping_a_cell_releases_its_subscription() {
    let context = memory_context();
    let cell = PersistentCell::open(&context, "counter", 0_u32);
    assert_eq!(context.hub().subscriber_count(), 1);
    drop(cell);
    assert_eq!(context.hub().subscriber_count(), 0);
}

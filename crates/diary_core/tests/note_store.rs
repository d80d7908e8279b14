use diary_core::{MemorySlotStore, NoteDate, NoteStore, StorageContext};
use std::sync::Arc;

const EMAIL: &str = "a@x.com";

fn memory_context() -> StorageContext {
    StorageContext::new(Arc::new(MemorySlotStore::new()))
}

fn day(value: &str) -> NoteDate {
    NoteDate::parse(value).unwrap()
}

#[test]
fn upsert_stores_trimmed_text() {
    let context = memory_context();
    let mut notes = NoteStore::open(&context);

    assert!(notes.upsert(EMAIL, day("2024-01-05"), "  hello \n"));

    let listed = notes.list_for_user(EMAIL);
    assert_eq!(listed.get("2024-01-05").map(String::as_str), Some("hello"));
    assert_eq!(notes.get(EMAIL, day("2024-01-05")), Some("hello"));
}

#[test]
fn whitespace_only_upsert_keeps_previous_value() {
    let context = memory_context();
    let mut notes = NoteStore::open(&context);
    notes.upsert(EMAIL, day("2024-01-05"), "hello");

    assert!(!notes.upsert(EMAIL, day("2024-01-05"), "  "));
    assert!(!notes.upsert(EMAIL, day("2024-01-06"), "\t\n"));

    let listed = notes.list_for_user(EMAIL);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed["2024-01-05"], "hello");
}

#[test]
fn upsert_overwrites_existing_note() {
    let context = memory_context();
    let mut notes = NoteStore::open(&context);
    notes.upsert(EMAIL, day("2024-01-05"), "first");
    notes.upsert(EMAIL, day("2024-01-05"), "second");

    assert_eq!(notes.list_for_user(EMAIL).len(), 1);
    assert_eq!(notes.get(EMAIL, day("2024-01-05")), Some("second"));
}

#[test]
fn remove_deletes_only_the_given_date() {
    let context = memory_context();
    let mut notes = NoteStore::open(&context);
    notes.upsert(EMAIL, day("2024-01-05"), "hello");
    notes.upsert(EMAIL, day("2024-01-06"), "world");

    assert!(notes.remove(EMAIL, day("2024-01-05")));

    let listed = notes.list_for_user(EMAIL);
    assert!(!listed.contains_key("2024-01-05"));
    assert_eq!(listed["2024-01-06"], "world");
}

#[test]
fn remove_missing_note_is_a_no_op() {
    let context = memory_context();
    let mut notes = NoteStore::open(&context);

    assert!(!notes.remove(EMAIL, day("2024-01-05")));
    assert_eq!(context.read("userNotes").unwrap(), None);

    notes.upsert(EMAIL, day("2024-01-06"), "world");
    assert!(!notes.remove(EMAIL, day("2024-01-05")));
    assert!(!notes.remove("b@x.com", day("2024-01-06")));
    assert_eq!(notes.list_for_user(EMAIL).len(), 1);
}

#[test]
fn notes_are_isolated_per_user() {
    let context = memory_context();
    let mut notes = NoteStore::open(&context);
    notes.upsert("a@x.com", day("2024-01-05"), "mine");
    notes.upsert("b@x.com", day("2024-01-05"), "theirs");

    assert_eq!(notes.get("a@x.com", day("2024-01-05")), Some("mine"));
    assert_eq!(notes.get("b@x.com", day("2024-01-05")), Some("theirs"));
    assert!(notes.list_for_user("c@x.com").is_empty());
    assert_eq!(
        context.read("userNotes").unwrap().as_deref(),
        Some(r#"{"a@x.com":{"2024-01-05":"mine"},"b@x.com":{"2024-01-05":"theirs"}}"#)
    );
}

#[test]
fn entries_are_listed_newest_first_and_skip_bad_keys() {
    let context = memory_context();
    context
        .write(
            "userNotes",
            r#"{"a@x.com":{"2023-12-31":"old","2024-02-01":"new","someday":"??","2024-01-15":"mid"}}"#,
        )
        .unwrap();
    let notes = NoteStore::open(&context);

    let entries = notes.entries_newest_first(EMAIL);
    let keys: Vec<String> = entries.iter().map(|(date, _)| date.key()).collect();
    assert_eq!(keys, vec!["2024-02-01", "2024-01-15", "2023-12-31"]);
    assert_eq!(notes.note_dates(EMAIL).len(), 3);
}

#[test]
fn notes_written_in_one_context_reach_another_after_sync() {
    let first = memory_context();
    let second = first.sibling();
    let mut writer = NoteStore::open(&first);
    let mut reader = NoteStore::open(&second);

    writer.upsert(EMAIL, day("2024-01-05"), "hello");
    assert!(reader.list_for_user(EMAIL).is_empty());

    assert_eq!(reader.sync_external(), 1);
    assert_eq!(reader.get(EMAIL, day("2024-01-05")), Some("hello"));
}

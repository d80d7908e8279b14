use diary_core::{
    guard, AuthError, AuthService, MemorySlotStore, Navigation, Route, Session, SessionMarker,
    StorageContext, UserAccount, UserDirectory,
};
use std::sync::Arc;
use std::time::Duration;

fn memory_context() -> StorageContext {
    StorageContext::new(Arc::new(MemorySlotStore::new()))
}

#[test]
fn register_then_authenticate() {
    let context = memory_context();
    let mut directory = UserDirectory::open(&context);
    assert!(!directory.exists("a@x.com"));

    directory.register("a@x.com", "secret1");

    assert!(directory.exists("a@x.com"));
    assert!(!directory.exists("A@x.com"));
    assert_eq!(
        directory.authenticate("a@x.com", "secret1"),
        Some(UserAccount::new("a@x.com", "secret1"))
    );
    assert_eq!(directory.authenticate("a@x.com", "wrong"), None);
    assert_eq!(directory.authenticate("b@x.com", "secret1"), None);
}

#[test]
fn directory_register_does_not_enforce_uniqueness_itself() {
    let context = memory_context();
    let mut directory = UserDirectory::open(&context);
    directory.register("a@x.com", "secret1");
    directory.register("a@x.com", "secret2");

    assert_eq!(directory.accounts().len(), 2);
    assert!(directory.authenticate("a@x.com", "secret1").is_some());
}

#[test]
fn users_slot_keeps_registration_order() {
    let context = memory_context();
    let mut directory = UserDirectory::open(&context);
    directory.register("a@x.com", "secret1");
    directory.register("b@x.com", "secret2");

    assert_eq!(
        context.read("users").unwrap().as_deref(),
        Some(r#"[{"email":"a@x.com","password":"secret1"},{"email":"b@x.com","password":"secret2"}]"#)
    );
}

#[test]
fn session_marker_login_and_logout() {
    let context = memory_context();
    let mut marker = SessionMarker::open(&context);
    assert_eq!(marker.current(), None);

    marker.login("a@x.com");
    assert_eq!(marker.current(), Some(&Session::new("a@x.com")));
    assert_eq!(
        context.read("currentUser").unwrap().as_deref(),
        Some(r#"{"email":"a@x.com"}"#)
    );

    marker.logout();
    assert!(!marker.is_logged_in());
    assert_eq!(context.read("currentUser").unwrap(), None);
}

#[test]
fn register_logs_in_and_unlocks_home_until_logout() {
    let context = memory_context();
    let mut auth = AuthService::open(&context, Duration::ZERO);

    let session = auth.register("a@x.com", "secret1").unwrap();
    assert_eq!(session, Session::new("a@x.com"));
    assert_eq!(guard(Route::Home, auth.current()), Navigation::Render(Route::Home));

    auth.logout();
    assert_eq!(
        guard(Route::Home, auth.current()),
        Navigation::Redirect(Route::Login)
    );

    // A freshly opened context sees the cleared marker too.
    let reopened = SessionMarker::open(&context.sibling());
    assert_eq!(reopened.current(), None);
}

#[test]
fn register_validation_errors_leave_storage_untouched() {
    let context = memory_context();
    let mut auth = AuthService::open(&context, Duration::ZERO);

    assert_eq!(auth.register("", "secret1"), Err(AuthError::EmptyFields));
    assert_eq!(auth.register("a@x.com", ""), Err(AuthError::EmptyFields));
    assert_eq!(
        auth.register("not-an-email", "secret1"),
        Err(AuthError::InvalidEmail("not-an-email".to_string()))
    );
    assert_eq!(
        auth.register("a@x.com", "12345"),
        Err(AuthError::PasswordTooShort { min_chars: 6 })
    );

    assert_eq!(context.read("users").unwrap(), None);
    assert_eq!(context.read("currentUser").unwrap(), None);
}

#[test]
fn register_rejects_email_registered_by_another_context() {
    let first = memory_context();
    let second = first.sibling();
    let mut auth_first = AuthService::open(&first, Duration::ZERO);
    let mut auth_second = AuthService::open(&second, Duration::ZERO);

    auth_first.register("a@x.com", "secret1").unwrap();

    assert_eq!(
        auth_second.register("a@x.com", "other12"),
        Err(AuthError::EmailTaken("a@x.com".to_string()))
    );
    assert_eq!(auth_second.directory().accounts().len(), 1);
}

#[test]
fn login_checks_plaintext_credentials() {
    let context = memory_context();
    let mut registrar = AuthService::open(&context, Duration::ZERO);
    registrar.register("a@x.com", "secret1").unwrap();
    registrar.logout();

    let mut auth = AuthService::open(&context, Duration::ZERO);
    assert_eq!(auth.login("a@x.com", ""), Err(AuthError::EmptyFields));
    assert_eq!(
        auth.login("a@x.com", "secret2"),
        Err(AuthError::InvalidCredentials)
    );
    assert_eq!(
        auth.login("nobody@x.com", "secret1"),
        Err(AuthError::InvalidCredentials)
    );
    assert!(auth.current().is_none());

    let session = auth.login("a@x.com", "secret1").unwrap();
    assert_eq!(session.email, "a@x.com");
    assert_eq!(auth.current(), Some(&session));
}

#[test]
fn login_in_one_context_reaches_another_after_sync() {
    let first = memory_context();
    let second = first.sibling();
    let mut auth = AuthService::open(&first, Duration::ZERO);
    let mut watcher = SessionMarker::open(&second);

    auth.register("a@x.com", "secret1").unwrap();
    assert!(watcher.current().is_none());

    watcher.sync_external();
    assert_eq!(watcher.current(), Some(&Session::new("a@x.com")));

    auth.logout();
    watcher.sync_external();
    assert!(watcher.current().is_none());
}

#[test]
fn login_waits_for_configured_latency() {
    let context = memory_context();
    let mut auth = AuthService::open(&context, Duration::from_millis(20));
    auth.register("a@x.com", "secret1").unwrap();

    let started = std::time::Instant::now();
    let _ = auth.login("a@x.com", "wrong");
    assert!(started.elapsed() >= Duration::from_millis(20));
}

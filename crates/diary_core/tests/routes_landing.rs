use diary_core::routes::FIRST_LOAD_SLOT;
use diary_core::{
    landing, AuthService, MemorySlotStore, Navigation, Route, Session, StorageContext,
};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn first_landing_goes_to_register_once() {
    let context = StorageContext::new(Arc::new(MemorySlotStore::new()));

    assert_eq!(landing(&context, None), Navigation::Redirect(Route::Register));
    assert_eq!(context.read(FIRST_LOAD_SLOT).unwrap().as_deref(), Some("false"));

    assert_eq!(landing(&context, None), Navigation::Redirect(Route::Login));
    let session = Session::new("a@x.com");
    assert_eq!(landing(&context, Some(&session)), Navigation::Render(Route::Home));
}

#[test]
fn registration_scenario_reaches_home() {
    let context = StorageContext::new(Arc::new(MemorySlotStore::new()));
    assert_eq!(landing(&context, None).target(), Route::Register);

    let mut auth = AuthService::open(&context, Duration::ZERO);
    auth.register("a@x.com", "secret1").unwrap();

    assert_eq!(
        landing(&context, auth.current()),
        Navigation::Render(Route::Home)
    );
    assert_eq!(
        diary_core::guard(Route::parse("/about").unwrap(), auth.current()),
        Navigation::Render(Route::About)
    );
}

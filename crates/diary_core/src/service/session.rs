//! Logged-in identity marker.

use super::CURRENT_USER_SLOT;
use crate::cell::PersistentCell;
use crate::model::account::Session;
use crate::store::StorageContext;
use log::info;

pub struct SessionMarker {
    current: PersistentCell<Option<Session>>,
}

impl SessionMarker {
    pub fn open(context: &StorageContext) -> Self {
        Self {
            current: PersistentCell::open(context, CURRENT_USER_SLOT, None),
        }
    }

    pub fn login(&mut self, email: &str) {
        self.current.set(Some(Session::new(email)));
        info!("event=session_login module=session status=ok");
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.get().as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current().is_some()
    }

    /// Removes the stored identity so guarded routes redirect again.
    pub fn logout(&mut self) {
        self.current.clear();
        info!("event=session_logout module=session status=ok");
    }

    pub fn sync_external(&mut self) -> usize {
        self.current.sync_external()
    }
}

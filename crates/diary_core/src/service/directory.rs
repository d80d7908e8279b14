//! Registered account directory.
//!
//! # Invariants
//! - Email comparison is exact and case-sensitive.
//! - `register` appends without checking uniqueness; callers check `exists`
//!   first (see `AuthService::register`).

use super::USERS_SLOT;
use crate::cell::PersistentCell;
use crate::model::account::UserAccount;
use crate::store::StorageContext;
use log::info;

pub struct UserDirectory {
    users: PersistentCell<Vec<UserAccount>>,
}

impl UserDirectory {
    pub fn open(context: &StorageContext) -> Self {
        Self {
            users: PersistentCell::open(context, USERS_SLOT, Vec::new()),
        }
    }

    pub fn accounts(&self) -> &[UserAccount] {
        self.users.get()
    }

    pub fn exists(&self, email: &str) -> bool {
        self.users.get().iter().any(|account| account.email == email)
    }

    /// Appends one account to the directory.
    pub fn register(&mut self, email: &str, password: &str) {
        let account = UserAccount::new(email, password);
        self.users.update(|prev| {
            let mut next = prev.clone();
            next.push(account);
            next
        });
        info!(
            "event=user_register module=directory status=ok accounts={}",
            self.users.get().len()
        );
    }

    /// Returns the account whose email and password both match exactly.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<UserAccount> {
        self.users
            .get()
            .iter()
            .find(|account| account.email == email && account.password == password)
            .cloned()
    }

    /// Re-reads the stored account list.
    pub fn reload(&mut self) {
        self.users.reload();
    }

    pub fn sync_external(&mut self) -> usize {
        self.users.sync_external()
    }
}

//! Login and registration flows.
//!
//! # Responsibility
//! - Validate credentials input before touching storage.
//! - Register accounts and set the session marker on success.
//!
//! # Invariants
//! - Validation failures mutate no slot.
//! - A successful `register` also logs the new user in.
//! - The artificial latency runs once per attempt that passes the
//!   synchronous checks; it is never retried or cancelled.

use super::directory::UserDirectory;
use super::session::SessionMarker;
use crate::model::account::Session;
use crate::store::StorageContext;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;
/// Artificial latency used by the interactive flows.
pub const DEFAULT_AUTH_LATENCY: Duration = Duration::from_millis(1000);

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// User-visible validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    EmptyFields,
    InvalidEmail(String),
    PasswordTooShort { min_chars: usize },
    EmailTaken(String),
    InvalidCredentials,
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFields => write!(f, "please fill in all fields"),
            Self::InvalidEmail(email) => write!(f, "`{email}` is not a valid email address"),
            Self::PasswordTooShort { min_chars } => {
                write!(f, "password must be at least {min_chars} characters long")
            }
            Self::EmailTaken(email) => write!(f, "email `{email}` is already registered"),
            Self::InvalidCredentials => write!(f, "wrong email or password"),
        }
    }
}

impl Error for AuthError {}

pub type AuthResult<T> = Result<T, AuthError>;

pub struct AuthService {
    directory: UserDirectory,
    session: SessionMarker,
    latency: Duration,
}

impl AuthService {
    pub fn open(context: &StorageContext, latency: Duration) -> Self {
        Self {
            directory: UserDirectory::open(context),
            session: SessionMarker::open(context),
            latency,
        }
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn session(&self) -> &SessionMarker {
        &self.session
    }

    pub fn current(&self) -> Option<&Session> {
        self.session.current()
    }

    /// Creates an account and logs it in.
    pub fn register(&mut self, email: &str, password: &str) -> AuthResult<Session> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::EmptyFields);
        }
        if !EMAIL_RE.is_match(email) {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthError::PasswordTooShort {
                min_chars: MIN_PASSWORD_CHARS,
            });
        }

        // Pick up accounts registered by other contexts since this one opened.
        self.directory.reload();
        if self.directory.exists(email) {
            warn!("event=auth_register module=auth status=rejected reason=email_taken");
            return Err(AuthError::EmailTaken(email.to_string()));
        }

        self.simulate_latency();
        self.directory.register(email, password);
        self.session.login(email);
        info!("event=auth_register module=auth status=ok");
        Ok(Session::new(email))
    }

    /// Checks plaintext credentials and sets the session on success.
    pub fn login(&mut self, email: &str, password: &str) -> AuthResult<Session> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::EmptyFields);
        }

        self.simulate_latency();
        self.directory.reload();
        let Some(account) = self.directory.authenticate(email, password) else {
            warn!("event=auth_login module=auth status=rejected reason=invalid_credentials");
            return Err(AuthError::InvalidCredentials);
        };

        self.session.login(&account.email);
        info!("event=auth_login module=auth status=ok");
        Ok(Session::new(account.email))
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// Applies account and session changes made by other contexts.
    pub fn sync_external(&mut self) -> usize {
        self.directory.sync_external() + self.session.sync_external()
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
    }
}

//! Navigable routes and session guards.
//!
//! # Invariants
//! - `/` and `/about` render only with a session; otherwise they redirect
//!   to `/login`.
//! - The first landing of a fresh store goes to `/register`, once.

use crate::model::account::Session;
use crate::store::StorageContext;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Plain-string slot marking whether the app was opened before.
pub const FIRST_LOAD_SLOT: &str = "isFirstLoad";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    About,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::Login, Route::Register, Route::About];

    pub fn parse(path: &str) -> Result<Self, UnknownRoute> {
        let normalized = path.trim();
        let normalized = match normalized.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        match normalized {
            "/" => Ok(Self::Home),
            "/login" => Ok(Self::Login),
            "/register" => Ok(Self::Register),
            "/about" => Ok(Self::About),
            _ => Err(UnknownRoute(path.to_string())),
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::About => "/about",
        }
    }

    pub fn requires_session(self) -> bool {
        matches!(self, Self::Home | Self::About)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoute(pub String);

impl Display for UnknownRoute {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown route `{}`", self.0)
    }
}

impl Error for UnknownRoute {}

/// Outcome of navigating to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

impl Navigation {
    /// Route that ends up on screen.
    pub fn target(self) -> Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }
}

/// Applies the session guard to `route`.
pub fn guard(route: Route, session: Option<&Session>) -> Navigation {
    if route.requires_session() && session.is_none() {
        Navigation::Redirect(Route::Login)
    } else {
        Navigation::Render(route)
    }
}

/// Resolves where the app opens.
///
/// The first call on a fresh store lands on `/register` and records that the
/// app has been opened; later calls land on the guarded home route.
pub fn landing(context: &StorageContext, session: Option<&Session>) -> Navigation {
    let first_load = match context.read(FIRST_LOAD_SLOT) {
        Ok(value) => value.as_deref().unwrap_or("true") == "true",
        Err(err) => {
            warn!("event=route_landing module=routes status=error error={err}");
            false
        }
    };

    if first_load {
        if let Err(err) = context.write(FIRST_LOAD_SLOT, "false") {
            warn!("event=route_landing module=routes status=error error={err}");
        }
        return Navigation::Redirect(Route::Register);
    }

    guard(Route::Home, session)
}

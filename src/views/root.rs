use futures_util::future::join;

use super::PublicSite;
use crate::client::CatalogClient;
use crate::log_err;
use crate::models::Session;

/// Visiting this path opens the admin login.
pub const ADMIN_PATH: &str = "/admin";
pub const ROOT_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    AdminLogin,
    Dashboard,
    PublicSite,
}

/// Location change requested by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    /// Swap the current location without a new history entry.
    Replace(&'static str),
}

/// Decides which screen a visitor sees.
///
/// This is presentation gating only; the store enforces its own access
/// policies on writes.
#[derive(Debug, Default)]
pub struct RootController {
    show_admin_login: bool,
    authenticated: bool,
    session: Option<Session>,
    session_unknown: bool,
    site: PublicSite,
}

/// `None` when the service could not answer; `Some(None)` is a definite
/// "signed out".
async fn check_session(client: &dyn CatalogClient) -> Option<Option<Session>> {
    match client.get_session().await {
        Ok(session) => Some(session),
        Err(e) => {
            log_err!("checking session", e);
            None
        }
    }
}

impl RootController {
    /// Restores a pending admin-login request carried over a redirect.
    pub fn new(show_admin_login: bool) -> Self {
        Self {
            show_admin_login,
            ..Default::default()
        }
    }

    pub fn route(&mut self, path: &str) -> Navigation {
        if path == ADMIN_PATH {
            self.show_admin_login = true;
            Navigation::Replace(ROOT_PATH)
        } else {
            Navigation::Stay
        }
    }

    /// Routes on `path`, then checks the session and loads the catalog
    /// concurrently.
    pub async fn mount(&mut self, client: &dyn CatalogClient, path: &str) -> Navigation {
        let navigation = self.route(path);

        let (checked, ()) = join(check_session(client), self.site.load(client)).await;
        self.session_unknown = checked.is_none();
        self.session = checked.flatten();
        self.authenticated = self.session.is_some();

        navigation
    }

    pub fn screen(&self) -> Screen {
        if self.show_admin_login {
            Screen::AdminLogin
        } else if self.authenticated {
            Screen::Dashboard
        } else {
            Screen::PublicSite
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Session found by the last check, possibly refreshed.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The last session check failed, so [`RootController::session`] says
    /// nothing about whether the visitor is still signed in.
    pub fn session_unknown(&self) -> bool {
        self.session_unknown
    }

    pub fn on_login_success(&mut self) {
        self.show_admin_login = false;
        self.authenticated = true;
    }

    pub fn on_logout(&mut self) {
        self.authenticated = false;
        self.session = None;
    }

    pub fn site(&self) -> &PublicSite {
        &self.site
    }

    pub fn site_mut(&mut self) -> &mut PublicSite {
        &mut self.site
    }
}

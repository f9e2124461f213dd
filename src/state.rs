use crate::session::Session;
use crate::store::TransactionStore;

/// The views a user can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    AvatarSetup,
    Dashboard,
}

impl Route {
    /// Where the app lands when no view is asked for.
    pub fn root() -> Self {
        Route::Dashboard
    }

    pub fn requires_session(self) -> bool {
        matches!(self, Route::AvatarSetup | Route::Dashboard)
    }
}

/// Everything the app knows, created once at startup and handed to each
/// screen. Lives for the whole process; nothing is written to disk.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: Session,
    pub store: TransactionStore,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The route actually shown for `requested`: views behind sign-in fall
    /// back to Login while nobody is signed in.
    pub fn resolve(&self, requested: Route) -> Route {
        if requested.requires_session() && !self.session.is_authenticated() {
            tracing::debug!(?requested, "redirecting to login");
            Route::Login
        } else {
            requested
        }
    }
}

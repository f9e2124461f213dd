use crate::models::User;

/// Id given to every signed-in user; there is no backend to assign real ones.
pub const DEFAULT_USER_ID: &str = "1";

/// Name given to users who sign in rather than register.
pub const PLACEHOLDER_NAME: &str = "User";

/// Who is signed in, if anyone.
///
/// Sign-in is mocked: `login` and `register` always succeed and passwords are
/// neither checked nor kept. Nothing here is a security boundary.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, email: &str, _password: &str) -> &User {
        tracing::info!(email, "logged in");
        self.user.insert(User {
            id: DEFAULT_USER_ID.to_string(),
            email: email.to_string(),
            name: PLACEHOLDER_NAME.to_string(),
            avatar: None,
        })
    }

    pub fn register(&mut self, email: &str, _password: &str, name: &str) -> &User {
        tracing::info!(email, name, "registered");
        self.user.insert(User {
            id: DEFAULT_USER_ID.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            avatar: None,
        })
    }

    pub fn logout(&mut self) {
        if self.user.take().is_some() {
            tracing::info!("logged out");
        }
    }

    /// Replace the avatar of the current user. Does nothing when signed out.
    pub fn set_avatar(&mut self, avatar: &str) {
        match self.user.as_mut() {
            Some(user) => {
                user.avatar = Some(avatar.to_string());
                tracing::debug!(avatar, "avatar set");
            }
            None => tracing::debug!("avatar ignored: no session"),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

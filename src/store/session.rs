use crate::api::AuthSession;
use crate::api::token::TokenStore;
use crate::core::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// A token is on disk and the profile fetch is in flight.
    Restoring,
    SignedOut,
    SignedIn,
}

/// Who is signed in, if anyone. Pure state; the token file moves in and
/// out through the `TokenStore` handed to each transition.
pub struct Session {
    user: Option<User>,
    state: SessionState,
}

impl Session {
    pub fn restoring() -> Self {
        Self {
            user: None,
            state: SessionState::Restoring,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            state: SessionState::SignedOut,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// A fresh login or signup succeeded: persist the token and sign the
    /// user in. Returns the user for the welcome notice.
    pub fn establish(&mut self, auth: AuthSession, tokens: &TokenStore) -> User {
        if let Err(e) = tokens.store(&auth.token) {
            log::error!("Failed to persist session token: {}", e);
        }
        self.user = Some(auth.user.clone());
        self.state = SessionState::SignedIn;
        auth.user
    }

    /// The startup profile fetch came back for the persisted token.
    pub fn resume(&mut self, user: User) {
        self.user = Some(user);
        self.state = SessionState::SignedIn;
    }

    /// The persisted token did not resolve to a profile; drop it and
    /// fall back to the sign-in screen.
    pub fn restore_failed(&mut self, tokens: &TokenStore) {
        tokens.clear();
        self.user = None;
        self.state = SessionState::SignedOut;
    }

    /// Sign out locally. Returns the departing user's name for the
    /// goodbye notice.
    pub fn sign_out(&mut self, tokens: &TokenStore) -> String {
        tokens.clear();
        let name = self
            .user
            .take()
            .map(|u| u.name)
            .unwrap_or_else(|| "User".to_string());
        self.state = SessionState::SignedOut;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_tokens() -> TokenStore {
        let dir = std::env::temp_dir().join(format!("quill-session-test-{}", uuid::Uuid::new_v4()));
        TokenStore::new(dir.join("session.token"))
    }

    fn auth() -> AuthSession {
        AuthSession {
            token: "T".to_string(),
            user: User {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
        }
    }

    #[test]
    fn establish_persists_token_and_signs_in() {
        let tokens = temp_tokens();
        let mut session = Session::signed_out();

        let user = session.establish(auth(), &tokens);
        assert_eq!(user.name, "Ada");
        assert_eq!(session.state(), SessionState::SignedIn);
        assert_eq!(session.user().unwrap().email, "ada@example.com");
        assert_eq!(tokens.load().as_deref(), Some("T"));
    }

    #[test]
    fn sign_out_clears_token_and_user() {
        let tokens = temp_tokens();
        let mut session = Session::signed_out();
        session.establish(auth(), &tokens);

        let name = session.sign_out(&tokens);
        assert_eq!(name, "Ada");
        assert_eq!(session.state(), SessionState::SignedOut);
        assert!(session.user().is_none());
        assert!(tokens.load().is_none());
    }

    #[test]
    fn failed_restore_drops_the_stale_token() {
        let tokens = temp_tokens();
        tokens.store("stale").unwrap();
        let mut session = Session::restoring();

        session.restore_failed(&tokens);
        assert_eq!(session.state(), SessionState::SignedOut);
        assert!(tokens.load().is_none());
    }

    #[test]
    fn resume_signs_in_without_touching_the_token() {
        let tokens = temp_tokens();
        tokens.store("T").unwrap();
        let mut session = Session::restoring();

        session.resume(User {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        });
        assert_eq!(session.state(), SessionState::SignedIn);
        assert_eq!(tokens.load().as_deref(), Some("T"));
    }
}

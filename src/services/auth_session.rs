use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use crate::enums::auth_state::AuthState;
use crate::errors::{PortalError, PortalResult};
use crate::services::session_expiry::{SessionExpiryBroadcaster, Subscription};
use crate::structs::credentials::Credentials;
use crate::structs::user::User;
use crate::traits::portal_api::PortalApi;
use crate::traits::token_store::TokenStore;

/// Owns the current-user state and the login, logout and bootstrap flows.
pub struct AuthSessionController {
    api: Arc<dyn PortalApi>,
    token_store: Arc<dyn TokenStore>,
    state: AuthState,
    expired: Arc<AtomicBool>,
    expiry_notice: bool,
}

impl AuthSessionController {
    pub fn new(api: Arc<dyn PortalApi>, token_store: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            token_store,
            state: AuthState::Unknown,
            expired: Arc::new(AtomicBool::new(false)),
            expiry_notice: false,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.user()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated(_))
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(User::is_admin)
    }

    /// Restores a session from stored tokens. Any failure clears the tokens.
    pub async fn bootstrap(&mut self) -> &AuthState {
        if self.token_store.tokens().is_none() {
            log::debug!("No stored session");
            self.state = AuthState::Unauthenticated;
            return &self.state;
        }

        match self.api.current_user().await {
            Ok(user) => {
                log::debug!("Session restored for {}", user.username);
                self.state = AuthState::Authenticated(user);
            }
            Err(e) => {
                log::debug!("Stored session rejected: {}", e);
                self.clear_tokens();
                self.state = AuthState::Unauthenticated;
            }
        }
        &self.state
    }

    pub async fn login(&mut self, credentials: &Credentials) -> PortalResult<User> {
        let tokens = match self.api.login(credentials).await {
            Ok(tokens) => tokens,
            Err(e) => {
                self.state = AuthState::Unauthenticated;
                log::debug!("Login failed: {}", e.technical_details());
                return Err(match e {
                    PortalError::Api { status, .. } if (400..500).contains(&status) => PortalError::LoginFailed,
                    PortalError::Parse { .. } => PortalError::LoginFailed,
                    other => other,
                });
            }
        };

        if let Err(e) = self.token_store.store_tokens(&tokens) {
            // Never keep half a token pair.
            self.clear_tokens();
            self.state = AuthState::Unauthenticated;
            return Err(e);
        }

        match self.api.current_user().await {
            Ok(user) => {
                log::info!("🔓 Logged in as {}", user.username);
                self.expired.store(false, Ordering::SeqCst);
                self.expiry_notice = false;
                self.state = AuthState::Authenticated(user.clone());
                Ok(user)
            }
            Err(e) => {
                self.clear_tokens();
                self.state = AuthState::Unauthenticated;
                Err(e)
            }
        }
    }

    /// Client-side only; no network call.
    pub fn logout(&mut self) {
        self.clear_tokens();
        self.state = AuthState::Unauthenticated;
        log::debug!("Logged out");
    }

    /// Forced logout after a 401, leaving a notice for the front-end.
    pub fn handle_session_expired(&mut self) {
        self.logout();
        self.expiry_notice = true;
    }

    /// Subscribes this controller to gateway 401s. Call [`Self::sync_expiry`]
    /// after each await point to apply the forced logout.
    pub fn watch(&self, broadcaster: &SessionExpiryBroadcaster) -> Subscription {
        let expired = Arc::clone(&self.expired);
        broadcaster.subscribe(move |_| {
            expired.store(true, Ordering::SeqCst);
        })
    }

    /// Applies a pending expiry signal. Returns `true` if one was applied.
    pub fn sync_expiry(&mut self) -> bool {
        if self.expired.swap(false, Ordering::SeqCst) {
            self.handle_session_expired();
            return true;
        }
        false
    }

    /// Returns and clears the "session expired" notice.
    pub fn take_expiry_notice(&mut self) -> bool {
        std::mem::take(&mut self.expiry_notice)
    }

    fn clear_tokens(&self) {
        if let Err(e) = self.token_store.clear() {
            log::warn!("⚠️ Could not clear stored tokens: {}", e);
        }
    }
}

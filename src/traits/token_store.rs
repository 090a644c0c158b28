use crate::config::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::errors::PortalResult;
use crate::structs::token_pair::TokenPair;

/// Durable key/value storage for the access and refresh tokens.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> PortalResult<()>;

    fn remove(&self, key: &str) -> PortalResult<()>;

    /// Both tokens, or `None` if either is missing.
    fn tokens(&self) -> Option<TokenPair> {
        let access_token = self.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())?;
        let refresh_token = self.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())?;
        Some(TokenPair { access_token, refresh_token })
    }

    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    fn store_tokens(&self, tokens: &TokenPair) -> PortalResult<()> {
        self.set(ACCESS_TOKEN_KEY, &tokens.access_token)?;
        self.set(REFRESH_TOKEN_KEY, &tokens.refresh_token)
    }

    fn clear(&self) -> PortalResult<()> {
        self.remove(ACCESS_TOKEN_KEY)?;
        self.remove(REFRESH_TOKEN_KEY)
    }
}

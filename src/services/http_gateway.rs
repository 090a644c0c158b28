use std::sync::Arc;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;
use crate::config::constants::{timeout_duration, REQUEST_ID_HEADER};
use crate::errors::{PortalError, PortalResult};
use crate::services::session_expiry::SessionExpiryBroadcaster;
use crate::structs::api_response::{ApiReply, ErrorBody, ListEnvelope};
use crate::structs::config::api_config::ApiConfig;
use crate::structs::session_expired_event::SessionExpiredEvent;
use crate::traits::token_store::TokenStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    /// Bearer token attached; 401 means the session expired.
    Bearer,
    /// The login call itself; 401 means bad credentials.
    Login,
}

/// Thin wrapper over `reqwest` that attaches the bearer token and turns
/// every response into either a parsed body or a [`PortalError`].
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    token_store: Arc<dyn TokenStore>,
    broadcaster: SessionExpiryBroadcaster,
}

impl HttpGateway {
    pub fn new(
        config: &ApiConfig,
        token_store: Arc<dyn TokenStore>,
        broadcaster: SessionExpiryBroadcaster,
    ) -> PortalResult<Self> {
        let client = Client::builder()
            .timeout(timeout_duration(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PortalError::config_error(&format!("cannot build HTTP client: {}", e), None))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_store,
            broadcaster,
        })
    }

    pub fn broadcaster(&self) -> &SessionExpiryBroadcaster {
        &self.broadcaster
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.token_store
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> PortalResult<T> {
        let (_, text) = self.send(Method::GET, path, None, AuthMode::Bearer).await?;
        parse_body(path, &text)
    }

    /// GET a list endpoint, accepting both a bare array and a `data` envelope.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> PortalResult<Vec<T>> {
        let envelope: ListEnvelope<T> = self.get(path).await?;
        Ok(envelope.into_vec())
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> PortalResult<ApiReply<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let (status, text) = self.send(Method::POST, path, Some(body), AuthMode::Bearer).await?;
        Ok(ApiReply {
            status,
            body: parse_body(path, &text)?,
        })
    }

    /// POST where only the status matters; the response body is ignored.
    pub async fn post_empty<B>(&self, path: &str, body: &B) -> PortalResult<u16>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        let (status, _) = self.send(Method::POST, path, Some(body), AuthMode::Bearer).await?;
        Ok(status)
    }

    /// Unauthenticated POST used for login. A 401 here never broadcasts.
    pub async fn post_login<B, T>(&self, path: &str, body: &B) -> PortalResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let (_, text) = self.send(Method::POST, path, Some(body), AuthMode::Login).await?;
        parse_body(path, &text)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        auth: AuthMode,
    ) -> PortalResult<(u16, String)> {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::new_v4().to_string();
        let operation = format!("{} {}", method, path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(REQUEST_ID_HEADER, &request_id);

        if auth == AuthMode::Bearer {
            let token = self
                .token_store
                .access_token()
                .ok_or_else(|| PortalError::auth("no access token stored"))?;
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        log::debug!("➡️  {} [{}]", operation, request_id);
        let response = request
            .send()
            .await
            .map_err(|e| PortalError::network(&operation, Some(&url), &e.to_string()))?;

        let status = response.status();
        log::debug!("⬅️  {} -> {} [{}]", operation, status.as_u16(), request_id);

        // A 401 is decided on status alone; its body is never read.
        if status == StatusCode::UNAUTHORIZED {
            return Err(self.unauthorized(auth, &method, path, request_id, operation));
        }

        let text = response
            .text()
            .await
            .map_err(|e| PortalError::network(&operation, Some(&url), &e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(ErrorBody::into_message)
                .unwrap_or_default();
            return Err(PortalError::api(&operation, status.as_u16(), &message));
        }

        Ok((status.as_u16(), text))
    }

    fn unauthorized(
        &self,
        auth: AuthMode,
        method: &Method,
        path: &str,
        request_id: String,
        operation: String,
    ) -> PortalError {
        match auth {
            AuthMode::Login => PortalError::LoginFailed,
            AuthMode::Bearer => {
                self.broadcaster.publish(&SessionExpiredEvent {
                    method: method.to_string(),
                    path: path.to_string(),
                    request_id,
                });
                PortalError::SessionExpired { operation }
            }
        }
    }
}

fn parse_body<T: DeserializeOwned>(path: &str, text: &str) -> PortalResult<T> {
    serde_json::from_str(text).map_err(|e| PortalError::Parse {
        content_type: format!("JSON from {}", path),
        reason: e.to_string(),
    })
}

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use gpulab_portal::services::http_gateway::HttpGateway;
use gpulab_portal::services::portal_client::PortalClient;
use gpulab_portal::services::session_expiry::{SessionExpiryBroadcaster, Subscription};
use gpulab_portal::services::token_store::MemoryTokenStore;
use gpulab_portal::structs::config::api_config::ApiConfig;
use gpulab_portal::structs::token_pair::TokenPair;
use gpulab_portal::traits::token_store::TokenStore;

pub const ACCESS_TOKEN: &str = "access-abc";

pub fn tokens() -> TokenPair {
    TokenPair {
        access_token: ACCESS_TOKEN.to_string(),
        refresh_token: "refresh-xyz".to_string(),
    }
}

pub struct Harness {
    pub client: PortalClient,
    pub store: Arc<MemoryTokenStore>,
    pub broadcaster: SessionExpiryBroadcaster,
}

impl Harness {
    pub fn new(base_url: String, logged_in: bool) -> Self {
        let store = Arc::new(if logged_in {
            MemoryTokenStore::with_tokens(&tokens())
        } else {
            MemoryTokenStore::new()
        });
        let broadcaster = SessionExpiryBroadcaster::new();
        let config = ApiConfig {
            base_url,
            timeout_secs: 5,
            ..ApiConfig::default()
        };
        let token_store: Arc<dyn TokenStore> = store.clone();
        let gateway = HttpGateway::new(&config, token_store, broadcaster.clone()).unwrap();

        Self {
            client: PortalClient::new(gateway),
            store,
            broadcaster,
        }
    }

    /// Counts session-expired events seen by a listener.
    pub fn count_expiries(&self) -> (Arc<AtomicUsize>, Subscription) {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let subscription = self.broadcaster.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (seen, subscription)
    }
}

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use crate::config::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::errors::{PortalError, PortalResult};
use crate::structs::token_pair::TokenPair;
use crate::traits::token_store::TokenStore;

/// Tokens kept in a small JSON object on disk so they survive restarts.
pub struct FileTokenStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileTokenStore {
    pub fn open(path: &Path) -> PortalResult<Self> {
        let entries = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| PortalError::storage(&path.display().to_string(), &e.to_string()))?;
            match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("⚠️ Ignoring unreadable token file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> PortalResult<()> {
        let path_display = self.path.display().to_string();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| PortalError::storage(&path_display, &e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content).map_err(|e| PortalError::storage(&path_display, &e.to_string()))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> PortalResult<()> {
        let mut entries = self.lock();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> PortalResult<()> {
        let mut entries = self.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: &TokenPair) -> Self {
        let store = Self::new();
        {
            let mut entries = store.lock();
            entries.insert(ACCESS_TOKEN_KEY.to_string(), tokens.access_token.clone());
            entries.insert(REFRESH_TOKEN_KEY.to_string(), tokens.refresh_token.clone());
        }
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> PortalResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PortalResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn pair() -> TokenPair {
        TokenPair {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
        }
    }

    #[test]
    fn tokens_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tokens.json");

        let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(&path).unwrap());
        store.store_tokens(&pair()).unwrap();

        let reopened: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(&path).unwrap());
        assert_eq!(reopened.tokens(), Some(pair()));

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get("accessToken").map(String::as_str), Some("access-1"));
        assert_eq!(raw.get("refreshToken").map(String::as_str), Some("refresh-1"));
    }

    #[test]
    fn clear_removes_both_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(&path).unwrap());
        store.store_tokens(&pair()).unwrap();
        store.clear().unwrap();

        let reopened: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(&path).unwrap());
        assert!(reopened.tokens().is_none());
        assert!(reopened.access_token().is_none());
    }

    #[test]
    fn half_a_pair_is_not_a_session() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        store.set(ACCESS_TOKEN_KEY, "only-access").unwrap();
        assert!(store.tokens().is_none());
        assert_eq!(store.access_token().as_deref(), Some("only-access"));
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        fs::write(&path, "{not json").unwrap();
        let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(&path).unwrap());
        assert!(store.tokens().is_none());
    }
}

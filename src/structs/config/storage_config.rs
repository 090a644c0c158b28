use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StorageConfig {
    /// Token file location; defaults to `~/gpulab/tokens.json`.
    #[serde(default)]
    pub token_file: Option<String>,
}

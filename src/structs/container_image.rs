use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerImage {
    pub image_id: i64,
    pub image_name: String,
    #[serde(default)]
    pub image_version: Option<String>,
    #[serde(default)]
    pub cuda_version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ContainerImage {
    pub fn display_name(&self) -> String {
        match &self.image_version {
            Some(version) => format!("{}:{}", self.image_name, version),
            None => self.image_name.clone(),
        }
    }
}

use serde::{Deserialize, Serialize};

/// List endpoints answer either with a bare array or with `{ "data": [...] }`.
#[derive(Serialize, Deserialize, Debug)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) => items,
            Self::Wrapped { data } => data,
        }
    }
}

/// A successful reply with its status code kept, for endpoints where
/// 200 and 201 mean different things.
#[derive(Debug)]
pub struct ApiReply<T> {
    pub status: u16,
    pub body: T,
}

#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.trim().is_empty())
    }
}

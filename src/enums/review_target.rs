use std::fmt;
use crate::config::constants::{ADMIN_CHANGE_REQUESTS_PATH, ADMIN_REQUESTS_PATH};

/// Item in an admin review queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewTarget {
    Request(i64),
    ChangeRequest(i64),
}

impl ReviewTarget {
    pub fn id(&self) -> i64 {
        match self {
            Self::Request(id) | Self::ChangeRequest(id) => *id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Request(_) => "Request",
            Self::ChangeRequest(_) => "Change request",
        }
    }

    pub fn action_path(&self, action: &str) -> String {
        match self {
            Self::Request(id) => format!("{}/{}/{}", ADMIN_REQUESTS_PATH, id, action),
            Self::ChangeRequest(id) => format!("{}/{}/{}", ADMIN_CHANGE_REQUESTS_PATH, id, action),
        }
    }
}

impl fmt::Display for ReviewTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.kind(), self.id())
    }
}

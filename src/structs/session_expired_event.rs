/// Emitted when an authenticated call comes back with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionExpiredEvent {
    pub method: String,
    pub path: String,
    pub request_id: String,
}

impl SessionExpiredEvent {
    pub fn operation(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

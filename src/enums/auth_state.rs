use crate::structs::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Bootstrap has not finished yet.
    #[default]
    Unknown,
    Authenticated(User),
    Unauthenticated,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Store administrator. Only a salted digest of the password is kept.
#[derive(Clone)]
pub struct AdminAccount {
    pub username: String,
    pub email: String,
    pub salt: String,
    pub password_digest: String,
    pub session_ttl: Duration,
    /// Live session tokens and their expiry.
    pub sessions: HashMap<String, DateTime<Utc>>,
}

// Hand-written so digests and tokens never reach the logs.
impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("sessions", &self.sessions.len())
            .finish_non_exhaustive()
    }
}

/// Payload for registering an administrator.
pub struct AdminCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    pub session_ttl: Duration,
}

impl std::fmt::Debug for AdminCreate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCreate")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdminPatch {
    pub email: Option<String>,
}

/// Proof of a successful login, presented with every admin operation.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub username: String,
    pub token: String,
}

impl std::fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSession")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marketplace role attached to an authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Farmer,
}

/// Identity the access gate resolves a bearer token into. Users themselves are
/// owned by the account service; this system only references `{id, role}`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub role: Role,
}

/// A bearer session. The token string doubles as the store id, so the access
/// gate resolves credentials with a single `get`.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Payload for seeding a session. Token issuance flows (login, refresh) live in
/// the account service; this store only holds what the gate needs to verify.
#[derive(Debug)]
pub struct SessionCreate {
    pub user_id: String,
    pub role: Role,
    pub ttl_secs: i64,
}

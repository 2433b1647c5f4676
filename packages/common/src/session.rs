use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// Cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "sid";

/// Server-held table of live admin sessions.
///
/// Tokens are opaque v4 uuids mapped to their expiry instant. Expired
/// entries are dropped lazily when the token is next presented.
pub struct SessionStore {
    ttl: Duration,
    sessions: DashMap<String, DateTime<Utc>>,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            ttl: Duration::minutes(ttl_minutes),
            sessions: DashMap::new(),
        }
    }

    /// Open a new session and return its token.
    pub fn create(&self) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let expires_at = Utc::now() + self.ttl;
        self.sessions.insert(token.clone(), expires_at);
        tracing::debug!("opened admin session expiring at {expires_at}");
        token
    }

    /// Whether the token identifies a live, unexpired session.
    pub fn is_valid(&self, token: &str) -> bool {
        let expired = match self.sessions.get(token) {
            None => return false,
            Some(entry) => *entry.value() <= Utc::now(),
        };
        if expired {
            self.sessions.remove(token);
            return false;
        }
        true
    }

    /// Close a session. Unknown tokens are a no-op.
    pub fn revoke(&self, token: &str) {
        if self.sessions.remove(token).is_some() {
            tracing::debug!("revoked admin session");
        }
    }
}

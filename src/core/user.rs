use serde::{Deserialize, Serialize};

/// The authenticated account as returned by the login, signup, and
/// profile endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

/// One server-side login event. The server sends these newest-first.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRecord {
    #[serde(alias = "timestamp")]
    pub login_at: String,
}

impl LoginRecord {
    /// Short display form ("Feb 23, 14:00"); falls back to the raw
    /// server string when it is not RFC 3339.
    pub fn display_time(&self) -> String {
        match chrono::DateTime::parse_from_rfc3339(&self.login_at) {
            Ok(dt) => dt.format("%b %d, %H:%M").to_string(),
            Err(_) => self.login_at.clone(),
        }
    }
}

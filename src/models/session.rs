use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Authenticated state handed out by the auth service.
///
/// Only the data client looks inside; everything else treats it as an
/// opaque token that is either present or absent.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Seconds since the epoch.
    expires_at: i64,
}

impl Session {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: i64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            expires_at,
        }
    }

    pub(crate) fn access_token(&self) -> &str {
        &self.access_token
    }

    pub(crate) fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn is_expired(&self) -> bool {
        self.expires_within(0)
    }

    pub(crate) fn expires_within(&self, secs: i64) -> bool {
        Utc::now().timestamp() + secs >= self.expires_at
    }

    /// Cookie-safe encoding.
    pub fn encode(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        urlencoding::encode(&json).into_owned()
    }

    /// Inverse of [`Session::encode`]; garbage decodes to `None`.
    pub fn decode(raw: &str) -> Option<Self> {
        let json = urlencoding::decode(raw).ok()?;
        serde_json::from_str(&json).ok()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_session_survives_cookie_value() {
        let session = Session::new("a.b.c", Some("r1".into()), 1_900_000_000);
        let raw = session.encode();
        assert!(!raw.contains(';'));
        assert!(!raw.contains('"'));
        assert_eq!(Session::decode(&raw), Some(session));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(Session::decode("not-a-session"), None);
        assert_eq!(Session::decode(""), None);
    }

    #[test]
    fn test_expiry() {
        assert!(Session::new("t", None, 0).is_expired());
        let later = Utc::now().timestamp() + 3600;
        assert!(!Session::new("t", None, later).is_expired());
    }

    #[test]
    fn test_debug_hides_tokens() {
        let session = Session::new("secret-token", Some("secret-refresh".into()), 1);
        let shown = format!("{session:?}");
        assert!(!shown.contains("secret"));
    }
}

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

/// Default lifetime of a sign-in, matching the token mechanism's 30 day max age.
pub const SESSION_MAX_AGE_DAYS: i64 = 30;

/// Typed claims carried by a signed-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    user_id: UserId,
    name: String,
    email: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SessionClaims {
    /// Issue claims for a user at `now`, valid for the default lifetime.
    #[must_use]
    pub fn issue(user_id: UserId, name: String, email: String, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            name,
            email,
            issued_at: now,
            expires_at: now + Duration::days(SESSION_MAX_AGE_DAYS),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn claims() -> SessionClaims {
        SessionClaims::issue(
            UserId::new("user_demo_1"),
            "Demo User".into(),
            "demo@gran.com".into(),
            fixed_now(),
        )
    }

    #[test]
    fn claims_expire_after_max_age() {
        let claims = claims();
        assert!(!claims.is_expired(fixed_now() + Duration::days(29)));
        assert!(claims.is_expired(fixed_now() + Duration::days(30)));
    }

    #[test]
    fn claims_serialize_camel_case() {
        let json = serde_json::to_string(&claims()).unwrap();
        assert!(json.contains("\"userId\":\"user_demo_1\""), "{json}");
        assert!(json.contains("\"expiresAt\""), "{json}");
        let back: SessionClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(back, claims());
    }
}

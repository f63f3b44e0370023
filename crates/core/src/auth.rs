//! Demo-only credential check. There is no account store and no hashing.

use chrono::{DateTime, Utc};

use crate::model::{SessionClaims, UserId};

pub const DEMO_EMAIL: &str = "demo@gran.com";
pub const DEMO_PASSWORD: &str = "gran1234";
const DEMO_USER_ID: &str = "user_demo_1";
const DEMO_USER_NAME: &str = "Demo User";

/// Email/password pair as typed into the sign-in form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// The fixed demo account.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(DEMO_EMAIL, DEMO_PASSWORD)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Public profile of the accepted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl DemoUser {
    #[must_use]
    pub fn into_claims(self, now: DateTime<Utc>) -> SessionClaims {
        SessionClaims::issue(self.id, self.name, self.email, now)
    }
}

/// Accepts exactly one hardcoded credential pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoAuthenticator;

impl DemoAuthenticator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns the demo user when the credentials match, `None` otherwise.
    #[must_use]
    pub fn authorize(&self, credentials: &Credentials) -> Option<DemoUser> {
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return None;
        }
        let ok = credentials.email == DEMO_EMAIL && credentials.password == DEMO_PASSWORD;
        ok.then(|| DemoUser {
            id: UserId::new(DEMO_USER_ID),
            name: DEMO_USER_NAME.to_owned(),
            email: DEMO_EMAIL.to_owned(),
        })
    }
}

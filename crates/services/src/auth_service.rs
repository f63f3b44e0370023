use std::sync::Arc;

use planner_core::auth::{Credentials, DemoAuthenticator};
use planner_core::model::SessionClaims;
use storage::records::{SESSION_KEY, decode_claims, encode_claims};
use storage::repository::LocalStore;
use tracing::{info, warn};

use crate::Clock;
use crate::error::AuthError;

/// Whether a valid session exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    Authenticated(SessionClaims),
    Unauthenticated,
}

impl AuthStatus {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated(_))
    }
}

/// Sign-up form input. Collected for the form only; no account is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Demo sign-in backed by the local store.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    authenticator: DemoAuthenticator,
    local: Arc<dyn LocalStore>,
}

impl AuthService {
    #[must_use]
    pub fn new(clock: Clock, local: Arc<dyn LocalStore>) -> Self {
        Self {
            clock,
            authenticator: DemoAuthenticator::new(),
            local,
        }
    }

    /// Check the credentials and start a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for anything but the demo pair,
    /// or a storage/codec error if the session cannot be saved.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<SessionClaims, AuthError> {
        let Some(user) = self.authenticator.authorize(credentials) else {
            warn!(email = %credentials.email, "rejected sign-in");
            return Err(AuthError::InvalidCredentials);
        };

        let claims = user.into_claims(self.clock.now());
        self.local
            .set_item(SESSION_KEY, &encode_claims(&claims)?)
            .await?;
        info!(user_id = %claims.user_id(), "signed in");
        Ok(claims)
    }

    /// Sign in with the fixed demo account.
    ///
    /// # Errors
    ///
    /// See [`AuthService::sign_in`].
    pub async fn sign_in_demo(&self) -> Result<SessionClaims, AuthError> {
        self.sign_in(&Credentials::demo()).await
    }

    /// Accept a sign-up form and sign in as the demo user.
    ///
    /// # Errors
    ///
    /// See [`AuthService::sign_in`].
    pub async fn register(&self, draft: RegistrationDraft) -> Result<SessionClaims, AuthError> {
        info!(name = %draft.name, email = %draft.email, "demo registration");
        self.sign_in_demo().await
    }

    /// The stored session, if present and not expired.
    ///
    /// Unreadable stored claims count as signed out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the backend cannot be read.
    pub async fn current_session(&self) -> Result<Option<SessionClaims>, AuthError> {
        let Some(raw) = self.local.get_item(SESSION_KEY).await? else {
            return Ok(None);
        };

        match decode_claims(&raw) {
            Ok(claims) if claims.is_expired(self.clock.now()) => Ok(None),
            Ok(claims) => Ok(Some(claims)),
            Err(err) => {
                warn!(error = %err, "ignoring unreadable session");
                Ok(None)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the backend cannot be read.
    pub async fn status(&self) -> Result<AuthStatus, AuthError> {
        Ok(match self.current_session().await? {
            Some(claims) => AuthStatus::Authenticated(claims),
            None => AuthStatus::Unauthenticated,
        })
    }

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session cannot be removed.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.local.remove_item(SESSION_KEY).await?;
        info!("signed out");
        Ok(())
    }
}

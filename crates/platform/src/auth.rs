//! Authentication endpoints.
//!
//! Credential storage and verification belong to the platform; this module
//! only calls its auth service. Password sign-in runs with the anon key,
//! user lookup by email is an admin endpoint and needs the service key.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use luxe_core::AuthUserId;

use crate::PlatformError;
use crate::client::{KeyKind, PlatformClient};

/// Errors from a password sign-in attempt.
#[derive(Debug, Error)]
pub enum SignInError {
    /// The platform rejected the credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Any other platform failure.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Errors from an account sign-up attempt.
#[derive(Debug, Error)]
pub enum SignUpError {
    /// The platform refused to create the account (taken email, weak
    /// password).
    #[error("sign-up rejected: {0}")]
    Rejected(String),

    /// Any other platform failure.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// An authentication user record as returned by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    /// Platform-issued user ID.
    pub id: Uuid,
    /// The user's email, if the platform exposes it.
    pub email: Option<String>,
    /// When the account was created.
    pub created_at: Option<DateTime<Utc>>,
}

impl AuthUser {
    /// The user's ID as a typed wrapper.
    #[must_use]
    pub const fn user_id(&self) -> AuthUserId {
        AuthUserId::new(self.id)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AdminUsersResponse {
    users: Vec<AuthUser>,
}

/// The sign-up endpoint answers a bare user when email confirmation is
/// pending, and a full session envelope when accounts auto-confirm.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session { user: AuthUser },
    User(AuthUser),
}

impl SignUpResponse {
    fn into_user(self) -> AuthUser {
        match self {
            Self::Session { user } | Self::User(user) => user,
        }
    }
}

impl PlatformClient {
    /// Verify credentials against the platform's auth service.
    ///
    /// # Errors
    ///
    /// Returns [`SignInError::InvalidCredentials`] when the platform
    /// rejects the email/password pair, [`SignInError::Platform`] for any
    /// other failure.
    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, SignInError> {
        let request = self
            .request(Method::POST, "auth/v1/token", KeyKind::Anon)?
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));

        let response = match self.send(request).await {
            Ok(response) => response,
            // The auth service answers 400/401 for bad credentials
            Err(PlatformError::Api { status, .. }) if status == 400 || status == 401 => {
                return Err(SignInError::InvalidCredentials);
            }
            Err(err) => return Err(err.into()),
        };

        let body: TokenResponse = response.json().await.map_err(PlatformError::Http)?;
        Ok(body.user)
    }

    /// Create an account with the platform's auth service.
    ///
    /// # Errors
    ///
    /// Returns [`SignUpError::Rejected`] when the platform refuses the
    /// account (the auth service answers 400/422 for taken emails and weak
    /// passwords), [`SignUpError::Platform`] for any other failure.
    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, SignUpError> {
        let request = self
            .request(Method::POST, "auth/v1/signup", KeyKind::Anon)?
            .json(&json!({ "email": email, "password": password }));

        let response = match self.send(request).await {
            Ok(response) => response,
            Err(PlatformError::Api { status, message }) if status == 400 || status == 422 => {
                return Err(SignUpError::Rejected(message));
            }
            Err(err) => return Err(err.into()),
        };

        let body: SignUpResponse = response.json().await.map_err(PlatformError::Http)?;
        Ok(body.into_user())
    }

    /// Look up an auth user by email via the privileged admin API.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::MissingServiceKey`] without a service key,
    /// or any other [`PlatformError`] the call produces. An unknown email
    /// is `Ok(None)`.
    #[tracing::instrument(skip(self))]
    pub async fn admin_find_user(&self, email: &str) -> Result<Option<AuthUser>, PlatformError> {
        let request = self
            .request(Method::GET, "auth/v1/admin/users", KeyKind::Service)?
            .query(&[("email", email)]);

        let response = self.send(request).await?;
        let body: AdminUsersResponse = response.json().await?;

        // Older platform versions ignore the email filter, so match locally
        Ok(body
            .users
            .into_iter()
            .find(|u| u.email.as_deref() == Some(email)))
    }
}

//! Admin self-registration.
//!
//! The first administrators bootstrap themselves: create the account with
//! the platform's auth service, then insert their own `admin_roles` row
//! (the platform's access rules permit inserting one's own row). When the
//! account is created but the role insert is refused, the account still
//! exists - that outcome is reported distinctly so the operator knows to
//! promote the user via the CLI instead of retrying the signup.
//!
//! Registration never establishes a session; the new admin logs in through
//! the normal gate afterwards.

use serde_json::json;
use thiserror::Error;

use luxe_core::{AuthUserId, Email};
use luxe_platform::auth::SignUpError;

use crate::auth::PlatformAuth;

/// Errors a [`Registrar`] implementation can produce.
#[derive(Debug, Error)]
pub enum SignUpServiceError {
    /// The platform refused the request (taken email, weak password,
    /// access rules).
    #[error("rejected: {0}")]
    Rejected(String),

    /// The service could not be reached or answered malformed data.
    #[error("auth service unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a failed registration attempt.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The platform refused to create the account.
    #[error("sign-up rejected: {0}")]
    Rejected(String),

    /// Account creation itself could not run.
    #[error("auth service unavailable: {0}")]
    Unavailable(String),

    /// The account was created but the admin role could not be assigned.
    #[error("account for {email} created without the admin role; promote it via the CLI")]
    RoleNotAssigned {
        /// Email of the orphaned account.
        email: Email,
    },
}

/// Seam over the platform's account-creation surface.
pub trait Registrar {
    /// Create an account, returning the new user's id.
    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthUserId, SignUpServiceError>> + Send;

    /// Insert the user's own admin role row.
    fn grant_admin_role(
        &self,
        user_id: AuthUserId,
    ) -> impl Future<Output = Result<(), SignUpServiceError>> + Send;
}

/// Create an admin account: sign up, then self-assign the admin role.
///
/// # Errors
///
/// - [`RegistrationError::Rejected`] - the platform refused the account
/// - [`RegistrationError::Unavailable`] - account creation could not run
/// - [`RegistrationError::RoleNotAssigned`] - the account exists but the
///   role insert was refused; the caller must promote it another way
#[tracing::instrument(skip(registrar, password), fields(email = %email))]
pub async fn register<R>(
    registrar: &R,
    email: &Email,
    password: &str,
) -> Result<AuthUserId, RegistrationError>
where
    R: Registrar + Sync,
{
    let user_id = registrar
        .sign_up(email.as_str(), password)
        .await
        .map_err(|err| match err {
            SignUpServiceError::Rejected(message) => RegistrationError::Rejected(message),
            SignUpServiceError::Unavailable(reason) => RegistrationError::Unavailable(reason),
        })?;

    if let Err(err) = registrar.grant_admin_role(user_id).await {
        tracing::warn!(error = %err, %user_id, "admin role insert failed after sign-up");
        return Err(RegistrationError::RoleNotAssigned {
            email: email.clone(),
        });
    }

    tracing::info!(%user_id, "admin account registered");
    Ok(user_id)
}

impl Registrar for PlatformAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUserId, SignUpServiceError> {
        let user = self
            .client()
            .sign_up(email, password)
            .await
            .map_err(|err| match err {
                SignUpError::Rejected(message) => SignUpServiceError::Rejected(message),
                SignUpError::Platform(err) => SignUpServiceError::Unavailable(err.to_string()),
            })?;
        Ok(user.user_id())
    }

    async fn grant_admin_role(&self, user_id: AuthUserId) -> Result<(), SignUpServiceError> {
        self.client()
            .table("admin_roles")
            .insert(&json!({ "user_id": user_id, "role": "admin" }))
            .await
            .map_err(|err| SignUpServiceError::Unavailable(err.to_string()))
    }
}

//! Admin login flow.
//!
//! A successful login is two checks, both delegated to the platform:
//! credential verification against its auth service, then a role lookup in
//! the `admin_roles` table. Valid credentials without the admin role are a
//! distinct outcome from bad credentials. A role lookup that *errors* is
//! treated as insufficient privilege - the gate fails closed rather than
//! granting on doubt.

use serde::Deserialize;
use thiserror::Error;

use luxe_core::{AdminRole, AuthUserId, Email, KeyValueStore};
use luxe_platform::PlatformClient;
use luxe_platform::auth::SignInError;

use crate::session::{AdminSession, SessionError, SessionGate};

/// Errors an [`AuthService`] implementation can produce.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The platform rejected the credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The service could not be reached or answered malformed data.
    #[error("auth service unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a failed login attempt.
#[derive(Debug, Error)]
pub enum LoginError {
    /// Credential verification rejected the email/password pair.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Credentials are valid but the account has no admin role.
    #[error("account does not have admin access")]
    InsufficientPrivilege,

    /// Credential verification itself could not run.
    #[error("auth service unavailable: {0}")]
    Unavailable(String),

    /// The session record could not be written after a successful login.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Seam over the platform's authentication and authorization data.
///
/// The gate never stores or verifies credentials itself; implementations
/// delegate both calls to the platform (tests use an in-memory fake).
pub trait AuthService {
    /// Verify credentials, returning the authenticated user's id.
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthUserId, AuthServiceError>> + Send;

    /// Look up the role granted to a user, if any.
    fn lookup_role(
        &self,
        user_id: AuthUserId,
    ) -> impl Future<Output = Result<Option<AdminRole>, AuthServiceError>> + Send;
}

/// Log in and establish the 24-hour admin session on success.
///
/// State transitions only happen on full success; every failure leaves the
/// gate exactly as it was.
///
/// # Errors
///
/// - [`LoginError::InvalidCredentials`] - the platform rejected the pair
/// - [`LoginError::InsufficientPrivilege`] - valid credentials, no admin
///   role (or the lookup errored; fail closed)
/// - [`LoginError::Unavailable`] - credential verification could not run
/// - [`LoginError::Session`] - the session record write failed
#[tracing::instrument(skip(gate, auth, password), fields(email = %email))]
pub async fn login<S, A>(
    gate: &mut SessionGate<S>,
    auth: &A,
    email: &Email,
    password: &str,
) -> Result<AdminSession, LoginError>
where
    S: KeyValueStore,
    A: AuthService + Sync,
{
    let user_id = auth
        .sign_in(email.as_str(), password)
        .await
        .map_err(|err| match err {
            AuthServiceError::InvalidCredentials => LoginError::InvalidCredentials,
            AuthServiceError::Unavailable(reason) => LoginError::Unavailable(reason),
        })?;

    let role = match auth.lookup_role(user_id).await {
        Ok(role) => role,
        Err(err) => {
            tracing::warn!(error = %err, %user_id, "role lookup failed, treating as not admin");
            return Err(LoginError::InsufficientPrivilege);
        }
    };

    if role != Some(AdminRole::Admin) {
        return Err(LoginError::InsufficientPrivilege);
    }

    let session = gate.establish(email.clone())?;
    tracing::info!("admin session established");
    Ok(session)
}

/// Platform-backed [`AuthService`].
#[derive(Clone)]
pub struct PlatformAuth {
    client: PlatformClient,
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    role: String,
}

impl PlatformAuth {
    /// Wrap a platform client.
    #[must_use]
    pub const fn new(client: PlatformClient) -> Self {
        Self { client }
    }

    pub(crate) const fn client(&self) -> &PlatformClient {
        &self.client
    }
}

impl AuthService for PlatformAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUserId, AuthServiceError> {
        let user = self
            .client
            .sign_in_with_password(email, password)
            .await
            .map_err(|err| match err {
                SignInError::InvalidCredentials => AuthServiceError::InvalidCredentials,
                SignInError::Platform(err) => AuthServiceError::Unavailable(err.to_string()),
            })?;
        Ok(user.user_id())
    }

    async fn lookup_role(&self, user_id: AuthUserId) -> Result<Option<AdminRole>, AuthServiceError> {
        let row: Option<RoleRow> = self
            .client
            .table("admin_roles")
            .select("role")
            .eq("user_id", &user_id.to_string())
            .maybe_single()
            .await
            .map_err(|err| AuthServiceError::Unavailable(err.to_string()))?;

        // Unknown role strings are not admin, same as no row at all
        Ok(row.and_then(|r| r.role.parse::<AdminRole>().ok()))
    }
}

//! Admin access management commands.
//!
//! Promotion writes the `admin_roles` row the login flow checks; the
//! platform account itself must already exist (created through the admin
//! self-registration flow or the platform's own dashboard). Promotion is
//! the fallback for accounts whose signup created the user but failed to
//! assign the role.

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use luxe_core::Email;
use luxe_platform::{ConfigError, PlatformClient, PlatformConfig, PlatformError};

/// Errors that can occur during admin commands.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Platform configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid email.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] luxe_core::EmailError),

    /// The platform call failed.
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    /// No auth user exists for the email.
    #[error(
        "no auth user found for {0}; create the user in the platform's auth dashboard first"
    )]
    UserNotFound(String),

    /// The user already holds the admin role.
    #[error("user {0} already has the admin role")]
    AlreadyAdmin(String),
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    user_id: String,
    role: String,
}

fn privileged_client() -> Result<PlatformClient, AdminError> {
    dotenvy::dotenv().ok();
    let config = PlatformConfig::from_env()?;
    Ok(PlatformClient::new(&config))
}

/// Grant a user the admin role.
///
/// # Errors
///
/// Fails if the email is malformed, the auth user does not exist, the
/// role is already granted, or the platform calls fail.
pub async fn promote(email: &str) -> Result<(), AdminError> {
    let email = Email::parse(email)?;
    let client = privileged_client()?;

    tracing::info!("Looking up auth user: {email}");
    let user = client
        .admin_find_user(email.as_str())
        .await?
        .ok_or_else(|| AdminError::UserNotFound(email.to_string()))?;

    let existing: Option<RoleRow> = client
        .table_privileged("admin_roles")
        .select("*")
        .eq("user_id", &user.id.to_string())
        .maybe_single()
        .await?;

    if existing.is_some() {
        return Err(AdminError::AlreadyAdmin(email.to_string()));
    }

    client
        .table_privileged("admin_roles")
        .insert(&json!({ "user_id": user.id, "role": "admin" }))
        .await?;

    tracing::info!("Promoted {email} to admin (user_id={})", user.id);
    Ok(())
}

/// Show a user's admin role row, if any.
///
/// # Errors
///
/// Fails if the email is malformed or the platform calls fail.
pub async fn check(email: &str) -> Result<(), AdminError> {
    let email = Email::parse(email)?;
    let client = privileged_client()?;

    let user = client
        .admin_find_user(email.as_str())
        .await?
        .ok_or_else(|| AdminError::UserNotFound(email.to_string()))?;

    let row: Option<RoleRow> = client
        .table_privileged("admin_roles")
        .select("*")
        .eq("user_id", &user.id.to_string())
        .maybe_single()
        .await?;

    match row {
        Some(row) => tracing::info!(
            "{email}: role={} (user_id={})",
            row.role,
            row.user_id
        ),
        None => tracing::info!("{email}: no admin role"),
    }
    Ok(())
}

/// Show a platform auth user record.
///
/// # Errors
///
/// Fails if the email is malformed or the platform call fails.
pub async fn lookup_user(email: &str) -> Result<(), AdminError> {
    let email = Email::parse(email)?;
    let client = privileged_client()?;

    match client.admin_find_user(email.as_str()).await? {
        Some(user) => tracing::info!(
            "Found user: id={} email={} created_at={}",
            user.id,
            user.email.as_deref().unwrap_or("<none>"),
            user.created_at
                .map_or_else(|| "<unknown>".to_owned(), |t| t.to_rfc3339()),
        ),
        None => tracing::info!("No user found with email {email}"),
    }
    Ok(())
}

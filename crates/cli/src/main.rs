//! Luxe CLI - privileged platform utilities.
//!
//! These commands run with the service-role key and bypass the platform's
//! row-level access rules; they are operator tools, never shipped with the
//! storefront.
//!
//! # Usage
//!
//! ```bash
//! # Grant a user the admin role
//! luxe-cli admin promote -e admin@store.com
//!
//! # Show a user's admin role row
//! luxe-cli admin check -e admin@store.com
//!
//! # Show a platform auth user record
//! luxe-cli auth check -e someone@example.com
//!
//! # Upload a product image and print its public URL
//! luxe-cli upload photo.png --bucket product-images
//! ```
//!
//! # Environment Variables
//!
//! - `LUXE_PLATFORM_URL` - Platform project URL
//! - `LUXE_PLATFORM_ANON_KEY` - Public API key
//! - `LUXE_PLATFORM_SERVICE_KEY` - Privileged service-role key (required
//!   by every command here)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "luxe-cli")]
#[command(author, version, about = "Luxe CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage admin access
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Inspect platform authentication users
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Upload a file to platform object storage
    Upload {
        /// File to upload
        file: PathBuf,

        /// Target bucket
        #[arg(long, default_value = "product-images")]
        bucket: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Grant a user the admin role
    Promote {
        /// User's email address
        #[arg(short, long)]
        email: String,
    },
    /// Show a user's admin role row
    Check {
        /// User's email address
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Show a platform auth user record
    Check {
        /// User's email address
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Admin { action } => match action {
            AdminAction::Promote { email } => commands::admin::promote(&email).await?,
            AdminAction::Check { email } => commands::admin::check(&email).await?,
        },
        Commands::Auth { action } => match action {
            AuthAction::Check { email } => commands::admin::lookup_user(&email).await?,
        },
        Commands::Upload { file, bucket } => commands::upload::upload(&file, &bucket).await?,
    }
    Ok(())
}

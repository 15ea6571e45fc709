//! Craftpage CLI - Session migrations, content seeding, and admin roles.
//!
//! # Usage
//!
//! ```bash
//! # Create the admin session table
//! craftpage-cli migrate
//!
//! # Write the default skeleton for every content slot that is still empty
//! craftpage-cli content seed
//!
//! # Overwrite every slot with the default skeleton
//! craftpage-cli content seed --force
//!
//! # Print the stored landing-page documents
//! craftpage-cli content show
//!
//! # Grant or revoke the admin role claim
//! craftpage-cli admin grant 4a1f...
//! craftpage-cli admin revoke 4a1f...
//! ```
//!
//! # Commands
//!
//! - `migrate` - Create the `admin.session` table
//! - `content seed|show` - Manage `site_content`
//! - `admin grant|revoke` - Set the `app_metadata.role` claim

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use craftpage_core::UserId;

mod commands;

#[derive(Parser)]
#[command(name = "craftpage-cli")]
#[command(author, version, about = "Craftpage CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the admin session table
    Migrate,
    /// Manage landing-page content
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },
    /// Manage admin role claims
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ContentAction {
    /// Write the default skeleton for empty slots
    Seed {
        /// Overwrite slots that already have content
        #[arg(long)]
        force: bool,
    },
    /// Print the stored documents as JSON
    Show,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Grant the admin role to a user
    Grant {
        /// Platform user ID
        user_id: UserId,
    },
    /// Revoke the admin role from a user
    Revoke {
        /// Platform user ID
        user_id: UserId,
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Content { action } => match action {
            ContentAction::Seed { force } => commands::content::seed(force).await?,
            ContentAction::Show => commands::content::show().await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Grant { user_id } => commands::admin::grant(user_id).await?,
            AdminAction::Revoke { user_id } => commands::admin::revoke(user_id).await?,
        },
    }
    Ok(())
}

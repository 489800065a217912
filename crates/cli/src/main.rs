//! Nosso Sushi CLI - migrations, admin accounts and menu seeding.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! ns-cli migrate
//!
//! # Create an admin account
//! ns-cli admin create -e gerente@nossosushi.pt -n "Gerente" -p 'long passphrase'
//!
//! # Load the menu
//! ns-cli seed menu --file seeds/menu.yaml [--clear]
//! ```
//!
//! All commands read `ADMIN_DATABASE_URL`, falling back to `DATABASE_URL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ns-cli")]
#[command(author, version, about = "Nosso Sushi CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the database
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Login password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Load menu items from a YAML file
    Menu {
        #[arg(short, long, default_value = "seeds/menu.yaml")]
        file: String,

        /// Delete the current menu first
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                password,
            } => {
                commands::admin::create_user(&email, &name, &password).await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::Menu { file, clear } => commands::seed::menu(&file, clear).await?,
        },
    }
    Ok(())
}

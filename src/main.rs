//! Window Admin - Main Entry Point
//!
//! Command-line console for the window/door product catalog backend.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};

use window_admin_lib::{
    commands::{self, ApplicationAction, ProductAction},
    config::ConsoleConfig,
    logging,
    services::ProductFamily,
    AdminConsole,
};

#[derive(Parser)]
#[command(name = "window-admin")]
#[command(about = "Admin console for the window and door product catalog", long_about = None)]
struct Cli {
    /// API base URL (overrides ADMIN_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Allow the demo login fallback (overrides ADMIN_DEMO_LOGIN)
    #[arg(long, global = true)]
    demo_login: bool,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the authentication state
    Session,
    /// Show dashboard statistics
    Stats,
    /// Manage the product catalog
    Products {
        #[arg(value_enum)]
        family: ProductFamily,
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Review customer applications
    Applications {
        #[command(subcommand)]
        action: ApplicationAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    info!("Window Admin starting...");

    let mut config = ConsoleConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    if cli.demo_login {
        config.demo_login = true;
    }
    debug!("Using API at {}", config.api_base_url);

    let console = AdminConsole::new(config).context("Failed to initialise console")?;

    let output: Value = match cli.command {
        Commands::Login { email, password } => commands::login(&console, &email, &password).await?,
        Commands::Logout => commands::logout(&console),
        Commands::Session => serde_json::to_value(commands::session(&console))?,
        Commands::Stats => commands::dashboard_stats(&console)?,
        Commands::Products { family, action } => commands::product(&console, family, action).await?,
        Commands::Applications { action } => commands::application(&console, action).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

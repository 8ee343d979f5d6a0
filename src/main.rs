mod cli;
mod notifier;
mod render;

use anyhow::Context;
use application::ListrApp;
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, DEFAULT_LOG_FILTER};
use domain::{DomainError, Navigation, PropertyFilter};
use notifier::ConsoleNotifier;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config =
        Config::from_env(cli.env_file.as_deref()).context("Failed to load configuration")?;

    // Initialize tracing; stdout stays reserved for command output
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("Using backend {}", config.base_url());
    debug!("Session file: {}", config.session_path.display());

    let mut app = ListrApp::new(&config, Arc::new(ConsoleNotifier))
        .context("Failed to initialize the backend client")?;

    // Gateway failures have already been reported through the notifier
    match run(&mut app, cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            debug!("Command failed: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(app: &mut ListrApp, command: Commands) -> Result<(), DomainError> {
    match command {
        Commands::Login { email, password } => {
            let session = app.sign_in(&email, &password).await?;
            info!("Session valid until {}", session.expires_at);
            println!("Signed in as {}", render::user_label(&session.user));
        }
        Commands::Logout => {
            app.sign_out().await?;
            println!("Signed out.");
        }
        Commands::Whoami => match app.current_user().await {
            Ok(user) => println!("{}", render::user_label(&user)),
            Err(DomainError::NotAuthenticated) => return not_signed_in(),
            Err(e) => {
                eprintln!("Error: {}", e);
                return Err(e);
            }
        },
        Commands::List {
            search,
            type_filter,
            price,
        } => {
            let filter = PropertyFilter::new(search, type_filter, price);
            open(app, filter).await?;
            println!("{}", render::listing(app.listing.state()));
        }
        Commands::Add(fields) => {
            open(app, PropertyFilter::default()).await?;
            let created = app.create_property(fields.into_draft()).await?;
            println!("{}", render::property_card(&created));
        }
        Commands::Edit { id, fields } => {
            open(app, PropertyFilter::default()).await?;
            let updated = app.edit_property(id, |draft| fields.apply_to(draft)).await?;
            println!("{}", render::property_card(&updated));
        }
        Commands::Delete { id } => {
            open(app, PropertyFilter::default()).await?;
            app.delete_property(id).await?;
        }
    }
    Ok(())
}

/// Activate the dashboard, refusing to go on without a session.
async fn open(app: &mut ListrApp, filter: PropertyFilter) -> Result<(), DomainError> {
    match app.open_dashboard(filter).await? {
        Navigation::Dashboard => Ok(()),
        Navigation::Auth => not_signed_in(),
    }
}

fn not_signed_in() -> Result<(), DomainError> {
    eprintln!("{}", render::NOT_SIGNED_IN);
    Err(DomainError::NotAuthenticated)
}

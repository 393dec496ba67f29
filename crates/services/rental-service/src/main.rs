//! Rental Service - operator CLI over the rental workflow.

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{AppError, AppResult};
use rental_service_lib::config::RentalServiceConfig;
use rental_service_lib::service::RentalService;

#[derive(Parser)]
#[command(name = "rental-service")]
#[command(about = "Rental eligibility and lifecycle operations")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a rental
    Show { rental_id: i32 },
    /// Open a rental for a user
    Rent { user_id: i32 },
    /// Close a rental
    Finish { rental_id: i32 },
    /// List a user's rentals
    History { user_id: i32 },
    /// Check whether a user may open a rental
    Check { user_id: i32 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = RentalServiceConfig::from_env();

    init_tracing(cli.verbose, &config.service.log_level);
    tracing::debug!(config = ?config, "Configuration loaded");

    let service = rental_service_lib::connect(&config).await?;

    if let Err(e) = run(&service, cli.command).await {
        if e.is_domain() {
            tracing::warn!(error = e.name(), "{}", e);
        } else {
            tracing::error!(error = e.name(), "{}", e.user_message());
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize tracing subscriber (verbose mode sets debug level)
fn init_tracing(verbose: bool, default_level: &str) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_level.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run(service: &dyn RentalService, command: Commands) -> AppResult<()> {
    match command {
        Commands::Show { rental_id } => print_json(&service.get_rental_by_id(rental_id).await?),
        Commands::Rent { user_id } => {
            let input = domain::CreateRental::new(user_id);
            input.check()?;
            print_json(&service.create_rental(input).await?)
        }
        Commands::Finish { rental_id } => print_json(&service.finish_rental(rental_id).await?),
        Commands::History { user_id } => print_json(&service.list_user_rentals(user_id).await?),
        Commands::Check { user_id } => {
            let user = service.get_user_for_rental(user_id).await?;
            if service.user_is_under_age(&user) {
                return Err(AppError::InsufficientAge);
            }
            service.check_user_able_to_rental(user.id).await?;

            println!("{} (user {}) may open a rental", user.full_name(), user.id);
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| AppError::internal(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

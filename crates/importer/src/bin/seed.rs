use clap::{Parser, Subcommand};
use importer::{DirectoryValidator, seed, source_from_location};
use storage::{open_store, redact_database_url};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "score-seed")]
#[command(about = "Create zero-point score records for every known candidate", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert a record for each candidate that does not have one yet
    Seed {
        #[arg(long, env = "APPLICATIONS_SOURCE", default_value = "test.applications.json")]
        source: String,

        #[arg(long, env = "DATABASE_URL")]
        database_url: String,

        #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
        max_connections: u32,
    },
    /// Load and check the candidate directory without touching the store
    Validate {
        #[arg(long, env = "APPLICATIONS_SOURCE", default_value = "test.applications.json")]
        source: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "score_seed={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Seed {
            source,
            database_url,
            max_connections,
        } => {
            handle_seed(&source, &database_url, max_connections).await?;
        }
        Commands::Validate { source } => {
            handle_validate(&source).await?;
        }
    }

    Ok(())
}

async fn handle_seed(
    location: &str,
    database_url: &str,
    max_connections: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = source_from_location(location);
    tracing::info!("Loading candidates from {}", source.describe());

    tracing::info!(
        "Connecting to score store at: {}",
        redact_database_url(database_url)
    );
    let store = open_store(database_url, max_connections).await?;

    let result = seed(store.as_ref(), source.as_ref()).await;
    store.close().await;
    let report = result?;

    tracing::info!(
        "✓ Seeding completed: {} created, {} already present, {} skipped",
        report.created,
        ((report.total - report.skipped) as u64).saturating_sub(report.created),
        report.skipped
    );

    Ok(())
}

async fn handle_validate(location: &str) -> Result<(), Box<dyn std::error::Error>> {
    let source = source_from_location(location);
    tracing::info!("Loading candidates from {}", source.describe());

    let profiles = source.load().await?;
    tracing::info!("Loaded {} candidates", profiles.len());

    tracing::info!("Validating candidate directory...");
    let report = DirectoryValidator::validate(&profiles);
    report.log_warnings();
    tracing::info!(
        "✓ Validation successful! {} distinct roll numbers",
        report.unique_roll_nos
    );

    Ok(())
}

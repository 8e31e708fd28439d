use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "fmdb-cli")]
#[command(about = "Farmers' market directory command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import markets from the YAML seed file into the database (upsert).
    Seed {
        /// Path to the markets YAML file; defaults to FMDB_MARKETS_PATH.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Apply pending database migrations.
    Migrate,
    /// Check database connectivity.
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = fmdb_core::load_app_config()?;
    let pool_config = fmdb_db::PoolConfig::from_app_config(&config);
    let pool = fmdb_db::connect_pool(&config.database_url, pool_config).await?;

    match cli.command {
        Commands::Seed { file } => {
            let path = file.unwrap_or_else(|| config.markets_path.clone());
            let markets_file = fmdb_core::markets::load_markets(&path)?;
            tracing::info!(
                count = markets_file.markets.len(),
                path = %path.display(),
                "loaded seed file"
            );

            let applied = fmdb_db::run_migrations(&pool).await?;
            if applied > 0 {
                tracing::info!(applied, "applied pending migrations before seeding");
            }

            let upserted = fmdb_db::seed_markets(&pool, &markets_file.markets).await?;
            println!("seeded {upserted} markets from {}", path.display());
        }
        Commands::Migrate => {
            let applied = fmdb_db::run_migrations(&pool).await?;
            println!("applied {applied} migrations");
        }
        Commands::Health => {
            fmdb_db::health_check(&pool).await?;
            println!("database ok");
        }
    }

    Ok(())
}

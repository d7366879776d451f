mod schools;

use clap::{Parser, Subcommand};

use crate::schools::{run_schools_add, run_schools_near, SchoolsCommands};

#[derive(Debug, Parser)]
#[command(name = "schooldb-cli")]
#[command(about = "School directory command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Add and query schools
    Schools {
        #[command(subcommand)]
        command: SchoolsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("nothing to do; run `schooldb-cli --help` for commands");
        return Ok(());
    };

    let config = schooldb_core::load_app_config()?;
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = schooldb_db::PoolConfig::from_app_config(&config);
    let pool = schooldb_db::connect_pool(&config.database_url, pool_config).await?;

    match command {
        Commands::Db {
            command: DbCommands::Ping,
        } => {
            schooldb_db::health_check(&pool).await?;
            println!("database ok");
        }
        Commands::Db {
            command: DbCommands::Migrate,
        } => {
            let applied = schooldb_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        Commands::Schools {
            command:
                SchoolsCommands::Add {
                    name,
                    address,
                    latitude,
                    longitude,
                },
        } => {
            run_schools_add(
                &pool,
                &name,
                &address,
                latitude,
                longitude,
                config.store_timeout(),
            )
            .await?;
        }
        Commands::Schools {
            command: SchoolsCommands::Near {
                latitude,
                longitude,
            },
        } => run_schools_near(&pool, latitude, longitude, config.store_timeout()).await?,
    }

    Ok(())
}

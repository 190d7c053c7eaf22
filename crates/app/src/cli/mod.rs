use clap::{Args, Parser, Subcommand};
use refill_app::database::{self, Db};

mod fee;
mod migrate;

#[derive(Debug, Parser)]
#[command(name = "refill-app", about = "Refill marketplace operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),
    Fee(fee::FeeCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Migrate(args) => migrate::run(args).await,
            Commands::Fee(command) => fee::run(command).await,
        }
    }
}

/// Connection options shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Maximum pool connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 2)]
    max_connections: u32,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<Db, String> {
        database::connect(&self.database_url, self.max_connections)
            .await
            .map(Db::new)
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}

//! Apply the embedded schema migrations and exit.

use std::process::ExitCode;

use clap::Parser;
use habit_buddy::outbound::persistence::run_pending;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(about = "Apply pending habits schema migrations")]
struct Args {
    /// PostgreSQL connection string.
    #[arg(long, env = "HABITS_DATABASE_URL")]
    database_url: String,
}

fn main() -> ExitCode {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init();

    let args = Args::parse();
    match run_pending(&args.database_url) {
        Ok(applied) => {
            info!(versions = ?applied, "migrations applied");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "migration failed");
            ExitCode::FAILURE
        }
    }
}

//! See <https://github.com/matklad/cargo-xtask/>
//!
//! Operator tasks for the locksmith dispatch service: provisioning its
//! DynamoDB tables and deploying it as a Lambda function.
//!
//! The binary is integrated into the `cargo` command line by using an
//! alias in `.cargo/config.toml`.

use clap::Parser;

mod aws;
mod dynamodb;
mod lambda;
mod output;

/// Operator tasks for the locksmith dispatch repository
#[derive(Debug, Parser)]
#[command(name = "xtask")]
#[command(about = "Operator tasks for locksmith dispatch", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: Global,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Silence the command output
    #[clap(long, global = true)]
    pub silent: bool,

    /// Enable verbose output
    #[clap(long, global = true)]
    pub verbose: bool,
}

impl Global {
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.silent
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Manage the cache and directory tables
    Dynamodb(dynamodb::DynamodbCommand),

    /// Deploy the dispatch function
    Lambda(lambda::LambdaCommand),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dynamodb(dynamodb_cmd) => {
            dynamodb::run(dynamodb_cmd, cli.global).await?;
        }
        Commands::Lambda(lambda_cmd) => {
            lambda::run(lambda_cmd, cli.global).await?;
        }
    }

    Ok(())
}

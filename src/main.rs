use clap::Parser;
use iris_model_server::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Switch(args) => cli::switch::run(args).await,
        Command::Info => cli::info::run().await,
    }
}

use clap::Parser;
use couchsync::{Config, Connector, connector::MismatchPolicy};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, ConnectionArgs};
use output::OutputFormat;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("couchsync=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from_json_flag(cli.json);

    let config = config_from_args(cli.connection);
    tracing::debug!(?config, "Loaded configuration");
    let connector = Connector::new(&config)?;

    match cli.command.unwrap_or(Commands::Sync) {
        Commands::Sync => commands::sync::run(&connector, format).await,
        Commands::Check => commands::check::run(&connector, format).await,
    }
}

fn config_from_args(args: ConnectionArgs) -> Config {
    let policy = if args.strict_components {
        MismatchPolicy::Reject
    } else {
        MismatchPolicy::Skip
    };
    Config::new(args.username, args.password, args.instance_url).with_mismatch_policy(policy)
}

//! CLI argument definitions for the couchsync binary.

use clap::{Parser, Subcommand};

/// Synchronize CouchDB databases, roles and users into an identity graph
#[derive(Parser, Debug)]
#[command(name = "couchsync")]
#[command(about = "couchsync: CouchDB access-control synchronization")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a full synchronization cycle and print the resulting graph (default)
    Sync,
    /// Validate configuration and credentials against the instance
    Check,
}

/// Connection settings for the CouchDB instance.
///
/// All three are required; emptiness is reported by the library's config
/// validation so every missing field is listed at once.
#[derive(clap::Args, Debug)]
pub struct ConnectionArgs {
    /// The username of the CouchDB admin account
    #[arg(long, env = "COUCHDB_USERNAME", default_value = "")]
    pub username: String,

    /// The password of the CouchDB admin account
    #[arg(long, env = "COUCHDB_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// The url to the CouchDB instance. Include :port if needed
    #[arg(long, env = "COUCHDB_INSTANCE_URL", default_value = "")]
    pub instance_url: String,

    /// Fail when a security component lists a different number of names and roles,
    /// instead of skipping that component
    #[arg(long, env = "COUCHDB_STRICT_COMPONENTS")]
    pub strict_components: bool,
}

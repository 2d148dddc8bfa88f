//! CLI module for the user management application
//!
//! Provides subcommands:
//! - `demo`: run the sample operation sequence (default)
//! - `users`: user CRUD operations
//! - `genders`: gender lookups
//! - `migrate`: apply or revert schema migrations

pub mod demo;
pub mod genders;
pub mod migrate;
pub mod users;

use std::ffi::OsString;
use std::path::Path;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::database::Database;
use crate::infrastructure::logging;

/// User management - layered CRUD over users and genders
#[derive(Parser)]
#[command(name = "user-management")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options shared by every subcommand
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Database connection URL (overrides config)
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Extra configuration file layered over config/default and config/local
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the sample operation sequence (default)
    Demo,

    /// Manage users
    #[command(subcommand)]
    Users(users::UsersCommand),

    /// Look up genders
    #[command(subcommand)]
    Genders(genders::GendersCommand),

    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),
}

impl Cli {
    /// Load `.env` into the process environment, then parse arguments
    ///
    /// `.env` must be loaded first so that values such as `DATABASE_URL`
    /// reach the `env` fallbacks of the arguments. `dotenv` selects a specific
    /// file instead of searching from the working directory.
    pub fn try_parse_with_dotenv<I, T>(dotenv: Option<&Path>, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        // A missing `.env` is not an error
        let _ = match dotenv {
            Some(path) => dotenvy::from_path(path),
            None => dotenvy::dotenv().map(|_| ()),
        };

        Self::try_parse_from(args)
    }
}

/// Dispatch the parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => demo::run(&cli.global).await,
        Command::Users(command) => users::run(&cli.global, command).await,
        Command::Genders(command) => genders::run(&cli.global, command).await,
        Command::Migrate(args) => migrate::run(&cli.global, args).await,
    }
}

/// Load configuration, install logging and open the database
///
/// `.env` has already been loaded by [`Cli::try_parse_with_dotenv`].
///
/// Schema migrations are applied when `database.run_migrations` is set and
/// `auto_migrate` is requested.
pub(crate) async fn bootstrap(
    global: &GlobalArgs,
    auto_migrate: bool,
) -> anyhow::Result<(AppConfig, Database)> {
    let config = AppConfig::load(global.config.as_deref())?
        .with_database_url(global.database_url.clone());
    logging::init_logging(&config.logging)?;

    let database = Database::connect(&config.database).await?;

    if auto_migrate && config.database.run_migrations {
        database.migrate().await?;
        info!("Schema is up to date");
    }

    Ok((config, database))
}

//! Migrate command - apply or revert schema migrations

use clap::Args;

use super::{bootstrap, GlobalArgs};
use crate::infrastructure::database::{schema_migrations, Migrator, SqliteMigrator};

#[derive(Args, Debug, Clone, Copy)]
pub struct MigrateArgs {
    /// Revert the most recently applied migration instead
    #[arg(long)]
    pub revert: bool,
}

/// Apply pending migrations, or revert the latest, and print the version
pub async fn run(global: &GlobalArgs, args: MigrateArgs) -> anyhow::Result<()> {
    let (_config, database) = bootstrap(global, false).await?;
    let migrator = SqliteMigrator::new(database.pool().clone(), schema_migrations());

    if args.revert {
        migrator.revert().await?;
    } else {
        migrator.run().await?;
    }

    match migrator.version().await? {
        Some(version) => println!("Schema version: {}", version),
        None => println!("Schema version: none"),
    }

    database.close().await;

    Ok(())
}

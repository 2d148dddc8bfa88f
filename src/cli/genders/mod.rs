//! Genders command - read-only lookups

use clap::Subcommand;

use super::users::FormatArgs;
use super::{bootstrap, GlobalArgs};
use crate::controller::UserController;

#[derive(Subcommand, Debug)]
pub enum GendersCommand {
    /// List every gender
    List(FormatArgs),

    /// Show one gender
    Get {
        id: i64,

        #[command(flatten)]
        format: FormatArgs,
    },
}

pub async fn run(global: &GlobalArgs, command: GendersCommand) -> anyhow::Result<()> {
    let (_config, database) = bootstrap(global, true).await?;
    let controller = UserController::new(crate::create_app_state(&database));

    match command {
        GendersCommand::List(format) => {
            controller.with_format(format.into()).show_all_genders().await;
        }
        GendersCommand::Get { id, format } => {
            controller.with_format(format.into()).show_gender(id).await;
        }
    }

    database.close().await;

    Ok(())
}

//! Users command - one controller operation per subcommand

use clap::{Args, Subcommand};

use super::{bootstrap, GlobalArgs};
use crate::controller::{OutputFormat, UserController};

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List every user
    List(FormatArgs),

    /// Show one user
    Get {
        id: i64,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Create a user
    Create(UserArgs),

    /// Replace every mutable field of a user
    Update {
        id: i64,

        #[command(flatten)]
        user: UserArgs,
    },

    /// Delete a user
    Delete { id: i64 },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct FormatArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl From<FormatArgs> for OutputFormat {
    fn from(args: FormatArgs) -> Self {
        if args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// User fields accepted by create and update
#[derive(Args, Debug, Clone)]
pub struct UserArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub age: Option<i32>,

    /// Gender ID
    #[arg(long)]
    pub gender: Option<i64>,
}

/// Run a users subcommand
///
/// Operation failures are reported by the controller and do not change the
/// exit status.
pub async fn run(global: &GlobalArgs, command: UsersCommand) -> anyhow::Result<()> {
    let (_config, database) = bootstrap(global, true).await?;
    let controller = UserController::new(crate::create_app_state(&database));

    match command {
        UsersCommand::List(format) => {
            controller.with_format(format.into()).show_all_users().await;
        }
        UsersCommand::Get { id, format } => {
            controller.with_format(format.into()).show_user(id).await;
        }
        UsersCommand::Create(user) => {
            controller
                .create_user(&user.name, user.age, user.gender, &user.username)
                .await;
        }
        UsersCommand::Update { id, user } => {
            controller
                .update_user(id, &user.name, user.age, user.gender, &user.username)
                .await;
        }
        UsersCommand::Delete { id } => {
            controller.delete_user(id).await;
        }
    }

    database.close().await;

    Ok(())
}

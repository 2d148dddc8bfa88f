//! Demo command - runs the sample operation sequence against the store

use tracing::info;

use super::{bootstrap, GlobalArgs};
use crate::controller::UserController;

/// Run the demonstration and close the store
pub async fn run(global: &GlobalArgs) -> anyhow::Result<()> {
    let (_config, database) = bootstrap(global, true).await?;

    let controller = UserController::new(crate::create_app_state(&database));
    let summary = controller.run_sample_operations().await;

    println!(
        "\nDemo finished: {} succeeded, {} failed",
        summary.succeeded, summary.failed
    );
    info!(succeeded = summary.succeeded, failed = summary.failed, "Demo complete");

    database.close().await;

    Ok(())
}

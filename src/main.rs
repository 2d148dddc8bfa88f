use user_management::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::try_parse_with_dotenv(None, std::env::args_os()).unwrap_or_else(|e| e.exit());

    cli::run(cli).await
}

use clap::Parser;
use clipbridge_lib::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    clipbridge_lib::bootstrap::tracing::init_tracing_subscriber()?;
    clipbridge_lib::run(cli).await
}

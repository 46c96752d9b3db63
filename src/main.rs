use clap::Parser;

use fundfolio::app::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    cli.config.init_tracing()?;

    run(cli).await
}

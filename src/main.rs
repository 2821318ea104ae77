use anyhow::Result;
use cmetrack::commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    Cli::menu().await
}

//! Omnidex CLI
//!
//! ```bash
//! omnidex index --module blog --entry-key blog:post --plural blog:posts \
//!     --id 1 --uri blog/2024/01/hello --title "Hello World"
//! omnidex search hello --filter blog=blog:posts --json
//! omnidex count hello
//! omnidex config init
//! ```

use anyhow::Result;
use clap::Parser;
use omnidex_cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let output = omnidex_cli::run(cli).await?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

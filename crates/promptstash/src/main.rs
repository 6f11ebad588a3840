use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod api;
mod logging;
mod server;

use logging::LogFormat;

#[derive(Parser, Debug)]
#[command(
    name = "promptstash",
    about = "Self-hosted prompt library with a web UI",
    version
)]
pub struct Cli {
    /// Port for the HTTP server
    #[arg(short, long, default_value_t = 8300)]
    pub port: u16,

    /// Path to the SQLite database file
    #[arg(long, default_value = "prompts.db")]
    pub db: PathBuf,

    /// Directory containing the web UI (index.html plus static/ assets)
    #[arg(long)]
    pub ui_dir: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    pub log_format: LogFormat,

    /// Open the browser once the server is up
    #[arg(long)]
    pub open: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_tracing("info", cli.log_format);

    server::run(cli).await
}

//! Server startup: database, UI directory, listener, shutdown.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use promptstash_db::Database;

use crate::api;
use crate::Cli;

pub async fn run(cli: Cli) -> Result<()> {
    let db = Arc::new(
        Database::open_at(&cli.db)
            .with_context(|| format!("Failed to open database at {}", cli.db.display()))?,
    );
    tracing::info!(db = %cli.db.display(), "database ready");

    let ui_dir = resolve_ui_dir(cli.ui_dir)?;
    tracing::info!(ui = %ui_dir.display(), "serving web UI");

    let router = api::create_router(db, &ui_dir);

    let addr = format!("0.0.0.0:{}", cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let url = format!("http://localhost:{}", cli.port);

    // Print clean startup message
    eprintln!();
    eprintln!("  {} {}", "->".bright_green(), format!("Open {}", url).bold());
    eprintln!("  {} Press {} to stop", "->".dimmed(), "Ctrl+C".bold());
    eprintln!();

    if cli.open {
        if let Err(e) = open::that(&url) {
            eprintln!("Failed to open browser: {} (open {} manually)", e, url);
        }
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");
    eprintln!("\nShutting down...");
}

/// Find the directory holding `index.html` and the static assets.
///
/// Order: `--ui-dir` flag, `PROMPTSTASH_UI_DIR`, `ui/` in the current
/// directory, `ui/` at the workspace root relative to the binary, then the
/// platform data dir.
fn resolve_ui_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        if dir.join("index.html").exists() {
            return Ok(dir);
        }
        anyhow::bail!("No index.html under {}", dir.display());
    }

    if let Ok(dir) = std::env::var("PROMPTSTASH_UI_DIR") {
        let path = PathBuf::from(dir);
        if path.join("index.html").exists() {
            return Ok(path);
        }
    }

    // Running from a checkout
    let cwd_ui = PathBuf::from("ui");
    if cwd_ui.join("index.html").exists() {
        return Ok(cwd_ui);
    }

    // Development: binary is in target/debug or target/release,
    // ui/ is at the workspace root
    if let Ok(exe) = std::env::current_exe() {
        if let Some(workspace_root) = exe
            .parent() // target/debug
            .and_then(|p| p.parent()) // target
            .and_then(|p| p.parent())
        // workspace root
        {
            let ui_dir = workspace_root.join("ui");
            if ui_dir.join("index.html").exists() {
                return Ok(ui_dir);
            }
        }
    }

    // Installed: ~/.local/share/promptstash/ui/
    if let Some(data_dir) = dirs::data_dir() {
        let ui_dir = data_dir.join("promptstash").join("ui");
        if ui_dir.join("index.html").exists() {
            return Ok(ui_dir);
        }
    }

    anyhow::bail!(
        "Could not find the web UI directory. Set --ui-dir or PROMPTSTASH_UI_DIR to a \
        directory containing index.html."
    )
}

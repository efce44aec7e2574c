// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod export;
pub mod http;
pub mod logging;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, default_config_path, load_or_default};
use crate::export::{PdfCreator, RenderCommand};
use crate::http::AppState;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - the PDF creator
/// - the HTTP server
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(&args)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let creator = PdfCreator::new(cfg.renderer.clone());
    info!(
        renderer = %creator.renderer().executable.display(),
        wait_timeout_ms = creator.renderer().wait_timeout.as_millis() as u64,
        "starting pdfgate"
    );

    let state = AppState::new(creator);

    // Ctrl-C → graceful shutdown.
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("shutdown requested");
    };

    http::serve(cfg.server.bind, state, shutdown).await
}

/// Load the config file and apply `--bind` / `--renderer`.
///
/// Without `--config`, `Pdfgate.toml` in the working directory is used if it
/// exists, otherwise the built-in defaults.
pub fn resolve_config(args: &CliArgs) -> Result<ConfigFile> {
    let path = match &args.config {
        Some(path) => Some(PathBuf::from(path)),
        None => Some(default_config_path()).filter(|p| p.is_file()),
    };
    let mut cfg = load_or_default(path.as_deref())
        .with_context(|| format!("loading config {path:?}"))?;

    if let Some(bind) = &args.bind {
        cfg.server.bind = bind
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid --bind address {bind:?}"))?;
    }

    if let Some(renderer) = &args.renderer {
        anyhow::ensure!(!renderer.trim().is_empty(), "--renderer must not be empty");
        cfg.renderer.executable = PathBuf::from(renderer);
    }

    Ok(cfg)
}

/// Simple dry-run output: print the resolved config and renderer invocation.
fn print_dry_run(cfg: &ConfigFile) {
    println!("pdfgate dry-run");
    println!("  server.bind = {}", cfg.server.bind);
    println!(
        "  renderer.executable = {}",
        cfg.renderer.executable.display()
    );
    println!(
        "  renderer.wait_timeout_ms = {}",
        cfg.renderer.wait_timeout.as_millis()
    );
    println!();

    let command = RenderCommand::new(&cfg.renderer.executable, "<sourceHtmlUrl>");
    let argv: Vec<String> = command
        .argv()
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    println!("renderer invocation:");
    println!("  {}", argv.join(" "));

    debug!("dry-run complete (not serving)");
}

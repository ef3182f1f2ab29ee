// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Document Annotator CLI
//!
//! Serves the annotation web UI and manages its configuration.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use doc_annotator::annotation::LabelMode;
use doc_annotator::config::AppConfig;
use doc_annotator::{AnnotatorError, Result};

/// Document Annotator - label text and PDF documents, export as CSV
#[derive(Parser, Debug)]
#[command(name = "doc-annotator")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version)]
#[command(about = "Label text and PDF documents and export the annotations as CSV", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the annotation web UI (default)
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Label form mode: multi or single
        #[arg(short, long)]
        mode: Option<LabelMode>,

        /// Open browser automatically
        #[arg(long)]
        open: bool,
    },

    /// Print the label catalog
    Catalog,

    /// Write a default configuration file
    Init {
        /// Directory to initialize (default: current)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Force overwrite existing configuration
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
        mode: None,
        open: false,
    }) {
        Commands::Serve { host, port, mode, open } => {
            let mut config = AppConfig::load(&cli.config)?;
            if let Some(host) = host {
                config.web.host = host;
            }
            if let Some(port) = port {
                config.web.port = port;
            }
            if let Some(mode) = mode {
                config.annotation.mode = mode;
            }
            run_serve(config, open).await
        }
        Commands::Catalog => {
            let config = AppConfig::load(&cli.config)?;
            for entry in config.catalog.entries() {
                println!("{}: {}", entry.name, entry.description);
            }
            Ok(())
        }
        Commands::Init { dir, force } => run_init(dir, force),
    }
}

async fn run_serve(config: AppConfig, open: bool) -> Result<()> {
    info!("Document Annotator v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Label mode: {}, {} catalog entries",
        config.annotation.mode.as_str(),
        config.catalog.len()
    );

    if open {
        let url = format!("http://{}:{}", config.web.host, config.web.port);
        if let Err(e) = open_browser(&url) {
            error!("Failed to open browser: {}", e);
        }
    }

    doc_annotator::web::start_server(config).await
}

fn run_init(dir: Option<PathBuf>, force: bool) -> Result<()> {
    let target = dir.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&target)?;

    let config_path = target.join("config.json");
    if config_path.exists() && !force {
        return Err(AnnotatorError::Config(format!(
            "{:?} already exists, use --force to overwrite",
            config_path
        )));
    }

    AppConfig::default().save(&config_path)?;
    println!("Wrote default configuration to {:?}", config_path);
    Ok(())
}

fn open_browser(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()?;
    }
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_serve() {
        let cli = Cli::try_parse_from(["doc-annotator"]).unwrap();
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("config.json"));
    }

    #[test]
    fn test_cli_serve_overrides() {
        let cli = Cli::try_parse_from([
            "doc-annotator", "serve", "--port", "9000", "--mode", "single", "-H", "0.0.0.0"
        ]).unwrap();

        match cli.command {
            Some(Commands::Serve { host, port, mode, open }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9000));
                assert_eq!(mode, Some(LabelMode::Single));
                assert!(!open);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["doc-annotator", "serve", "--mode", "both"]).is_err());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        run_init(Some(dir.path().to_path_buf()), false).unwrap();
        assert!(dir.path().join("config.json").exists());

        let err = run_init(Some(dir.path().to_path_buf()), false).unwrap_err();
        assert!(matches!(err, AnnotatorError::Config(_)));
        run_init(Some(dir.path().to_path_buf()), true).unwrap();
    }
}

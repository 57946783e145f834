mod config;
mod fs;
mod http;
mod server;

use std::process;
use std::sync::Arc;

use clap::Parser;

use config::ServerConfig;
use http::mime::MimeMap;
use server::ServerState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = ServerConfig::parse();

    if !cfg.root.is_dir() {
        tracing::error!(
            root = %cfg.root.display(),
            "web root does not exist or is not a directory"
        );
        process::exit(2);
    }

    let mime = match &cfg.mime_map {
        Some(path) => match MimeMap::from_file(path) {
            Ok(map) => map,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load MIME map");
                process::exit(2);
            }
        },
        None => MimeMap::new(),
    };

    tracing::info!(port = cfg.port, "staticd starting");
    tracing::info!(root = %cfg.root.display(), "web root");

    let listener = match server::listener::bind(cfg.listen_addr()) {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "failed to set up listening socket");
            process::exit(2);
        }
    };

    let state = Arc::new(ServerState { config: cfg, mime });

    tokio::select! {
        res = server::listener::serve(listener, state) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

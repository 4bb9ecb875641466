//! Preview server command.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use tower_http::services::ServeDir;

use crate::config::load_config;

/// Run the serve command.
pub async fn run(config_path: &Path, port: u16, dir: Option<PathBuf>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => load_config(config_path)?.site_config(None, None).paths()?.site_dir,
    };

    if !dir.join("index.html").is_file() {
        anyhow::bail!(
            "No showcase index in {}. Run 'showcase build' to assemble the site.",
            dir.display()
        );
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    let app = Router::new().fallback_service(ServeDir::new(&dir));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let url = format!("http://{}", addr);
    tracing::info!("Showcase at {} (serving {})", url, dir.display());
    if let Err(e) = open::that(&url) {
        tracing::debug!("Could not open a browser: {}", e);
    }

    axum::serve(listener, app).await?;

    Ok(())
}

//! folio save server.
//!
//! Serves the site's static files and accepts `POST /api/save` from the
//! content editor. Configured through `folio.toml` (or `$FOLIO_CONFIG`).

use anyhow::Result;

use folio_server::{SaveServer, ServerState};
use folio_types::config::FolioConfig;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = FolioConfig::from_env()?;
    let state = ServerState::new(
        config.projects_path.clone(),
        config.server.static_root.clone(),
    );
    let server = SaveServer::bind(("0.0.0.0", config.server.port), state).await?;
    log::info!(
        "Server running at http://localhost:{}",
        server.local_addr()?.port()
    );
    log::info!("Saving projects to {}", config.projects_path.display());
    server.run().await?;
    Ok(())
}

//! Backend: serves the dashboard page and proxies Prism Central.

pub mod cluster_cache;
pub mod error;
pub mod limiter;
pub mod prism;
pub mod routes;
pub mod session;
pub mod templates;

pub use error::ServerError;
pub use prism::{PrismClient, VmSource};
pub use routes::{AppState, router};

use crate::config::ServerConfig;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

/// Binds `bind` and serves until the process is stopped.
pub async fn serve(config: ServerConfig, bind: SocketAddr) -> Result<(), Box<dyn Error>> {
    let vms = PrismClient::new(&config)?;
    log::info!(
        "Serving VM dashboard on http://{} ({} profile, Prism Central {})",
        bind,
        config.profile,
        config.prism.host
    );

    let state = AppState::new(Arc::new(config), Arc::new(vms));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app).await?;
    Ok(())
}

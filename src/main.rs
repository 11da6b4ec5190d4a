#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use folio::storage::{resolve_port, resolve_site_dir};
    use folio::{router, ServerState};
    use std::net::SocketAddr;
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let site_dir = resolve_site_dir();
    if !site_dir.is_dir() {
        warn!("site directory {} does not exist", site_dir.display());
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], resolve_port()));
    info!("serving {} on http://{addr}", site_dir.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(ServerState::new(site_dir)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

// The browser build starts from `folio::browser::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}

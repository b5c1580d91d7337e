mod config;
mod errors;
mod routes;
mod site;
mod state;
mod timestamp;

use std::net::SocketAddr;

use anyhow::{bail, Context, Result};
use chrono::Local;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::site::{load_site, MissingBinding};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cgdb site v{}", env!("CARGO_PKG_VERSION"));

    // Load page content and layout
    let site = load_site(&config.content_dir).with_context(|| {
        format!(
            "failed to load site content from {}",
            config.content_dir.display()
        )
    })?;

    let state = AppState::new(site, &config);
    check_bindings(&state)?;
    info!(
        "Serving release version {}",
        state.version().unwrap_or("(unset)")
    );

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::new(config.bind_addr, config.port);
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Refuses to start when any template references a placeholder nothing binds,
/// so a broken deploy fails here instead of on the first request.
fn check_bindings(state: &AppState) -> Result<()> {
    let mut missing = state.site.missing_bindings(&state.bindings);
    missing.extend(
        state
            .site
            .missing_not_found_bindings(&state.not_found_bindings(&Local::now())),
    );

    for MissingBinding { page, name } in &missing {
        error!("Page '{page}' references unbound placeholder '{name}'");
    }
    if !missing.is_empty() {
        bail!("{} unbound placeholder(s) in site content", missing.len());
    }
    Ok(())
}

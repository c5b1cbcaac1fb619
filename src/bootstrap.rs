use adapter::database::connect_database_with;
use anyhow::Result;
use api::{middleware::RateLimiter, route::routes};
use axum::Router;
use registry::{AppRegistry, AppRegistryImpl};
use shared::config::AppConfig;
use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

pub async fn run() -> Result<()> {
    init_logger()?;

    let app_config = AppConfig::new()?;
    let pool = connect_database_with(&app_config.database);
    let registry: AppRegistry = Arc::new(AppRegistryImpl::new(pool));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let limiter = RateLimiter::new(&app_config.rate_limit);
    let app: Router = routes(limiter)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(registry);

    let addr = SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), app_config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(anyhow::Error::from)
}

fn init_logger() -> Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}

use journal_app::{AppState, load_store, resolve_data_dir, router};
use std::{env, net::SocketAddr};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_dir = resolve_data_dir();
    fs::create_dir_all(&data_dir).await?;

    let year = env::var("JOURNAL_YEAR")
        .ok()
        .and_then(|value| value.parse::<i32>().ok())
        .unwrap_or(2026);

    let store = load_store(&data_dir).await;
    let state = AppState::new(data_dir, store, year);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("tracking year {year}, listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

use time::UtcOffset;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use log_ingest_server::{
    app::App,
    config::ServerConfig,
    layers::{log_repo::LogRepoLayer, log_sink::LogSinkLayer},
    sinks::JsonFileSink,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Use UTC timestamps
    let offset = UtcOffset::UTC;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .flatten_event(true)
                .with_timer(fmt::time::OffsetTime::new(
                    offset,
                    time::format_description::well_known::Rfc3339,
                ))
                .with_level(true)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .with(EnvFilter::from_default_env())
        .try_init()?;

    let settings = ServerConfig::load()?;
    info!(
        msg = "Loaded configuration",
        bind_addr = %settings.server.bind_addr,
        log_file = %settings.logs.file_path
    );

    let file_sink = JsonFileSink::open(&settings.logs.file_path).await?;
    info!(msg = "Opened log file", path = %file_sink.path().display());

    let app = App::new()
        .router()
        .layer(LogSinkLayer::tracing_and_file(file_sink))
        .layer(LogRepoLayer::file(&settings.logs.file_path));

    let listener = tokio::net::TcpListener::bind(&settings.server.bind_addr).await?;

    info!(msg = "Starting server", addr = %settings.server.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

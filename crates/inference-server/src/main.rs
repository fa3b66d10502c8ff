use std::process::ExitCode;

use clap::Parser;
use eyre::Result;
use inference_server::adapter::Adapter;
use inference_server::adapters::dummy::DummyAdapter;
use inference_server::config::{self, Config};

/// Language-model inference server: request fan-in, micro-batched
/// execution, and fan-out over HTTP and websocket transports.
#[derive(Debug, Parser)]
#[command(version, about)]
struct CliArgs {}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let CliArgs {} = CliArgs::parse();

    config::init_tracing();

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(run())
}

async fn run() -> Result<ExitCode> {
    // The dummy echo adapter is this crate's only shipped `Adapter`; a real
    // deployment depends on `inference_server` as a library and swaps this
    // construction for its own adapter, selected by `LANGUAGE_MODEL`.
    let adapter = std::sync::Arc::new(DummyAdapter::new());
    let config = Config::from_env(&adapter.preferred_settings())?;

    tracing::info!(
        model = %config.language_model,
        threads = config.threads,
        batch_size = config.batch_size,
        "starting inference server"
    );

    let server = inference_server::build_server(adapter, &config)?;
    server.pool.startup().await;

    let listener = tokio::net::TcpListener::bind(server.bind_addr)
        .await
        .map_err(|source| inference_server::error::ServerError::Bind { addr: server.bind_addr, source })?;

    tracing::info!(addr = %server.bind_addr, "listening");

    let shutdown_pool = server.pool.clone();
    axum::serve(listener, server.router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
            shutdown_pool.shutdown().await;
        })
        .await?;

    Ok(ExitCode::SUCCESS)
}

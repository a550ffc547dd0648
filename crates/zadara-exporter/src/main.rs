use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use zadara_exporter::app;
use zadara_exporter::cli::{Cli, Command, ServerArgs};
use zadara_exporter::config::ExporterConfig;
use zadara_exporter::logging;
use zadara_exporter::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;

    let cli = Cli::parse();
    match cli.command {
        Command::Server(args) => run_server(args).await,
    }
}

async fn run_server(args: ServerArgs) -> Result<()> {
    let mut config = ExporterConfig::discover(args.config.as_deref())?;
    config.apply_overrides(args.listen_address, args.listen_path);
    config.validate()?;

    tracing::info!(
        listen_address = %config.listen_address,
        listen_path = %config.listen_path,
        targets = config.targets.len(),
        request_timeout_secs = config.request_timeout_secs,
        "zadara-exporter starting"
    );
    for target in &config.targets {
        tracing::info!(target_name = %target.name, url = %target.url, cloud_name = %target.cloud_name, "Configured target");
    }

    let shutdown = CancellationToken::new();
    let listen_address = config.listen_address.clone();
    let state = AppState::new(config, shutdown.clone())?;
    let app = app::build_http_app(state);

    let listener = tokio::net::TcpListener::bind(&listen_address).await?;
    tracing::info!(http = %listen_address, "Server started");

    let signal_token = shutdown.clone();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        wait_for_signal().await;
        tracing::info!("Shutting down gracefully");
        signal_token.cancel();
    });

    if let Err(e) = server.await {
        tracing::error!(error = %e, "HTTP server error");
        shutdown.cancel();
        return Err(e.into());
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

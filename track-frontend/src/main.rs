use dotenvy::dotenv;
use tokio::signal;
use track_core::observability::init_tracing;
use track_frontend::config::get_configuration;
use track_frontend::services::init_metrics;
use track_frontend::startup::Application;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let settings = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("aiimtrack", &settings.telemetry);

    // Recorder must exist before the first request is measured
    init_metrics()?;

    let application = Application::build(settings)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start: {}", e))?;

    application.run_until(shutdown_signal()).await?;

    Ok(())
}

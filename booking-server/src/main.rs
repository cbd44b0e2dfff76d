use booking_server::{Config, LogNotifier, ServerState, setup_environment};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env, config, logging
    dotenv::dotenv().ok();
    let config = Config::from_env();
    setup_environment(&config)?;

    tracing::info!(
        environment = %config.environment,
        database = %config.database_path,
        "Lash booking server starting"
    );

    // 2. Database, notification worker, services
    let state = ServerState::initialize(&config, Arc::new(LogNotifier)).await?;

    // 3. Housekeeping until Ctrl-C
    let appointments = state.appointments.clone();
    let token = state.shutdown_token().clone();
    let housekeeping = tokio::spawn(async move {
        let mut tick = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = tick.tick() => appointments.prune_locks(),
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    state.shutdown().await;
    housekeeping.await?;
    Ok(())
}

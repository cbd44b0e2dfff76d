use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::appointments::AppointmentService;
use crate::core::Config;
use crate::db::DbService;
use crate::notify::{NotificationDispatcher, Notifier};
use shared::error::AppError;

/// Server state: shared handles to every service
///
/// Cheap to clone. The notification worker runs until [`ServerState::shutdown`].
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub appointments: Arc<AppointmentService>,
    shutdown: CancellationToken,
    worker: Arc<tokio::sync::Mutex<Option<JoinHandle<()>>>>,
}

impl ServerState {
    /// Open the database, start the notification worker, build the services
    pub async fn initialize(
        config: &Config,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppError> {
        config.ensure_work_dir_structure().map_err(|e| {
            AppError::with_message(
                shared::ErrorCode::ConfigError,
                format!("Failed to create work directory structure: {e}"),
            )
        })?;

        let db = DbService::new(&config.database_path).await?;
        Ok(Self::with_db(config.clone(), db, notifier))
    }

    /// Build on an already opened database (in-memory in tests)
    pub fn with_db(config: Config, db: DbService, notifier: Arc<dyn Notifier>) -> Self {
        let shutdown = CancellationToken::new();
        let (dispatcher, worker) = NotificationDispatcher::start(
            notifier,
            config.notify_queue_capacity,
            shutdown.child_token(),
        );
        let appointments = Arc::new(AppointmentService::new(
            db.clone(),
            dispatcher,
            config.slot_minutes,
        ));

        tracing::debug!(
            slot_minutes = config.slot_minutes,
            queue = config.notify_queue_capacity,
            "Server state initialized"
        );

        Self {
            config,
            db,
            appointments,
            shutdown,
            worker: Arc::new(tokio::sync::Mutex::new(Some(worker))),
        }
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }

    /// Stop the notification worker after it drains the queue
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        if let Some(handle) = self.worker.lock().await.take()
            && let Err(e) = handle.await
        {
            tracing::error!(error = %e, "Notification worker panicked");
        }
        self.db.pool.close().await;
        tracing::info!("Server state shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::LogNotifier;

    #[tokio::test]
    async fn test_initialize_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("database").join("booking.db");
        let config = Config::with_overrides(
            dir.path().to_string_lossy(),
            db_path.to_string_lossy(),
        );

        let state = ServerState::initialize(&config, Arc::new(LogNotifier)).await.unwrap();
        assert!(db_path.exists());
        state.shutdown().await;
        assert!(state.shutdown_token().is_cancelled());
    }
}

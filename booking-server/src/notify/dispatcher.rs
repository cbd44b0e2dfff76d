//! Fire-and-forget notification queue

use super::{Notification, Notifier};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle for queueing notifications
///
/// `dispatch` never waits and never fails the caller: a full or closed queue
/// is logged and the notice is dropped.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    tx: mpsc::Sender<Notification>,
}

impl NotificationDispatcher {
    /// Spawn the delivery worker
    pub fn start(
        notifier: Arc<dyn Notifier>,
        capacity: usize,
        shutdown: CancellationToken,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let worker = DispatchWorker {
            rx,
            notifier,
            shutdown,
        };
        let handle = tokio::spawn(worker.run());
        (Self { tx }, handle)
    }

    pub fn dispatch(&self, notification: Notification) {
        match self.tx.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(n)) => {
                tracing::warn!(
                    appointment_id = n.appointment_id,
                    kind = ?n.kind,
                    "Notification queue full, dropping notice"
                );
            }
            Err(TrySendError::Closed(n)) => {
                tracing::error!(
                    appointment_id = n.appointment_id,
                    kind = ?n.kind,
                    "Notification worker stopped, dropping notice"
                );
            }
        }
    }
}

struct DispatchWorker {
    rx: mpsc::Receiver<Notification>,
    notifier: Arc<dyn Notifier>,
    shutdown: CancellationToken,
}

impl DispatchWorker {
    async fn run(mut self) {
        tracing::debug!("Notification worker started");

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    // Deliver what is already queued, then stop
                    self.rx.close();
                    while let Some(n) = self.rx.recv().await {
                        self.deliver(n).await;
                    }
                    tracing::info!("Notification worker shutting down");
                    break;
                }

                next = self.rx.recv() => {
                    match next {
                        Some(n) => self.deliver(n).await,
                        None => {
                            tracing::debug!("All dispatchers dropped, notification worker exiting");
                            break;
                        }
                    }
                }
            }
        }
    }

    async fn deliver(&self, n: Notification) {
        if let Err(e) = self.notifier.deliver(&n).await {
            tracing::warn!(
                appointment_id = n.appointment_id,
                kind = ?n.kind,
                recipient = n.recipient.user_id,
                error = %e,
                "Notification delivery failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NotificationKind, NotifyError, Recipient};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use shared::models::{TimeOfDay, UserRole};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<i64>>);

    #[async_trait]
    impl Notifier for Recording {
        async fn deliver(&self, n: &Notification) -> Result<(), NotifyError> {
            self.0.lock().unwrap().push(n.appointment_id);
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl Notifier for Failing {
        async fn deliver(&self, _: &Notification) -> Result<(), NotifyError> {
            Err(NotifyError::Delivery("smtp down".into()))
        }
    }

    fn notice(id: i64) -> Notification {
        Notification {
            kind: NotificationKind::NewAppointment,
            recipient: Recipient {
                user_id: 1,
                role: UserRole::Provider,
            },
            email: false,
            appointment_id: id,
            provider_id: 1,
            client_id: 2,
            service_name: "Classic".into(),
            appointment_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            start_time: TimeOfDay::parse("10:00").unwrap(),
            service_price: 40.0,
            deposit_amount: 40.0,
            configured_deposit: None,
            cancellation_reason: None,
        }
    }

    #[tokio::test]
    async fn test_queued_notices_delivered_before_shutdown() {
        let recorder = Arc::new(Recording::default());
        let token = CancellationToken::new();
        let (dispatcher, handle) =
            NotificationDispatcher::start(recorder.clone(), 16, token.clone());

        for id in 1..=3 {
            dispatcher.dispatch(notice(id));
        }
        token.cancel();
        handle.await.unwrap();

        assert_eq!(*recorder.0.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failing_notifier_does_not_stop_worker() {
        let token = CancellationToken::new();
        let (dispatcher, handle) =
            NotificationDispatcher::start(Arc::new(Failing), 4, token.clone());
        dispatcher.dispatch(notice(1));
        dispatcher.dispatch(notice(2));
        token.cancel();
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn test_dispatch_after_shutdown_is_silent() {
        let token = CancellationToken::new();
        let (dispatcher, handle) =
            NotificationDispatcher::start(Arc::new(Recording::default()), 1, token.clone());
        token.cancel();
        handle.await.unwrap();
        dispatcher.dispatch(notice(9));
    }
}

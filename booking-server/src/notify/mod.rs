//! Appointment notifications
//!
//! The lifecycle decides *whether* and *to whom* a notice goes; delivery is
//! behind the [`Notifier`] trait. Notices are queued through the
//! [`NotificationDispatcher`] and never fail the operation that produced them.

mod dispatcher;

pub use dispatcher::NotificationDispatcher;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{Appointment, TimeOfDay, UserRole};
use thiserror::Error;
use tokio::sync::broadcast;

/// What happened to the appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewAppointment,
    DepositUploaded,
    Confirmed,
    Cancelled,
}

/// Participant a notice is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub user_id: i64,
    pub role: UserRole,
}

/// Decision made by the lifecycle: kind, addressee, channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationPlan {
    pub kind: NotificationKind,
    pub recipient: Recipient,
    /// Also send by email when the recipient has an address on file
    pub email: bool,
}

/// Self-contained notice handed to a [`Notifier`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub recipient: Recipient,
    pub email: bool,
    pub appointment_id: i64,
    pub provider_id: i64,
    pub client_id: i64,
    pub service_name: String,
    pub appointment_date: NaiveDate,
    pub start_time: TimeOfDay,
    pub service_price: f64,
    /// Deposit quoted in the confirmation notice
    ///
    /// Always the service price. The provider profile deposit travels
    /// separately in `configured_deposit` for delivery layers that prefer it.
    pub deposit_amount: f64,
    /// Deposit configured on the provider profile, when one exists
    pub configured_deposit: Option<f64>,
    pub cancellation_reason: Option<String>,
}

impl Notification {
    pub fn from_plan(plan: NotificationPlan, appointment: &Appointment) -> Self {
        Self {
            kind: plan.kind,
            recipient: plan.recipient,
            email: plan.email,
            appointment_id: appointment.id,
            provider_id: appointment.provider_id,
            client_id: appointment.client_id,
            service_name: appointment.service_name.clone(),
            appointment_date: appointment.appointment_date,
            start_time: appointment.start_time,
            service_price: appointment.service_price,
            deposit_amount: appointment.service_price,
            configured_deposit: None,
            cancellation_reason: appointment.cancellation_reason.clone(),
        }
    }

    pub fn with_configured_deposit(mut self, amount: Option<f64>) -> Self {
        self.configured_deposit = amount;
        self
    }
}

/// Delivery failure, logged by the dispatcher
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("No subscriber is listening for notifications")]
    NoSubscribers,

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Outbound delivery (message, email, push...)
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn deliver(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Writes every notice to the log
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, n: &Notification) -> Result<(), NotifyError> {
        tracing::info!(
            target: "notification",
            kind = ?n.kind,
            appointment_id = n.appointment_id,
            recipient = n.recipient.user_id,
            role = %n.recipient.role,
            date = %n.appointment_date,
            start = %n.start_time,
            email = n.email,
            "Notification"
        );
        Ok(())
    }
}

/// Fans notices out on a tokio broadcast channel for delivery workers
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl Notifier for BroadcastNotifier {
    async fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.tx
            .send(notification.clone())
            .map(|_| ())
            .map_err(|_| NotifyError::NoSubscribers)
    }
}

//! Appointment state machine
//!
//! ```text
//! pending ──upload proof──▶ payment_pending ──confirm──▶ confirmed ──complete──▶ completed
//! pending ──confirm──▶ confirmed
//! pending | payment_pending | confirmed ──reject──▶ cancelled
//! pending | payment_pending | confirmed ──cancel──▶ cancelled
//! ```
//!
//! `cancelled` and `completed` are terminal. The state machine is pure: it
//! returns the target status and the notice to send, and the service layer
//! persists and dispatches.

use super::error::BookingError;
use crate::auth::Actor;
use crate::notify::{NotificationKind, NotificationPlan, Recipient};
use shared::models::{Appointment, AppointmentStatus, UserRole};
use std::fmt;

/// Reason recorded when a participant cancels without giving one
pub const DEFAULT_CANCEL_REASON: &str = "Cancelled by user";

/// Transition requested on an existing appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    UploadDepositProof,
    Confirm,
    Cancel,
    Reject,
    Complete,
}

impl LifecycleEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UploadDepositProof => "upload a deposit proof for",
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::Reject => "reject",
            Self::Complete => "complete",
        }
    }

    /// Stable snake_case name
    pub fn code(self) -> &'static str {
        match self {
            Self::UploadDepositProof => "upload_deposit_proof",
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::Reject => "reject",
            Self::Complete => "complete",
        }
    }

    /// Side of the appointment allowed to fire this event; `None` means either
    fn required_side(self) -> Option<UserRole> {
        match self {
            Self::UploadDepositProof => Some(UserRole::Client),
            Self::Confirm | Self::Reject | Self::Complete => Some(UserRole::Provider),
            Self::Cancel => None,
        }
    }

    fn allowed_from(self) -> &'static [AppointmentStatus] {
        use AppointmentStatus::*;
        match self {
            Self::UploadDepositProof => &[Pending],
            Self::Confirm => &[Pending, PaymentPending],
            Self::Cancel | Self::Reject => &[Pending, PaymentPending, Confirmed],
            Self::Complete => &[Confirmed],
        }
    }

    fn target(self) -> AppointmentStatus {
        match self {
            Self::UploadDepositProof => AppointmentStatus::PaymentPending,
            Self::Confirm => AppointmentStatus::Confirmed,
            Self::Cancel | Self::Reject => AppointmentStatus::Cancelled,
            Self::Complete => AppointmentStatus::Completed,
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a permitted transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: AppointmentStatus,
    pub to: AppointmentStatus,
    pub notify: Option<NotificationPlan>,
}

fn provider_of(appointment: &Appointment) -> Recipient {
    Recipient {
        user_id: appointment.provider_id,
        role: UserRole::Provider,
    }
}

fn client_of(appointment: &Appointment) -> Recipient {
    Recipient {
        user_id: appointment.client_id,
        role: UserRole::Client,
    }
}

/// Which side of `appointment` the actor is on, given their role
fn side_of(appointment: &Appointment, actor: &Actor) -> Option<UserRole> {
    match actor.role {
        UserRole::Provider if appointment.provider_id == actor.user_id => Some(UserRole::Provider),
        UserRole::Client if appointment.client_id == actor.user_id => Some(UserRole::Client),
        _ => None,
    }
}

/// Notice sent to the provider when a client books
pub fn creation_notice(appointment: &Appointment) -> NotificationPlan {
    NotificationPlan {
        kind: NotificationKind::NewAppointment,
        recipient: provider_of(appointment),
        email: false,
    }
}

/// Validate `event` on `appointment` by `actor`
///
/// Checks run in this order: participant, terminal status, role for the
/// event, source status.
pub fn transition(
    appointment: &Appointment,
    event: LifecycleEvent,
    actor: &Actor,
) -> Result<Transition, BookingError> {
    if !appointment.is_participant(actor.user_id) {
        return Err(BookingError::Forbidden(
            "Not a participant of this appointment".into(),
        ));
    }

    let from = appointment.status;
    if from.is_terminal() {
        return Err(BookingError::InvalidTransition { from, event });
    }

    let side = side_of(appointment, actor).ok_or_else(|| {
        BookingError::Forbidden(format!(
            "Role {} does not match this appointment",
            actor.role
        ))
    })?;
    if let Some(required) = event.required_side()
        && required != side
    {
        return Err(BookingError::Forbidden(format!(
            "Only the {required} can {event} this appointment"
        )));
    }

    if !event.allowed_from().contains(&from) {
        return Err(BookingError::InvalidTransition { from, event });
    }

    let notify = match event {
        LifecycleEvent::UploadDepositProof => Some(NotificationPlan {
            kind: NotificationKind::DepositUploaded,
            recipient: provider_of(appointment),
            email: false,
        }),
        LifecycleEvent::Confirm => Some(NotificationPlan {
            kind: NotificationKind::Confirmed,
            recipient: client_of(appointment),
            email: true,
        }),
        LifecycleEvent::Cancel => Some(NotificationPlan {
            kind: NotificationKind::Cancelled,
            recipient: match side {
                UserRole::Provider => client_of(appointment),
                UserRole::Client => provider_of(appointment),
            },
            email: false,
        }),
        LifecycleEvent::Reject => Some(NotificationPlan {
            kind: NotificationKind::Cancelled,
            recipient: client_of(appointment),
            email: false,
        }),
        LifecycleEvent::Complete => None,
    };

    Ok(Transition {
        from,
        to: event.target(),
        notify,
    })
}

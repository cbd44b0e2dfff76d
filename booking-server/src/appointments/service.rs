//! Appointment Service
//!
//! Orchestrates booking and lifecycle operations: validation, the
//! per-calendar lock around check-and-insert, guarded status updates and
//! notification dispatch.

use super::error::{BookingError, BookingResult};
use super::lifecycle::{self, DEFAULT_CANCEL_REASON, LifecycleEvent};
use super::locks::CalendarLocks;
use crate::auth::Actor;
use crate::db::DbService;
use crate::db::repository::appointment::StatusPatch;
use crate::db::repository::{appointment, profile, schedule, service as service_repo};
use crate::notify::{Notification, NotificationDispatcher, NotificationKind};
use crate::scheduling::{self, blocking_intervals, day_availability, has_conflict};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{
    Appointment, AppointmentCreate, AppointmentQuery, AppointmentStatus, DayAvailability,
    Interval, MAX_NOTES_LEN, MAX_REASON_LEN, Page, TimeOfDay, UserRole,
};

/// Number of confirmed appointments in the public upcoming list
pub const UPCOMING_PUBLIC_LIMIT: i64 = 10;

/// Client booking request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub provider_id: i64,
    pub service_id: i64,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub notes: Option<String>,
}

impl BookingRequest {
    /// Build from raw `YYYY-MM-DD` and `HH:MM` strings
    pub fn parse(
        provider_id: i64,
        service_id: i64,
        date: &str,
        start_time: &str,
        notes: Option<String>,
    ) -> BookingResult<Self> {
        let date = scheduling::parse_date(date)?;
        let minutes = scheduling::to_minutes(start_time)?;
        let start_time = TimeOfDay::from_minutes(minutes).ok_or_else(|| {
            BookingError::InvalidFormat(format!("Invalid start time: {start_time}"))
        })?;
        Ok(Self {
            provider_id,
            service_id,
            date,
            start_time,
            notes,
        })
    }
}

fn validate_text(value: Option<&str>, max: usize, field: &str) -> BookingResult<()> {
    if let Some(v) = value
        && v.chars().count() > max
    {
        return Err(BookingError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Row change applied by a lifecycle event
enum Change {
    Status(StatusPatch),
    DepositProof(String),
}

/// Appointment booking and lifecycle
pub struct AppointmentService {
    db: DbService,
    locks: CalendarLocks,
    dispatcher: NotificationDispatcher,
    slot_minutes: u16,
}

impl AppointmentService {
    pub fn new(db: DbService, dispatcher: NotificationDispatcher, slot_minutes: u16) -> Self {
        Self {
            db,
            locks: CalendarLocks::new(),
            dispatcher,
            slot_minutes,
        }
    }

    pub fn db(&self) -> &DbService {
        &self.db
    }

    pub fn locks(&self) -> &CalendarLocks {
        &self.locks
    }

    // ==================== Booking ====================

    /// Create a `pending` appointment for the calling client
    pub async fn book(&self, actor: &Actor, req: BookingRequest) -> BookingResult<Appointment> {
        actor.require_role(UserRole::Client)?;
        validate_text(req.notes.as_deref(), MAX_NOTES_LEN, "Notes")?;

        let service = service_repo::find_by_id(&self.db.pool, req.service_id)
            .await?
            .filter(|s| s.provider_id == req.provider_id && s.is_active)
            .ok_or(BookingError::ServiceUnavailable(req.service_id))?;

        if !scheduling::is_after_today(req.date, scheduling::today()) {
            return Err(BookingError::InvalidFormat(format!(
                "Appointment date {} must be in the future",
                req.date
            )));
        }

        let interval = u16::try_from(service.duration)
            .ok()
            .and_then(|d| Interval::starting_at(req.start_time, d))
            .ok_or_else(|| {
                BookingError::InvalidFormat(format!(
                    "A {} minute appointment starting at {} would end after midnight",
                    service.duration, req.start_time
                ))
            })?;

        let created = {
            let _guard = self.locks.lock(req.provider_id, req.date).await;
            let mut tx = self.db.pool.begin().await?;

            let existing =
                appointment::find_blocking_for_day(&mut tx, req.provider_id, req.date).await?;
            if has_conflict(&interval, &blocking_intervals(&existing)) {
                tracing::info!(
                    provider_id = req.provider_id,
                    date = %req.date,
                    slot = %interval,
                    "Booking rejected: slot taken"
                );
                return Err(BookingError::SlotUnavailable {
                    date: req.date,
                    start: interval.start(),
                    end: interval.end(),
                });
            }

            let created = appointment::insert(
                &mut tx,
                AppointmentCreate {
                    provider_id: req.provider_id,
                    client_id: actor.user_id,
                    service_id: service.id,
                    service_name: service.name.clone(),
                    service_duration: service.duration,
                    service_price: service.price,
                    appointment_date: req.date,
                    start_time: interval.start(),
                    end_time: interval.end(),
                    notes: req.notes,
                },
            )
            .await?;
            tx.commit().await?;
            created
        };

        tracing::info!(
            appointment_id = created.id,
            provider_id = created.provider_id,
            client_id = created.client_id,
            date = %created.appointment_date,
            slot = %interval,
            "Appointment booked"
        );

        self.dispatcher.dispatch(Notification::from_plan(
            lifecycle::creation_notice(&created),
            &created,
        ));
        Ok(created)
    }

    /// Non-locking preview of whether `[start, start + duration)` is free
    pub async fn check_availability(
        &self,
        provider_id: i64,
        date: NaiveDate,
        start: TimeOfDay,
        duration: u16,
    ) -> BookingResult<bool> {
        let Some(candidate) = Interval::starting_at(start, duration) else {
            return Ok(false);
        };
        let mut conn = self.db.pool.acquire().await?;
        let existing = appointment::find_blocking_for_day(&mut conn, provider_id, date).await?;
        Ok(!has_conflict(&candidate, &blocking_intervals(&existing)))
    }

    /// Free slots of `provider_id` on `date`
    pub async fn availability(
        &self,
        provider_id: i64,
        date: NaiveDate,
    ) -> BookingResult<DayAvailability> {
        let weekday = scheduling::weekday_index(date);
        let hours = schedule::find_hours_for_day(&self.db.pool, provider_id, weekday).await?;
        if !hours.as_ref().is_some_and(|h| h.is_working) {
            return Ok(DayAvailability::not_working());
        }

        let breaks: Vec<Interval> = schedule::list_breaks(&self.db.pool, provider_id)
            .await?
            .iter()
            .filter_map(|b| b.interval())
            .collect();

        let booked = {
            let mut conn = self.db.pool.acquire().await?;
            let existing =
                appointment::find_blocking_for_day(&mut conn, provider_id, date).await?;
            blocking_intervals(&existing)
        };

        Ok(day_availability(
            hours.as_ref(),
            &breaks,
            &booked,
            self.slot_minutes,
        ))
    }

    // ==================== Lifecycle ====================

    pub async fn upload_deposit_proof(
        &self,
        actor: &Actor,
        id: i64,
        proof_ref: &str,
    ) -> BookingResult<Appointment> {
        if proof_ref.trim().is_empty() {
            return Err(BookingError::Validation("Deposit proof reference is required".into()));
        }
        self.apply(
            actor,
            id,
            LifecycleEvent::UploadDepositProof,
            Change::DepositProof(proof_ref.to_string()),
        )
        .await
    }

    pub async fn confirm(&self, actor: &Actor, id: i64) -> BookingResult<Appointment> {
        let change = Change::Status(StatusPatch::default());
        self.apply(actor, id, LifecycleEvent::Confirm, change).await
    }

    /// Provider declines a pending, payment-pending or confirmed appointment
    pub async fn reject(
        &self,
        actor: &Actor,
        id: i64,
        reason: Option<String>,
    ) -> BookingResult<Appointment> {
        validate_text(reason.as_deref(), MAX_REASON_LEN, "Reason")?;
        self.apply(
            actor,
            id,
            LifecycleEvent::Reject,
            Change::Status(StatusPatch {
                deposit_proof: None,
                cancellation_reason: reason,
            }),
        )
        .await
    }

    pub async fn cancel(
        &self,
        actor: &Actor,
        id: i64,
        reason: Option<String>,
    ) -> BookingResult<Appointment> {
        validate_text(reason.as_deref(), MAX_REASON_LEN, "Reason")?;
        let reason = reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CANCEL_REASON.to_string());
        self.apply(
            actor,
            id,
            LifecycleEvent::Cancel,
            Change::Status(StatusPatch {
                deposit_proof: None,
                cancellation_reason: Some(reason),
            }),
        )
        .await
    }

    pub async fn complete(&self, actor: &Actor, id: i64) -> BookingResult<Appointment> {
        let change = Change::Status(StatusPatch::default());
        self.apply(actor, id, LifecycleEvent::Complete, change).await
    }

    async fn load(&self, id: i64) -> BookingResult<Appointment> {
        appointment::find_by_id(&self.db.pool, id)
            .await?
            .ok_or_else(|| BookingError::appointment_not_found(id))
    }

    /// Load, validate, persist with a status guard, then notify
    async fn apply(
        &self,
        actor: &Actor,
        id: i64,
        event: LifecycleEvent,
        change: Change,
    ) -> BookingResult<Appointment> {
        let current = self.load(id).await?;
        let transition = lifecycle::transition(&current, event, actor)?;

        let pool = &self.db.pool;
        let updated = match change {
            Change::Status(patch) => {
                appointment::update_status(pool, id, transition.from, transition.to, patch).await?
            }
            Change::DepositProof(proof_ref) => {
                appointment::set_deposit_proof(pool, id, transition.from, &proof_ref).await?
            }
        };
        let updated = updated.ok_or_else(|| {
            tracing::warn!(
                appointment_id = id,
                event = event.code(),
                "Appointment changed concurrently"
            );
            BookingError::InvalidTransition {
                from: transition.from,
                event,
            }
        })?;

        tracing::info!(
            appointment_id = id,
            actor = actor.user_id,
            from = %transition.from,
            to = %transition.to,
            "Appointment transition"
        );

        if let Some(plan) = transition.notify {
            let mut notice = Notification::from_plan(plan, &updated);
            if plan.kind == NotificationKind::Confirmed {
                match profile::find(&self.db.pool, updated.provider_id).await {
                    Ok(p) => {
                        notice = notice.with_configured_deposit(p.map(|p| p.deposit_amount))
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to load provider profile for notice")
                    }
                }
            }
            self.dispatcher.dispatch(notice);
        }
        Ok(updated)
    }

    // ==================== Queries ====================

    /// Single appointment, visible to its participants only
    pub async fn get(&self, actor: &Actor, id: i64) -> BookingResult<Appointment> {
        let appt = self.load(id).await?;
        if !appt.is_participant(actor.user_id) {
            return Err(BookingError::Forbidden(
                "Not a participant of this appointment".into(),
            ));
        }
        Ok(appt)
    }

    pub async fn update_notes(
        &self,
        actor: &Actor,
        id: i64,
        notes: Option<String>,
    ) -> BookingResult<Appointment> {
        validate_text(notes.as_deref(), MAX_NOTES_LEN, "Notes")?;
        self.get(actor, id).await?;
        Ok(appointment::update_notes(&self.db.pool, id, notes.as_deref()).await?)
    }

    /// Appointments where the actor is client or provider, newest date first
    pub async fn list_for_user(
        &self,
        actor: &Actor,
        query: &AppointmentQuery,
    ) -> BookingResult<Page<Appointment>> {
        let (page, limit) = query.normalized();
        let items = appointment::list_for_participant(
            &self.db.pool,
            actor.user_id,
            query.status,
            i64::from(limit),
            query.offset(),
        )
        .await?;
        let total =
            appointment::count_for_participant(&self.db.pool, actor.user_id, query.status).await?;
        Ok(Page::new(items, page, limit, total))
    }

    /// The calling provider's calendar, optionally filtered by status and date
    pub async fn list_for_provider(
        &self,
        actor: &Actor,
        query: &AppointmentQuery,
    ) -> BookingResult<Page<Appointment>> {
        actor.require_role(UserRole::Provider)?;
        let (page, limit) = query.normalized();
        let items = appointment::list_for_provider(
            &self.db.pool,
            actor.user_id,
            query.status,
            query.date,
            i64::from(limit),
            query.offset(),
        )
        .await?;
        let total =
            appointment::count_for_provider(&self.db.pool, actor.user_id, query.status, query.date)
                .await?;
        Ok(Page::new(items, page, limit, total))
    }

    /// Next confirmed appointments of a provider, from today on
    pub async fn upcoming_public(&self, provider_id: i64) -> BookingResult<Vec<Appointment>> {
        Ok(appointment::upcoming_confirmed(
            &self.db.pool,
            provider_id,
            scheduling::today(),
            UPCOMING_PUBLIC_LIMIT,
        )
        .await?)
    }

    /// Drop lock entries for dates already in the past
    pub fn prune_locks(&self) {
        self.locks.prune_before(scheduling::today());
    }
}

impl std::fmt::Debug for AppointmentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppointmentService")
            .field("slot_minutes", &self.slot_minutes)
            .field("calendar_locks", &self.locks.len())
            .finish()
    }
}

//! Appointment Repository
//!
//! Status changes are guarded by the status the caller observed: the UPDATE
//! matches `id AND status = expected`, so a concurrent transition makes it
//! affect zero rows instead of overwriting.

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{Appointment, AppointmentCreate, AppointmentStatus};
use sqlx::{SqliteConnection, SqlitePool};

const APPOINTMENT_SELECT: &str = "SELECT id, provider_id, client_id, service_id, service_name, service_duration, service_price, appointment_date, start_time, end_time, status, deposit_proof, notes, cancellation_reason, created_at, updated_at FROM appointment";

/// Optional columns written together with a status change
#[derive(Debug, Clone, Default)]
pub struct StatusPatch {
    pub deposit_proof: Option<String>,
    pub cancellation_reason: Option<String>,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Appointment>> {
    let appointment =
        sqlx::query_as::<_, Appointment>(&format!("{APPOINTMENT_SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(appointment)
}

/// Calendar-blocking appointments of one provider on one date
pub async fn find_blocking_for_day(
    conn: &mut SqliteConnection,
    provider_id: i64,
    date: NaiveDate,
) -> RepoResult<Vec<Appointment>> {
    let [a, b, c] = AppointmentStatus::BLOCKING;
    let appointments = sqlx::query_as::<_, Appointment>(&format!(
        "{APPOINTMENT_SELECT} WHERE provider_id = ? AND appointment_date = ? AND status IN (?, ?, ?) ORDER BY start_time"
    ))
    .bind(provider_id)
    .bind(date)
    .bind(a)
    .bind(b)
    .bind(c)
    .fetch_all(&mut *conn)
    .await?;
    Ok(appointments)
}

/// Insert a new `pending` appointment
pub async fn insert(
    conn: &mut SqliteConnection,
    data: AppointmentCreate,
) -> RepoResult<Appointment> {
    if data.start_time >= data.end_time {
        return Err(RepoError::Validation(format!(
            "Appointment start {} must be before end {}",
            data.start_time, data.end_time
        )));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO appointment (id, provider_id, client_id, service_id, service_name, service_duration, service_price, appointment_date, start_time, end_time, status, notes, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)",
    )
    .bind(id)
    .bind(data.provider_id)
    .bind(data.client_id)
    .bind(data.service_id)
    .bind(&data.service_name)
    .bind(data.service_duration)
    .bind(data.service_price)
    .bind(data.appointment_date)
    .bind(data.start_time)
    .bind(data.end_time)
    .bind(AppointmentStatus::Pending)
    .bind(&data.notes)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    Ok(Appointment {
        id,
        provider_id: data.provider_id,
        client_id: data.client_id,
        service_id: data.service_id,
        service_name: data.service_name,
        service_duration: data.service_duration,
        service_price: data.service_price,
        appointment_date: data.appointment_date,
        start_time: data.start_time,
        end_time: data.end_time,
        status: AppointmentStatus::Pending,
        deposit_proof: None,
        notes: data.notes,
        cancellation_reason: None,
        created_at: now,
        updated_at: now,
    })
}

/// Move `id` from `expected` to `to`
///
/// Returns `None` when the row no longer has status `expected`.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    expected: AppointmentStatus,
    to: AppointmentStatus,
    patch: StatusPatch,
) -> RepoResult<Option<Appointment>> {
    let rows = sqlx::query(
        "UPDATE appointment SET status = ?1, deposit_proof = COALESCE(?2, deposit_proof), cancellation_reason = COALESCE(?3, cancellation_reason), updated_at = ?4 \
         WHERE id = ?5 AND status = ?6",
    )
    .bind(to)
    .bind(&patch.deposit_proof)
    .bind(&patch.cancellation_reason)
    .bind(shared::util::now_millis())
    .bind(id)
    .bind(expected)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}

/// Store the proof reference and move `expected` to `payment_pending`
pub async fn set_deposit_proof(
    pool: &SqlitePool,
    id: i64,
    expected: AppointmentStatus,
    proof_ref: &str,
) -> RepoResult<Option<Appointment>> {
    update_status(
        pool,
        id,
        expected,
        AppointmentStatus::PaymentPending,
        StatusPatch {
            deposit_proof: Some(proof_ref.to_string()),
            cancellation_reason: None,
        },
    )
    .await
}

pub async fn update_notes(
    pool: &SqlitePool,
    id: i64,
    notes: Option<&str>,
) -> RepoResult<Appointment> {
    let rows = sqlx::query("UPDATE appointment SET notes = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(notes)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Appointment {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Appointment {id} not found")))
}

/// Appointments where `user_id` is the client or the provider
pub async fn list_for_participant(
    pool: &SqlitePool,
    user_id: i64,
    status: Option<AppointmentStatus>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Appointment>> {
    let appointments = sqlx::query_as::<_, Appointment>(&format!(
        "{APPOINTMENT_SELECT} WHERE (client_id = ?1 OR provider_id = ?1) AND (?2 IS NULL OR status = ?2) \
         ORDER BY appointment_date DESC, start_time ASC LIMIT ?3 OFFSET ?4"
    ))
    .bind(user_id)
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(appointments)
}

pub async fn count_for_participant(
    pool: &SqlitePool,
    user_id: i64,
    status: Option<AppointmentStatus>,
) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM appointment WHERE (client_id = ?1 OR provider_id = ?1) AND (?2 IS NULL OR status = ?2)",
    )
    .bind(user_id)
    .bind(status)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn list_for_provider(
    pool: &SqlitePool,
    provider_id: i64,
    status: Option<AppointmentStatus>,
    date: Option<NaiveDate>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Appointment>> {
    let appointments = sqlx::query_as::<_, Appointment>(&format!(
        "{APPOINTMENT_SELECT} WHERE provider_id = ?1 AND (?2 IS NULL OR status = ?2) AND (?3 IS NULL OR appointment_date = ?3) \
         ORDER BY appointment_date DESC, start_time ASC LIMIT ?4 OFFSET ?5"
    ))
    .bind(provider_id)
    .bind(status)
    .bind(date)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(appointments)
}

pub async fn count_for_provider(
    pool: &SqlitePool,
    provider_id: i64,
    status: Option<AppointmentStatus>,
    date: Option<NaiveDate>,
) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM appointment WHERE provider_id = ?1 AND (?2 IS NULL OR status = ?2) AND (?3 IS NULL OR appointment_date = ?3)",
    )
    .bind(provider_id)
    .bind(status)
    .bind(date)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Confirmed appointments on or after `from`, soonest first
pub async fn upcoming_confirmed(
    pool: &SqlitePool,
    provider_id: i64,
    from: NaiveDate,
    limit: i64,
) -> RepoResult<Vec<Appointment>> {
    let appointments = sqlx::query_as::<_, Appointment>(&format!(
        "{APPOINTMENT_SELECT} WHERE provider_id = ? AND status = ? AND appointment_date >= ? \
         ORDER BY appointment_date ASC, start_time ASC LIMIT ?"
    ))
    .bind(provider_id)
    .bind(AppointmentStatus::Confirmed)
    .bind(from)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(appointments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::service;
    use shared::models::{ServiceCreate, TimeOfDay};

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 5, d).unwrap()
    }

    async fn setup() -> (DbService, i64) {
        let db = DbService::in_memory().await.unwrap();
        let svc = service::create(
            &db.pool,
            100,
            ServiceCreate {
                name: "Classic".into(),
                description: None,
                duration: 60,
                price: 45.0,
            },
        )
        .await
        .unwrap();
        (db, svc.id)
    }

    async fn book(
        db: &DbService,
        service_id: i64,
        client: i64,
        d: NaiveDate,
        start: &str,
        end: &str,
    ) -> Appointment {
        let mut conn = db.pool.acquire().await.unwrap();
        insert(
            &mut conn,
            AppointmentCreate {
                provider_id: 100,
                client_id: client,
                service_id,
                service_name: "Classic".into(),
                service_duration: 60,
                service_price: 45.0,
                appointment_date: d,
                start_time: t(start),
                end_time: t(end),
                notes: None,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let (db, sid) = setup().await;
        let appt = book(&db, sid, 1, date(6), "10:00", "11:00").await;
        let found = find_by_id(&db.pool, appt.id).await.unwrap().unwrap();
        assert_eq!(found.status, AppointmentStatus::Pending);
        assert_eq!(found.appointment_date, date(6));
        assert_eq!(found.start_time, t("10:00"));
        assert_eq!(found.end_time, t("11:00"));
    }

    #[tokio::test]
    async fn test_blocking_excludes_cancelled_and_other_days() {
        let (db, sid) = setup().await;
        let a = book(&db, sid, 1, date(6), "10:00", "11:00").await;
        book(&db, sid, 2, date(6), "12:00", "13:00").await;
        book(&db, sid, 3, date(7), "10:00", "11:00").await;
        update_status(
            &db.pool,
            a.id,
            AppointmentStatus::Pending,
            AppointmentStatus::Cancelled,
            StatusPatch::default(),
        )
        .await
        .unwrap()
        .unwrap();

        let mut conn = db.pool.acquire().await.unwrap();
        let blocking = find_blocking_for_day(&mut conn, 100, date(6)).await.unwrap();
        assert_eq!(blocking.len(), 1);
        assert_eq!(blocking[0].start_time, t("12:00"));
    }

    #[tokio::test]
    async fn test_status_guard_rejects_stale_update() {
        let (db, sid) = setup().await;
        let a = book(&db, sid, 1, date(6), "10:00", "11:00").await;

        let confirmed = update_status(
            &db.pool,
            a.id,
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            StatusPatch::default(),
        )
        .await
        .unwrap();
        assert_eq!(confirmed.unwrap().status, AppointmentStatus::Confirmed);

        let stale = update_status(
            &db.pool,
            a.id,
            AppointmentStatus::Pending,
            AppointmentStatus::Cancelled,
            StatusPatch::default(),
        )
        .await
        .unwrap();
        assert!(stale.is_none());
    }

    #[tokio::test]
    async fn test_set_deposit_proof() {
        let (db, sid) = setup().await;
        let a = book(&db, sid, 1, date(6), "10:00", "11:00").await;
        let updated = set_deposit_proof(
            &db.pool,
            a.id,
            AppointmentStatus::Pending,
            "uploads/proof-1.jpg",
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.status, AppointmentStatus::PaymentPending);
        assert_eq!(updated.deposit_proof.as_deref(), Some("uploads/proof-1.jpg"));

        // A second upload no longer matches the expected status
        let again = set_deposit_proof(
            &db.pool,
            a.id,
            AppointmentStatus::Pending,
            "uploads/proof-2.jpg",
        )
        .await
        .unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn test_listing_and_counts() {
        let (db, sid) = setup().await;
        book(&db, sid, 1, date(6), "10:00", "11:00").await;
        book(&db, sid, 1, date(8), "09:00", "10:00").await;
        book(&db, sid, 1, date(8), "08:00", "09:00").await;
        book(&db, sid, 2, date(8), "11:00", "12:00").await;

        let mine = list_for_participant(&db.pool, 1, None, 10, 0).await.unwrap();
        assert_eq!(mine.len(), 3);
        assert_eq!(mine[0].appointment_date, date(8));
        assert_eq!(mine[0].start_time, t("08:00"));
        assert_eq!(mine[2].appointment_date, date(6));
        assert_eq!(count_for_participant(&db.pool, 1, None).await.unwrap(), 3);

        let provider_day = list_for_provider(&db.pool, 100, None, Some(date(8)), 10, 0)
            .await
            .unwrap();
        assert_eq!(provider_day.len(), 3);
        assert_eq!(
            count_for_provider(&db.pool, 100, Some(AppointmentStatus::Pending), None)
                .await
                .unwrap(),
            4
        );
        assert_eq!(
            count_for_provider(&db.pool, 100, Some(AppointmentStatus::Confirmed), None)
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_upcoming_confirmed_ascending() {
        let (db, sid) = setup().await;
        let late = book(&db, sid, 1, date(9), "10:00", "11:00").await;
        let early = book(&db, sid, 2, date(7), "15:00", "16:00").await;
        let past = book(&db, sid, 3, date(2), "10:00", "11:00").await;
        for a in [&late, &early, &past] {
            update_status(
                &db.pool,
                a.id,
                AppointmentStatus::Pending,
                AppointmentStatus::Confirmed,
                StatusPatch::default(),
            )
            .await
            .unwrap();
        }
        let upcoming = upcoming_confirmed(&db.pool, 100, date(5), 10).await.unwrap();
        let ids: Vec<_> = upcoming.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[tokio::test]
    async fn test_update_notes() {
        let (db, sid) = setup().await;
        let a = book(&db, sid, 1, date(6), "10:00", "11:00").await;
        let updated = update_notes(&db.pool, a.id, Some("Sensitive eyes")).await.unwrap();
        assert_eq!(updated.notes.as_deref(), Some("Sensitive eyes"));
        assert!(matches!(
            update_notes(&db.pool, 42, None).await,
            Err(RepoError::NotFound(_))
        ));
    }
}

//! Working Hours and Break Repository

use super::{RepoError, RepoResult};
use shared::models::{Break, BreakCreate, WorkingHours, WorkingHoursUpsert};
use sqlx::SqlitePool;

const HOURS_SELECT: &str =
    "SELECT provider_id, day, start_time, end_time, is_working FROM working_hours";
const BREAK_SELECT: &str =
    "SELECT id, provider_id, start_time, end_time, description FROM schedule_break";

// ==================== Working hours ====================

/// Insert or replace the row for `data.day`
pub async fn upsert_hours(
    pool: &SqlitePool,
    provider_id: i64,
    data: WorkingHoursUpsert,
) -> RepoResult<WorkingHours> {
    if data.day > 6 {
        return Err(RepoError::Validation(format!(
            "Weekday must be 0..=6: {}",
            data.day
        )));
    }
    if data.start_time >= data.end_time {
        return Err(RepoError::Validation(format!(
            "Working hours start {} must be before end {}",
            data.start_time, data.end_time
        )));
    }

    sqlx::query(
        "INSERT INTO working_hours (provider_id, day, start_time, end_time, is_working) VALUES (?1, ?2, ?3, ?4, ?5) \
         ON CONFLICT (provider_id, day) DO UPDATE SET start_time = excluded.start_time, end_time = excluded.end_time, is_working = excluded.is_working",
    )
    .bind(provider_id)
    .bind(data.day)
    .bind(data.start_time)
    .bind(data.end_time)
    .bind(data.is_working)
    .execute(pool)
    .await?;

    find_hours_for_day(pool, provider_id, data.day)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to upsert working hours".into()))
}

pub async fn find_hours_for_day(
    pool: &SqlitePool,
    provider_id: i64,
    day: u8,
) -> RepoResult<Option<WorkingHours>> {
    let hours = sqlx::query_as::<_, WorkingHours>(&format!(
        "{HOURS_SELECT} WHERE provider_id = ? AND day = ?"
    ))
    .bind(provider_id)
    .bind(day)
    .fetch_optional(pool)
    .await?;
    Ok(hours)
}

pub async fn list_hours(pool: &SqlitePool, provider_id: i64) -> RepoResult<Vec<WorkingHours>> {
    let hours = sqlx::query_as::<_, WorkingHours>(&format!(
        "{HOURS_SELECT} WHERE provider_id = ? ORDER BY day"
    ))
    .bind(provider_id)
    .fetch_all(pool)
    .await?;
    Ok(hours)
}

// ==================== Breaks ====================

pub async fn create_break(
    pool: &SqlitePool,
    provider_id: i64,
    data: BreakCreate,
) -> RepoResult<Break> {
    if data.start_time >= data.end_time {
        return Err(RepoError::Validation(format!(
            "Break start {} must be before end {}",
            data.start_time, data.end_time
        )));
    }

    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO schedule_break (id, provider_id, start_time, end_time, description) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(provider_id)
    .bind(data.start_time)
    .bind(data.end_time)
    .bind(&data.description)
    .execute(pool)
    .await?;

    Ok(Break {
        id,
        provider_id,
        start_time: data.start_time,
        end_time: data.end_time,
        description: data.description,
    })
}

pub async fn list_breaks(pool: &SqlitePool, provider_id: i64) -> RepoResult<Vec<Break>> {
    let breaks = sqlx::query_as::<_, Break>(&format!(
        "{BREAK_SELECT} WHERE provider_id = ? ORDER BY start_time"
    ))
    .bind(provider_id)
    .fetch_all(pool)
    .await?;
    Ok(breaks)
}

pub async fn delete_break(pool: &SqlitePool, provider_id: i64, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM schedule_break WHERE id = ? AND provider_id = ?")
        .bind(id)
        .bind(provider_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Break {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::TimeOfDay;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_keeps_one_row_per_day() {
        let db = DbService::in_memory().await.unwrap();
        for (start, end) in [("09:00", "17:00"), ("10:00", "18:00")] {
            upsert_hours(
                &db.pool,
                1,
                WorkingHoursUpsert {
                    day: 2,
                    start_time: t(start),
                    end_time: t(end),
                    is_working: true,
                },
            )
            .await
            .unwrap();
        }
        let all = list_hours(&db.pool, 1).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].start_time, t("10:00"));
        assert_eq!(all[0].end_time, t("18:00"));
    }

    #[tokio::test]
    async fn test_upsert_validates() {
        let db = DbService::in_memory().await.unwrap();
        let bad_day = upsert_hours(
            &db.pool,
            1,
            WorkingHoursUpsert {
                day: 7,
                start_time: t("09:00"),
                end_time: t("17:00"),
                is_working: true,
            },
        )
        .await;
        assert!(matches!(bad_day, Err(RepoError::Validation(_))));

        let inverted = upsert_hours(
            &db.pool,
            1,
            WorkingHoursUpsert {
                day: 1,
                start_time: t("17:00"),
                end_time: t("09:00"),
                is_working: true,
            },
        )
        .await;
        assert!(matches!(inverted, Err(RepoError::Validation(_))));
    }

    #[tokio::test]
    async fn test_break_crud() {
        let db = DbService::in_memory().await.unwrap();
        let lunch = create_break(
            &db.pool,
            1,
            BreakCreate {
                start_time: t("12:00"),
                end_time: t("13:00"),
                description: "Lunch".into(),
            },
        )
        .await
        .unwrap();
        create_break(
            &db.pool,
            1,
            BreakCreate {
                start_time: t("10:00"),
                end_time: t("10:15"),
                description: String::new(),
            },
        )
        .await
        .unwrap();

        let breaks = list_breaks(&db.pool, 1).await.unwrap();
        assert_eq!(breaks.len(), 2);
        assert_eq!(breaks[0].start_time, t("10:00"));

        delete_break(&db.pool, 1, lunch.id).await.unwrap();
        assert_eq!(list_breaks(&db.pool, 1).await.unwrap().len(), 1);
        assert!(matches!(
            delete_break(&db.pool, 1, lunch.id).await,
            Err(RepoError::NotFound(_))
        ));
    }
}

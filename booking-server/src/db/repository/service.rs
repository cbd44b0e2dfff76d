//! Service Repository

use super::{RepoError, RepoResult};
use shared::models::{MIN_SERVICE_DURATION, Service, ServiceCreate};
use sqlx::SqlitePool;

const SERVICE_SELECT: &str = "SELECT id, provider_id, name, description, duration, price, is_active, created_at, updated_at FROM service";

fn validate(data: &ServiceCreate) -> RepoResult<()> {
    if data.name.trim().is_empty() {
        return Err(RepoError::Validation("Service name cannot be empty".into()));
    }
    if data.duration < MIN_SERVICE_DURATION {
        return Err(RepoError::Validation(format!(
            "Service duration must be at least {MIN_SERVICE_DURATION} minutes: {}",
            data.duration
        )));
    }
    if data.price < 0.0 || !data.price.is_finite() {
        return Err(RepoError::Validation(format!(
            "Service price cannot be negative: {}",
            data.price
        )));
    }
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Service>> {
    let service = sqlx::query_as::<_, Service>(&format!("{SERVICE_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(service)
}

pub async fn create(
    pool: &SqlitePool,
    provider_id: i64,
    data: ServiceCreate,
) -> RepoResult<Service> {
    validate(&data)?;

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO service (id, provider_id, name, description, duration, price, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?7)",
    )
    .bind(id)
    .bind(provider_id)
    .bind(data.name.trim())
    .bind(&data.description)
    .bind(data.duration)
    .bind(data.price)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create service".into()))
}

pub async fn list_active_for_provider(
    pool: &SqlitePool,
    provider_id: i64,
) -> RepoResult<Vec<Service>> {
    let services = sqlx::query_as::<_, Service>(&format!(
        "{SERVICE_SELECT} WHERE provider_id = ? AND is_active = 1 ORDER BY name"
    ))
    .bind(provider_id)
    .fetch_all(pool)
    .await?;
    Ok(services)
}

/// Activate or retire a service; retired services stay on past appointments
pub async fn set_active(
    pool: &SqlitePool,
    provider_id: i64,
    id: i64,
    is_active: bool,
) -> RepoResult<Service> {
    let rows = sqlx::query(
        "UPDATE service SET is_active = ?1, updated_at = ?2 WHERE id = ?3 AND provider_id = ?4",
    )
    .bind(is_active)
    .bind(shared::util::now_millis())
    .bind(id)
    .bind(provider_id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Service {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Service {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn payload(duration: i64, price: f64) -> ServiceCreate {
        ServiceCreate {
            name: "Volume set".into(),
            description: Some("Russian volume".into()),
            duration,
            price,
        }
    }

    #[tokio::test]
    async fn test_create_and_retire() {
        let db = DbService::in_memory().await.unwrap();
        let svc = create(&db.pool, 7, payload(90, 65.0)).await.unwrap();
        assert!(svc.is_active);
        assert_eq!(svc.duration, 90);

        let listed = list_active_for_provider(&db.pool, 7).await.unwrap();
        assert_eq!(listed.len(), 1);

        let retired = set_active(&db.pool, 7, svc.id, false).await.unwrap();
        assert!(!retired.is_active);
        assert!(list_active_for_provider(&db.pool, 7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_short_or_negative() {
        let db = DbService::in_memory().await.unwrap();
        assert!(matches!(
            create(&db.pool, 7, payload(10, 20.0)).await,
            Err(RepoError::Validation(_))
        ));
        assert!(matches!(
            create(&db.pool, 7, payload(30, -1.0)).await,
            Err(RepoError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_set_active_other_provider_is_not_found() {
        let db = DbService::in_memory().await.unwrap();
        let svc = create(&db.pool, 7, payload(30, 20.0)).await.unwrap();
        assert!(matches!(
            set_active(&db.pool, 8, svc.id, false).await,
            Err(RepoError::NotFound(_))
        ));
    }
}

//! Provider Profile Repository

use super::{RepoError, RepoResult};
use shared::models::{ProviderProfile, ProviderProfileUpsert};
use sqlx::SqlitePool;

pub async fn find(pool: &SqlitePool, provider_id: i64) -> RepoResult<Option<ProviderProfile>> {
    let profile = sqlx::query_as::<_, ProviderProfile>(
        "SELECT provider_id, studio_name, deposit_amount, updated_at FROM provider_profile WHERE provider_id = ?",
    )
    .bind(provider_id)
    .fetch_optional(pool)
    .await?;
    Ok(profile)
}

pub async fn upsert(
    pool: &SqlitePool,
    provider_id: i64,
    data: ProviderProfileUpsert,
) -> RepoResult<ProviderProfile> {
    if data.deposit_amount < 0.0 || !data.deposit_amount.is_finite() {
        return Err(RepoError::Validation(format!(
            "Deposit amount cannot be negative: {}",
            data.deposit_amount
        )));
    }

    sqlx::query(
        "INSERT INTO provider_profile (provider_id, studio_name, deposit_amount, updated_at) VALUES (?1, ?2, ?3, ?4) \
         ON CONFLICT (provider_id) DO UPDATE SET studio_name = excluded.studio_name, deposit_amount = excluded.deposit_amount, updated_at = excluded.updated_at",
    )
    .bind(provider_id)
    .bind(&data.studio_name)
    .bind(data.deposit_amount)
    .bind(shared::util::now_millis())
    .execute(pool)
    .await?;

    find(pool, provider_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to upsert provider profile".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn test_upsert_replaces() {
        let db = DbService::in_memory().await.unwrap();
        assert!(find(&db.pool, 3).await.unwrap().is_none());

        upsert(
            &db.pool,
            3,
            ProviderProfileUpsert {
                studio_name: "Lash Lab".into(),
                deposit_amount: 15.0,
            },
        )
        .await
        .unwrap();
        let updated = upsert(
            &db.pool,
            3,
            ProviderProfileUpsert {
                studio_name: "Lash Lab Centro".into(),
                deposit_amount: 20.0,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.studio_name, "Lash Lab Centro");
        assert_eq!(updated.deposit_amount, 20.0);
    }

    #[tokio::test]
    async fn test_negative_deposit_rejected() {
        let db = DbService::in_memory().await.unwrap();
        let result = upsert(
            &db.pool,
            3,
            ProviderProfileUpsert {
                studio_name: "Lash Lab".into(),
                deposit_amount: -5.0,
            },
        )
        .await;
        assert!(matches!(result, Err(RepoError::Validation(_))));
    }
}

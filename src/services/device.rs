use crate::common::{ApiError, ApiResult};
use crate::models::{DeviceEntity, NewDevice};
use crate::services::registry::{AdminGateway, DeleteOutcome, DeviceRegistry};
use sqlx::SqlitePool;
use uuid::Uuid;

const DEVICE_COLUMNS: &str = "id, name, device_type, status, owner_id, created_at";

pub struct DeviceService {
    pool: SqlitePool,
}

impl DeviceService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn outcome(rows_affected: u64) -> DeleteOutcome {
    if rows_affected == 0 {
        DeleteOutcome::NotFound
    } else {
        DeleteOutcome::Deleted
    }
}

impl DeviceRegistry for DeviceService {
    async fn list_own(&self, owner_id: Uuid) -> ApiResult<Vec<DeviceEntity>> {
        let sql = format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE owner_id = ? \
             ORDER BY created_at DESC, rowid DESC"
        );
        let rows = sqlx::query_as::<_, DeviceEntity>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, device_id: Uuid) -> ApiResult<Option<DeviceEntity>> {
        let sql = format!("SELECT {DEVICE_COLUMNS} FROM devices WHERE id = ?");
        let row = sqlx::query_as::<_, DeviceEntity>(&sql)
            .bind(device_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, owner_id: Uuid, attrs: NewDevice) -> ApiResult<DeviceEntity> {
        let sql = format!(
            "INSERT INTO devices ({DEVICE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING {DEVICE_COLUMNS}"
        );
        let record = sqlx::query_as::<_, DeviceEntity>(&sql)
            .bind(Uuid::new_v4())
            .bind(&attrs.name)
            .bind(&attrs.device_type)
            .bind(attrs.status)
            .bind(owner_id)
            .bind(chrono::Utc::now().timestamp())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    ApiError::Conflict("Owner account no longer exists.".to_string())
                }
                err => ApiError::from(err),
            })?;
        tracing::info!(device = %record.id, owner = %owner_id, "device created");
        Ok(record)
    }

    async fn delete_own(&self, owner_id: Uuid, device_id: Uuid) -> ApiResult<DeleteOutcome> {
        let result = sqlx::query("DELETE FROM devices WHERE id = ? AND owner_id = ?")
            .bind(device_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(outcome(result.rows_affected()))
    }
}

impl AdminGateway for DeviceService {
    async fn list_all(&self) -> ApiResult<Vec<DeviceEntity>> {
        let sql =
            format!("SELECT {DEVICE_COLUMNS} FROM devices ORDER BY created_at DESC, rowid DESC");
        let rows = sqlx::query_as::<_, DeviceEntity>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn delete_any(&self, device_id: Uuid) -> ApiResult<DeleteOutcome> {
        let result = sqlx::query("DELETE FROM devices WHERE id = ?")
            .bind(device_id)
            .execute(&self.pool)
            .await?;
        Ok(outcome(result.rows_affected()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeviceStatus;
    use crate::services::test_support::{memory_pool, seed_user};

    fn lamp(name: &str) -> NewDevice {
        NewDevice {
            name: name.to_string(),
            device_type: "light".to_string(),
            status: DeviceStatus::Online,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_scoped_by_owner() {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice", false).await;
        let bob = seed_user(&pool, "bob", false).await;
        let devices = DeviceService::new(pool);
        let created = devices.create(alice.id, lamp("kitchen")).await.unwrap();
        assert_eq!(created.owner_id, alice.id);
        assert_eq!(created.status, DeviceStatus::Online);
        devices.create(bob.id, lamp("garage")).await.unwrap();

        let own = devices.list_own(alice.id).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].id, created.id);
        assert_eq!(devices.list_all().await.unwrap().len(), 2);
        assert_eq!(
            devices.find(created.id).await.unwrap().map(|it| it.name),
            Some("kitchen".to_string())
        );
    }

    #[tokio::test]
    async fn test_create_for_missing_owner() {
        let devices = DeviceService::new(memory_pool().await);
        let result = devices.create(Uuid::new_v4(), lamp("ghost")).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_own_hides_foreign_devices() {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice", false).await;
        let bob = seed_user(&pool, "bob", false).await;
        let devices = DeviceService::new(pool);
        let bobs = devices.create(bob.id, lamp("garage")).await.unwrap();

        assert_eq!(
            devices.delete_own(alice.id, bobs.id).await.unwrap(),
            DeleteOutcome::NotFound
        );
        assert_eq!(
            devices.delete_own(alice.id, Uuid::new_v4()).await.unwrap(),
            DeleteOutcome::NotFound
        );
        assert!(devices.find(bobs.id).await.unwrap().is_some());
        assert_eq!(
            devices.delete_own(bob.id, bobs.id).await.unwrap(),
            DeleteOutcome::Deleted
        );
        assert!(devices.find(bobs.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_racing_deletes_succeed_once() {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice", false).await;
        let devices = DeviceService::new(pool);
        let device = devices.create(alice.id, lamp("hall")).await.unwrap();

        let (first, second) = tokio::join!(
            devices.delete_own(alice.id, device.id),
            devices.delete_any(device.id)
        );
        let outcomes = [first.unwrap(), second.unwrap()];
        assert_eq!(
            outcomes
                .iter()
                .filter(|it| **it == DeleteOutcome::Deleted)
                .count(),
            1
        );
        assert!(outcomes.contains(&DeleteOutcome::NotFound));
    }
}

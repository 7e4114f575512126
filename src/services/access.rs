//! Authorize-then-execute steps for every device operation.
//!
//! Each function receives the caller's [`Identity`] explicitly, asks the policy,
//! and only then touches the registry. Owner-scoped paths report a policy denial as
//! `NotFound` so that other tenants' device ids cannot be probed.

use crate::common::{ApiError, ApiResult};
use crate::models::{DeviceEntity, NewDevice};
use crate::services::policy::{self, Action, Decision};
use crate::services::registry::{AdminGateway, DeleteOutcome, DeviceRegistry};
use crate::services::token::Identity;
use uuid::Uuid;

pub async fn list_own<R: DeviceRegistry>(
    registry: &R,
    identity: &Identity,
) -> ApiResult<Vec<DeviceEntity>> {
    registry.list_own(identity.subject_id).await
}

pub async fn create_own<R: DeviceRegistry>(
    registry: &R,
    identity: &Identity,
    attrs: NewDevice,
) -> ApiResult<DeviceEntity> {
    let owner_id = identity.subject_id;
    policy::authorize(identity, Some(owner_id), Action::Create)?;
    registry.create(owner_id, attrs).await
}

/// Looks up a device the caller may act on, hiding foreign devices as missing.
async fn find_visible<R: DeviceRegistry>(
    registry: &R,
    identity: &Identity,
    device_id: Uuid,
    action: Action,
) -> ApiResult<DeviceEntity> {
    let device = registry.find(device_id).await?.ok_or(ApiError::NotFound)?;
    match policy::evaluate(identity, Some(device.owner_id), action) {
        Decision::Allow => Ok(device),
        Decision::Deny => {
            tracing::debug!(
                subject = %identity.subject_id,
                device = %device_id,
                ?action,
                "foreign device reported as missing"
            );
            Err(ApiError::NotFound)
        }
    }
}

pub async fn get_own<R: DeviceRegistry>(
    registry: &R,
    identity: &Identity,
    device_id: Uuid,
) -> ApiResult<DeviceEntity> {
    find_visible(registry, identity, device_id, Action::Read).await
}

pub async fn delete_own<R: DeviceRegistry>(
    registry: &R,
    identity: &Identity,
    device_id: Uuid,
) -> ApiResult<()> {
    let device = find_visible(registry, identity, device_id, Action::Delete).await?;
    match registry.delete_own(device.owner_id, device_id).await? {
        DeleteOutcome::Deleted => {
            tracing::info!(subject = %identity.subject_id, device = %device_id, "device deleted");
            Ok(())
        }
        DeleteOutcome::NotFound => Err(ApiError::NotFound),
    }
}

pub async fn list_all<G: AdminGateway>(
    gateway: &G,
    identity: &Identity,
) -> ApiResult<Vec<DeviceEntity>> {
    policy::authorize(identity, None, Action::ListAll)?;
    gateway.list_all().await
}

/// `device_id` is `None` when the requested id could not name a device; that is
/// only reported as `NotFound` once the caller has been authorized as admin.
pub async fn delete_any<G: AdminGateway>(
    gateway: &G,
    identity: &Identity,
    device_id: Option<Uuid>,
) -> ApiResult<()> {
    policy::authorize(identity, None, Action::DeleteAny)?;
    let device_id = device_id.ok_or(ApiError::NotFound)?;
    match gateway.delete_any(device_id).await? {
        DeleteOutcome::Deleted => {
            tracing::info!(
                admin = %identity.subject_id,
                device = %device_id,
                "device deleted by admin"
            );
            Ok(())
        }
        DeleteOutcome::NotFound => Err(ApiError::NotFound),
    }
}

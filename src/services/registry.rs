//! Storage seams consumed by the access-control pipeline.
//!
//! Implementations must make deletion atomic: when two callers race to delete the
//! same id, at most one of them observes [`DeleteOutcome::Deleted`].

use crate::common::ApiResult;
use crate::models::{DeviceEntity, NewDevice, UserEntity};
use std::future::Future;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Owner-scoped device operations.
pub trait DeviceRegistry: Send + Sync {
    fn list_own(
        &self,
        owner_id: Uuid,
    ) -> impl Future<Output = ApiResult<Vec<DeviceEntity>>> + Send;

    fn find(
        &self,
        device_id: Uuid,
    ) -> impl Future<Output = ApiResult<Option<DeviceEntity>>> + Send;

    fn create(
        &self,
        owner_id: Uuid,
        attrs: NewDevice,
    ) -> impl Future<Output = ApiResult<DeviceEntity>> + Send;

    /// A device owned by someone else reports `NotFound`, same as a missing id.
    fn delete_own(
        &self,
        owner_id: Uuid,
        device_id: Uuid,
    ) -> impl Future<Output = ApiResult<DeleteOutcome>> + Send;
}

/// Cross-tenant device operations. Callers must have been authorized as admin.
pub trait AdminGateway: Send + Sync {
    fn list_all(&self) -> impl Future<Output = ApiResult<Vec<DeviceEntity>>> + Send;

    fn delete_any(&self, device_id: Uuid) -> impl Future<Output = ApiResult<DeleteOutcome>> + Send;
}

pub trait UserDirectory: Send + Sync {
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = ApiResult<Option<UserEntity>>> + Send;

    fn find_by_id(&self, id: Uuid) -> impl Future<Output = ApiResult<Option<UserEntity>>> + Send;

    /// Fails with `Conflict` when the username is taken.
    fn create(
        &self,
        username: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> impl Future<Output = ApiResult<UserEntity>> + Send;
}

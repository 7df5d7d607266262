//! Port for fabrication and recycling requests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepositoryError;
use crate::domain::service_requests::{FabricationRequest, RecyclingRequest, ServiceRequestKind};
use crate::domain::{RequestStatus, ServiceRequestId, UserId};

/// Service request persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRequestRepository: Send + Sync {
    /// Record a fabrication request.
    async fn insert_fabrication(&self, request: &FabricationRequest) -> Result<(), RepositoryError>;

    /// Record a recycling request.
    async fn insert_recycling(&self, request: &RecyclingRequest) -> Result<(), RepositoryError>;

    /// Fabrication requests, newest first, optionally for one user.
    async fn list_fabrication(
        &self,
        user_id: Option<UserId>,
    ) -> Result<Vec<FabricationRequest>, RepositoryError>;

    /// Recycling requests, newest first, optionally for one user.
    async fn list_recycling(
        &self,
        user_id: Option<UserId>,
    ) -> Result<Vec<RecyclingRequest>, RepositoryError>;

    /// Current status of a request, `None` when it does not exist.
    async fn find_status(
        &self,
        kind: ServiceRequestKind,
        id: &ServiceRequestId,
    ) -> Result<Option<RequestStatus>, RepositoryError>;

    /// Persist a status change.
    async fn update_status(
        &self,
        kind: ServiceRequestKind,
        id: &ServiceRequestId,
        status: RequestStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;
}

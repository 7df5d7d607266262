//! Fabrication and recycling request intake and review.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::ServiceRequestRepository;
use crate::domain::service_requests::{
    FabricationDraft, FabricationRequest, RecyclingDraft, RecyclingRequest, ServiceRequestKind,
};
use crate::domain::{Error, RequestStatus, ServiceRequestId, StatusFlow, UserId};

/// Service request use-cases over the service request port.
#[derive(Clone)]
pub struct ServiceRequestService {
    requests: Arc<dyn ServiceRequestRepository>,
    clock: Arc<dyn Clock>,
}

impl ServiceRequestService {
    /// Create the service.
    pub fn new(requests: Arc<dyn ServiceRequestRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { requests, clock }
    }

    pub async fn submit_fabrication(
        &self,
        user_id: Option<UserId>,
        draft: FabricationDraft,
    ) -> Result<FabricationRequest, Error> {
        let request = draft.into_request(user_id, self.clock.utc());
        self.requests.insert_fabrication(&request).await?;
        info!(request_id = %request.meta.id, "fabrication request received");
        Ok(request)
    }

    pub async fn submit_recycling(
        &self,
        user_id: Option<UserId>,
        draft: RecyclingDraft,
    ) -> Result<RecyclingRequest, Error> {
        let request = draft.into_request(user_id, self.clock.utc());
        self.requests.insert_recycling(&request).await?;
        info!(request_id = %request.meta.id, "recycling request received");
        Ok(request)
    }

    /// Fabrication requests; `None` lists everyone's.
    pub async fn fabrication(&self, user_id: Option<UserId>) -> Result<Vec<FabricationRequest>, Error> {
        Ok(self.requests.list_fabrication(user_id).await?)
    }

    /// Recycling requests; `None` lists everyone's.
    pub async fn recycling(&self, user_id: Option<UserId>) -> Result<Vec<RecyclingRequest>, Error> {
        Ok(self.requests.list_recycling(user_id).await?)
    }

    /// Move a request along the service request flow.
    pub async fn update_status(
        &self,
        kind: ServiceRequestKind,
        id: &ServiceRequestId,
        next: RequestStatus,
    ) -> Result<(), Error> {
        let current = self
            .requests
            .find_status(kind, id)
            .await?
            .ok_or_else(|| Error::not_found(format!("{kind} request {id} not found")))?;
        StatusFlow::ServiceRequest.check(current, next)?;
        self.requests
            .update_status(kind, id, next, self.clock.utc())
            .await?;
        info!(%kind, request_id = %id, from = %current, to = %next, "service request status changed");
        Ok(())
    }
}

//! PostgreSQL-backed fabrication and recycling requests.
//!
//! The two kinds live in separate tables; status reads and writes dispatch
//! on [`ServiceRequestKind`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, ServiceRequestRepository};
use crate::domain::service_requests::{FabricationRequest, RecyclingRequest, ServiceRequestKind};
use crate::domain::{RequestStatus, ServiceRequestId, UserId};

use super::error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{FabricationRow, RecyclingRow};
use super::pool::DbPool;
use super::schema::{fabrication_requests, recycling_requests};

/// Diesel-backed implementation of [`ServiceRequestRepository`].
#[derive(Clone)]
pub struct DieselServiceRequestRepository {
    pool: DbPool,
}

impl DieselServiceRequestRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn table_name(kind: ServiceRequestKind) -> &'static str {
    match kind {
        ServiceRequestKind::Fabrication => "fabrication_requests",
        ServiceRequestKind::Recycling => "recycling_requests",
    }
}

#[async_trait]
impl ServiceRequestRepository for DieselServiceRequestRepository {
    async fn insert_fabrication(&self, request: &FabricationRequest) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(fabrication_requests::table)
            .values(&FabricationRow::from(request))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn insert_recycling(&self, request: &RecyclingRequest) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(recycling_requests::table)
            .values(&RecyclingRow::from(request))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_fabrication(
        &self,
        user_id: Option<UserId>,
    ) -> Result<Vec<FabricationRequest>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = fabrication_requests::table.into_boxed();
        if let Some(user_id) = user_id {
            query = query.filter(fabrication_requests::user_id.eq(*user_id.as_uuid()));
        }
        let rows: Vec<FabricationRow> = query
            .order_by(fabrication_requests::created_at.desc())
            .select(FabricationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(FabricationRequest::try_from).collect()
    }

    async fn list_recycling(
        &self,
        user_id: Option<UserId>,
    ) -> Result<Vec<RecyclingRequest>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = recycling_requests::table.into_boxed();
        if let Some(user_id) = user_id {
            query = query.filter(recycling_requests::user_id.eq(*user_id.as_uuid()));
        }
        let rows: Vec<RecyclingRow> = query
            .order_by(recycling_requests::created_at.desc())
            .select(RecyclingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(RecyclingRequest::try_from).collect()
    }

    async fn find_status(
        &self,
        kind: ServiceRequestKind,
        id: &ServiceRequestId,
    ) -> Result<Option<RequestStatus>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let raw: Option<String> = match kind {
            ServiceRequestKind::Fabrication => {
                fabrication_requests::table
                    .find(id.as_uuid())
                    .select(fabrication_requests::status)
                    .first::<String>(&mut conn)
                    .await
            }
            ServiceRequestKind::Recycling => {
                recycling_requests::table
                    .find(id.as_uuid())
                    .select(recycling_requests::status)
                    .first::<String>(&mut conn)
                    .await
            }
        }
        .optional()
        .map_err(map_diesel_error)?;

        raw.map(|status| {
            status
                .parse::<RequestStatus>()
                .map_err(|err| corrupt_row(table_name(kind), &err))
        })
        .transpose()
    }

    async fn update_status(
        &self,
        kind: ServiceRequestKind,
        id: &ServiceRequestId,
        status: RequestStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = match kind {
            ServiceRequestKind::Fabrication => {
                diesel::update(fabrication_requests::table.find(id.as_uuid()))
                    .set((
                        fabrication_requests::status.eq(status.as_str()),
                        fabrication_requests::updated_at.eq(updated_at),
                    ))
                    .execute(&mut conn)
                    .await
            }
            ServiceRequestKind::Recycling => {
                diesel::update(recycling_requests::table.find(id.as_uuid()))
                    .set((
                        recycling_requests::status.eq(status.as_str()),
                        recycling_requests::updated_at.eq(updated_at),
                    ))
                    .execute(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(RepositoryError::not_found(format!("{kind} request")));
        }
        Ok(())
    }
}

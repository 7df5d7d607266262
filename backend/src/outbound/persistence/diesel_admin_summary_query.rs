//! Back-office badge counts read straight from PostgreSQL.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{AdminSummaryQuery, RepositoryError};
use crate::domain::{AdminSummary, OrderStatus, RequestStatus};

use super::error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::pool::DbPool;
use super::schema::{
    contact_messages, fabrication_requests, job_applications, orders, recycling_requests,
};

/// Diesel-backed implementation of [`AdminSummaryQuery`].
#[derive(Clone)]
pub struct DieselAdminSummaryQuery {
    pool: DbPool,
}

impl DieselAdminSummaryQuery {
    /// Create a new query adapter with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_count(table: &'static str, raw: i64) -> Result<u64, RepositoryError> {
    u64::try_from(raw).map_err(|err| corrupt_row(table, &err))
}

#[async_trait]
impl AdminSummaryQuery for DieselAdminSummaryQuery {
    async fn summary(&self) -> Result<AdminSummary, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let fresh = RequestStatus::New.as_str();

        // One snapshot so the badge total matches its parts.
        let (orders, messages, applications, fabrication, recycling) = conn
            .transaction(|conn| {
                async move {
                    let orders: i64 = orders::table
                        .filter(orders::status.eq(OrderStatus::Pending.as_str()))
                        .count()
                        .get_result(conn)
                        .await?;
                    let messages: i64 = contact_messages::table
                        .filter(contact_messages::is_read.eq(false))
                        .count()
                        .get_result(conn)
                        .await?;
                    let applications: i64 = job_applications::table
                        .filter(job_applications::status.eq(fresh))
                        .count()
                        .get_result(conn)
                        .await?;
                    let fabrication: i64 = fabrication_requests::table
                        .filter(fabrication_requests::status.eq(fresh))
                        .count()
                        .get_result(conn)
                        .await?;
                    let recycling: i64 = recycling_requests::table
                        .filter(recycling_requests::status.eq(fresh))
                        .count()
                        .get_result(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((
                        orders,
                        messages,
                        applications,
                        fabrication,
                        recycling,
                    ))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(AdminSummary {
            pending_orders: to_count("orders", orders)?,
            unread_messages: to_count("contact_messages", messages)?,
            new_applications: to_count("job_applications", applications)?,
            new_fabrication_requests: to_count("fabrication_requests", fabrication)?,
            new_recycling_requests: to_count("recycling_requests", recycling)?,
        })
    }
}

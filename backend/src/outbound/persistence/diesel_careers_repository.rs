//! PostgreSQL-backed job postings and applications.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::careers::{Job, JobApplication};
use crate::domain::ports::{CareersRepository, RepositoryError};
use crate::domain::{ApplicationId, JobId, RequestStatus};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ApplicationRow, JobRow};
use super::pool::DbPool;
use super::schema::{job_applications, jobs};

/// Diesel-backed implementation of [`CareersRepository`].
///
/// Deleting a job removes its applications through the foreign key cascade.
#[derive(Clone)]
pub struct DieselCareersRepository {
    pool: DbPool,
}

impl DieselCareersRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CareersRepository for DieselCareersRepository {
    async fn list_jobs(&self, include_inactive: bool) -> Result<Vec<Job>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = jobs::table.into_boxed();
        if !include_inactive {
            query = query.filter(jobs::is_active.eq(true));
        }
        let rows: Vec<JobRow> = query
            .order_by(jobs::created_at.desc())
            .select(JobRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn find_job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = jobs::table
            .find(id.as_uuid())
            .select(JobRow::as_select())
            .first::<JobRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Job::from))
    }

    async fn insert_job(&self, job: &Job) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(jobs::table)
            .values(&JobRow::from(job))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update_job(&self, job: &Job) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = JobRow::from(job);

        let updated = diesel::update(jobs::table.find(row.id))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(RepositoryError::not_found("job"));
        }
        Ok(())
    }

    async fn delete_job(&self, id: &JobId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(jobs::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn insert_application(&self, application: &JobApplication) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(job_applications::table)
            .values(&ApplicationRow::from(application))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_applications(
        &self,
        job_id: Option<JobId>,
    ) -> Result<Vec<JobApplication>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = job_applications::table.into_boxed();
        if let Some(job_id) = job_id {
            query = query.filter(job_applications::job_id.eq(*job_id.as_uuid()));
        }
        let rows: Vec<ApplicationRow> = query
            .order_by(job_applications::created_at.desc())
            .select(ApplicationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(JobApplication::try_from).collect()
    }

    async fn find_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<JobApplication>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = job_applications::table
            .find(id.as_uuid())
            .select(ApplicationRow::as_select())
            .first::<ApplicationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(JobApplication::try_from).transpose()
    }

    async fn update_application_status(
        &self,
        id: &ApplicationId,
        status: RequestStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(job_applications::table.find(id.as_uuid()))
            .set((
                job_applications::status.eq(status.as_str()),
                job_applications::updated_at.eq(updated_at),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(RepositoryError::not_found("application"));
        }
        Ok(())
    }
}

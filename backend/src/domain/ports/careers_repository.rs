//! Port for job postings and applications.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepositoryError;
use crate::domain::careers::{Job, JobApplication};
use crate::domain::{ApplicationId, JobId, RequestStatus};

/// Careers persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CareersRepository: Send + Sync {
    /// Job postings, newest first.
    async fn list_jobs(&self, include_inactive: bool) -> Result<Vec<Job>, RepositoryError>;

    /// Fetch one posting.
    async fn find_job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;

    /// Insert a posting.
    async fn insert_job(&self, job: &Job) -> Result<(), RepositoryError>;

    /// Overwrite an existing posting.
    async fn update_job(&self, job: &Job) -> Result<(), RepositoryError>;

    /// Delete a posting and its applications; returns whether it existed.
    async fn delete_job(&self, id: &JobId) -> Result<bool, RepositoryError>;

    /// Record an application.
    async fn insert_application(&self, application: &JobApplication) -> Result<(), RepositoryError>;

    /// Applications, newest first, optionally for one job.
    async fn list_applications(
        &self,
        job_id: Option<JobId>,
    ) -> Result<Vec<JobApplication>, RepositoryError>;

    /// Fetch one application.
    async fn find_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<JobApplication>, RepositoryError>;

    /// Persist a status change.
    async fn update_application_status(
        &self,
        id: &ApplicationId,
        status: RequestStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;
}

//! Careers use-cases: postings and the applications made against them.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::careers::{ApplicationDraft, Job, JobApplication, JobDraft};
use crate::domain::ports::CareersRepository;
use crate::domain::{ApplicationId, Error, JobId, RequestStatus, StatusFlow, UserId};

fn missing_job(id: &JobId) -> Error {
    Error::not_found(format!("job {id} not found"))
}

/// Careers service over the careers port.
#[derive(Clone)]
pub struct CareersService {
    careers: Arc<dyn CareersRepository>,
    clock: Arc<dyn Clock>,
}

impl CareersService {
    /// Create the service.
    pub fn new(careers: Arc<dyn CareersRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { careers, clock }
    }

    pub async fn jobs(&self, include_inactive: bool) -> Result<Vec<Job>, Error> {
        Ok(self.careers.list_jobs(include_inactive).await?)
    }

    /// An active posting; closed postings are reported as missing.
    pub async fn open_job(&self, id: &JobId) -> Result<Job, Error> {
        self.careers
            .find_job(id)
            .await?
            .filter(|job| job.is_active)
            .ok_or_else(|| missing_job(id))
    }

    pub async fn create_job(&self, draft: JobDraft) -> Result<Job, Error> {
        let job = Job::create(JobId::random(), draft, self.clock.utc());
        self.careers.insert_job(&job).await?;
        info!(job_id = %job.id, "job posted");
        Ok(job)
    }

    pub async fn update_job(&self, id: &JobId, draft: JobDraft) -> Result<Job, Error> {
        let mut job = self
            .careers
            .find_job(id)
            .await?
            .ok_or_else(|| missing_job(id))?;
        job.apply(draft, self.clock.utc());
        self.careers.update_job(&job).await?;
        Ok(job)
    }

    /// Delete a posting together with its applications.
    pub async fn delete_job(&self, id: &JobId) -> Result<(), Error> {
        if !self.careers.delete_job(id).await? {
            return Err(missing_job(id));
        }
        info!(job_id = %id, "job deleted");
        Ok(())
    }

    /// Apply to an open posting. Anonymous applications are accepted.
    pub async fn apply(
        &self,
        job_id: &JobId,
        user_id: Option<UserId>,
        draft: ApplicationDraft,
    ) -> Result<JobApplication, Error> {
        let job = self.open_job(job_id).await?;
        let application = draft.into_application(job.id, user_id, self.clock.utc());
        self.careers.insert_application(&application).await?;
        info!(application_id = %application.id, job_id = %job.id, "job application received");
        Ok(application)
    }

    pub async fn applications(&self, job_id: Option<JobId>) -> Result<Vec<JobApplication>, Error> {
        Ok(self.careers.list_applications(job_id).await?)
    }

    /// Move an application through review.
    pub async fn update_application_status(
        &self,
        id: &ApplicationId,
        next: RequestStatus,
    ) -> Result<JobApplication, Error> {
        let mut application = self
            .careers
            .find_application(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("application {id} not found")))?;
        StatusFlow::JobApplication.check(application.status, next)?;
        application.status = next;
        application.updated_at = self.clock.utc();
        self.careers
            .update_application_status(id, next, application.updated_at)
            .await?;
        info!(application_id = %id, status = %next, "application status changed");
        Ok(application)
    }
}

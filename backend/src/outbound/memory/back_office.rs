//! Pricing index, careers, service requests, news, and contact messages.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{MemoryStore, Tables};
use crate::domain::careers::{Job, JobApplication};
use crate::domain::contact::ContactMessage;
use crate::domain::news::Article;
use crate::domain::ports::{
    CareersRepository, ContactRepository, NewsRepository, PricingRepository, RepositoryError,
    ServiceRequestRepository,
};
use crate::domain::pricing::PricingEntry;
use crate::domain::service_requests::{
    FabricationRequest, RecyclingRequest, RequestMeta, ServiceRequestKind,
};
use crate::domain::{
    ApplicationId, ArticleId, JobId, MessageId, PricingEntryId, RequestStatus, ServiceRequestId,
    UserId,
};

fn replace<T>(
    rows: &mut [T],
    matches: impl Fn(&T) -> bool,
    row: &T,
    entity: &str,
) -> Result<(), RepositoryError>
where
    T: Clone,
{
    let slot = rows
        .iter_mut()
        .find(|r| matches(r))
        .ok_or_else(|| RepositoryError::not_found(entity))?;
    *slot = row.clone();
    Ok(())
}

fn remove<T>(rows: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = rows.len();
    rows.retain(|r| !matches(r));
    rows.len() != before
}

#[async_trait]
impl PricingRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<PricingEntry>, RepositoryError> {
        self.with_tables(|t| {
            let mut rows = t.pricing.clone();
            rows.sort_by_key(PricingEntry::listing_key);
            Ok(rows)
        })
    }

    async fn find(&self, id: &PricingEntryId) -> Result<Option<PricingEntry>, RepositoryError> {
        self.with_tables(|t| Ok(t.pricing.iter().find(|p| &p.id == id).cloned()))
    }

    async fn insert(&self, entry: &PricingEntry) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            t.pricing.push(entry.clone());
            Ok(())
        })
    }

    async fn update(&self, entry: &PricingEntry) -> Result<(), RepositoryError> {
        self.with_tables(|t| replace(&mut t.pricing, |p| p.id == entry.id, entry, "pricing entry"))
    }

    async fn delete(&self, id: &PricingEntryId) -> Result<bool, RepositoryError> {
        self.with_tables(|t| Ok(remove(&mut t.pricing, |p| &p.id == id)))
    }
}

#[async_trait]
impl CareersRepository for MemoryStore {
    async fn list_jobs(&self, include_inactive: bool) -> Result<Vec<Job>, RepositoryError> {
        self.with_tables(|t| {
            let mut jobs: Vec<Job> = t
                .jobs
                .iter()
                .filter(|j| include_inactive || j.is_active)
                .cloned()
                .collect();
            jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(jobs)
        })
    }

    async fn find_job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        self.with_tables(|t| Ok(t.jobs.iter().find(|j| &j.id == id).cloned()))
    }

    async fn insert_job(&self, job: &Job) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            t.jobs.push(job.clone());
            Ok(())
        })
    }

    async fn update_job(&self, job: &Job) -> Result<(), RepositoryError> {
        self.with_tables(|t| replace(&mut t.jobs, |j| j.id == job.id, job, "job"))
    }

    async fn delete_job(&self, id: &JobId) -> Result<bool, RepositoryError> {
        self.with_tables(|t| {
            t.applications.retain(|a| &a.job_id != id);
            Ok(remove(&mut t.jobs, |j| &j.id == id))
        })
    }

    async fn insert_application(&self, application: &JobApplication) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            if !t.jobs.iter().any(|j| j.id == application.job_id) {
                return Err(RepositoryError::not_found("job"));
            }
            t.applications.push(application.clone());
            Ok(())
        })
    }

    async fn list_applications(
        &self,
        job_id: Option<JobId>,
    ) -> Result<Vec<JobApplication>, RepositoryError> {
        self.with_tables(|t| {
            let mut rows: Vec<JobApplication> = t
                .applications
                .iter()
                .filter(|a| job_id.is_none_or(|id| a.job_id == id))
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        })
    }

    async fn find_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<JobApplication>, RepositoryError> {
        self.with_tables(|t| Ok(t.applications.iter().find(|a| &a.id == id).cloned()))
    }

    async fn update_application_status(
        &self,
        id: &ApplicationId,
        status: RequestStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            let application = t
                .applications
                .iter_mut()
                .find(|a| &a.id == id)
                .ok_or_else(|| RepositoryError::not_found("application"))?;
            application.status = status;
            application.updated_at = updated_at;
            Ok(())
        })
    }
}

fn request_meta<'a>(
    t: &'a mut Tables,
    kind: ServiceRequestKind,
    id: &ServiceRequestId,
) -> Option<&'a mut RequestMeta> {
    match kind {
        ServiceRequestKind::Fabrication => t
            .fabrication
            .iter_mut()
            .map(|r| &mut r.meta)
            .find(|m| &m.id == id),
        ServiceRequestKind::Recycling => t
            .recycling
            .iter_mut()
            .map(|r| &mut r.meta)
            .find(|m| &m.id == id),
    }
}

fn owned_by(meta: &RequestMeta, user_id: Option<&UserId>) -> bool {
    user_id.is_none_or(|user| meta.user_id.as_ref() == Some(user))
}

#[async_trait]
impl ServiceRequestRepository for MemoryStore {
    async fn insert_fabrication(&self, request: &FabricationRequest) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            t.fabrication.push(request.clone());
            Ok(())
        })
    }

    async fn insert_recycling(&self, request: &RecyclingRequest) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            t.recycling.push(request.clone());
            Ok(())
        })
    }

    async fn list_fabrication(
        &self,
        user_id: Option<UserId>,
    ) -> Result<Vec<FabricationRequest>, RepositoryError> {
        self.with_tables(|t| {
            let mut rows: Vec<FabricationRequest> = t
                .fabrication
                .iter()
                .filter(|r| owned_by(&r.meta, user_id.as_ref()))
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.meta.created_at.cmp(&a.meta.created_at));
            Ok(rows)
        })
    }

    async fn list_recycling(
        &self,
        user_id: Option<UserId>,
    ) -> Result<Vec<RecyclingRequest>, RepositoryError> {
        self.with_tables(|t| {
            let mut rows: Vec<RecyclingRequest> = t
                .recycling
                .iter()
                .filter(|r| owned_by(&r.meta, user_id.as_ref()))
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.meta.created_at.cmp(&a.meta.created_at));
            Ok(rows)
        })
    }

    async fn find_status(
        &self,
        kind: ServiceRequestKind,
        id: &ServiceRequestId,
    ) -> Result<Option<RequestStatus>, RepositoryError> {
        self.with_tables(|t| Ok(request_meta(t, kind, id).map(|meta| meta.status)))
    }

    async fn update_status(
        &self,
        kind: ServiceRequestKind,
        id: &ServiceRequestId,
        status: RequestStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            let meta = request_meta(t, kind, id)
                .ok_or_else(|| RepositoryError::not_found(format!("{kind} request")))?;
            meta.status = status;
            meta.updated_at = updated_at;
            Ok(())
        })
    }
}

fn ensure_article_slug_free(t: &Tables, article: &Article) -> Result<(), RepositoryError> {
    if t
        .articles
        .iter()
        .any(|a| a.slug == article.slug && a.id != article.id)
    {
        return Err(RepositoryError::conflict(format!(
            "article slug {} already exists",
            article.slug
        )));
    }
    Ok(())
}

#[async_trait]
impl NewsRepository for MemoryStore {
    async fn list(&self, published_only: bool) -> Result<Vec<Article>, RepositoryError> {
        self.with_tables(|t| {
            let mut rows: Vec<Article> = t
                .articles
                .iter()
                .filter(|a| !published_only || a.is_published)
                .cloned()
                .collect();
            rows.sort_by(|a, b| {
                b.published_at
                    .cmp(&a.published_at)
                    .then(b.created_at.cmp(&a.created_at))
            });
            Ok(rows)
        })
    }

    async fn find(&self, id: &ArticleId) -> Result<Option<Article>, RepositoryError> {
        self.with_tables(|t| Ok(t.articles.iter().find(|a| &a.id == id).cloned()))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, RepositoryError> {
        self.with_tables(|t| Ok(t.articles.iter().find(|a| a.slug == slug).cloned()))
    }

    async fn insert(&self, article: &Article) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            ensure_article_slug_free(t, article)?;
            t.articles.push(article.clone());
            Ok(())
        })
    }

    async fn update(&self, article: &Article) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            ensure_article_slug_free(t, article)?;
            replace(&mut t.articles, |a| a.id == article.id, article, "article")
        })
    }

    async fn delete(&self, id: &ArticleId) -> Result<bool, RepositoryError> {
        self.with_tables(|t| Ok(remove(&mut t.articles, |a| &a.id == id)))
    }
}

#[async_trait]
impl ContactRepository for MemoryStore {
    async fn insert(&self, message: &ContactMessage) -> Result<(), RepositoryError> {
        self.with_tables(|t| {
            t.messages.push(message.clone());
            Ok(())
        })
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        self.with_tables(|t| {
            let mut rows = t.messages.clone();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        })
    }

    async fn mark_read(&self, id: &MessageId) -> Result<bool, RepositoryError> {
        self.with_tables(|t| {
            let Some(message) = t.messages.iter_mut().find(|m| &m.id == id) else {
                return Ok(false);
            };
            message.is_read = true;
            Ok(true)
        })
    }

    async fn delete(&self, id: &MessageId) -> Result<bool, RepositoryError> {
        self.with_tables(|t| Ok(remove(&mut t.messages, |m| &m.id == id)))
    }
}

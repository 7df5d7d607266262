//! Job postings and applications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{self, LONG_TEXT_MAX, SHORT_TEXT_MAX, ValidationError, Violation};
use super::{ApplicationId, JobId, RequestStatus, UserId};

const MAX_REQUIREMENTS: usize = 50;

/// Open position advertised on the careers page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Build a posting from a validated draft.
    pub fn create(id: JobId, draft: JobDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            department: draft.department,
            location: draft.location,
            employment_type: draft.employment_type,
            description: draft.description,
            requirements: draft.requirements,
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace editable fields.
    pub fn apply(&mut self, draft: JobDraft, now: DateTime<Utc>) {
        let created_at = self.created_at;
        *self = Self::create(self.id, draft, now);
        self.created_at = created_at;
    }
}

/// Raw admin input for a job posting.
#[derive(Debug, Clone, Default)]
pub struct JobInput<'a> {
    pub title: &'a str,
    pub department: &'a str,
    pub location: &'a str,
    pub employment_type: &'a str,
    pub description: &'a str,
    pub requirements: &'a [String],
    pub is_active: bool,
}

/// Validated job posting fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    title: String,
    department: String,
    location: String,
    employment_type: String,
    description: String,
    requirements: Vec<String>,
    is_active: bool,
}

impl JobDraft {
    /// Validate raw input. Blank requirement lines are dropped.
    pub fn try_from_input(input: JobInput<'_>) -> Result<Self, ValidationError> {
        let requirements = input
            .requirements
            .iter()
            .filter_map(|line| {
                validation::optional_text(Some(line.as_str()), "requirements", SHORT_TEXT_MAX * 2)
                    .transpose()
            })
            .collect::<Result<Vec<_>, _>>()?;
        if requirements.len() > MAX_REQUIREMENTS {
            return Err(ValidationError::new(
                "requirements",
                Violation::TooLong {
                    max: MAX_REQUIREMENTS,
                },
            ));
        }
        Ok(Self {
            title: validation::required_text(input.title, "title", SHORT_TEXT_MAX)?,
            department: validation::required_text(input.department, "department", SHORT_TEXT_MAX)?,
            location: validation::required_text(input.location, "location", SHORT_TEXT_MAX)?,
            employment_type: validation::required_text(
                input.employment_type,
                "employmentType",
                SHORT_TEXT_MAX,
            )?,
            description: validation::required_text(input.description, "description", LONG_TEXT_MAX)?,
            requirements,
            is_active: input.is_active,
        })
    }
}

/// Candidate application for a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub user_id: Option<UserId>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated application submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDraft {
    full_name: String,
    email: String,
    phone: String,
    cover_letter: Option<String>,
    resume_url: Option<String>,
}

impl ApplicationDraft {
    /// Validate raw application fields.
    pub fn try_new(
        full_name: &str,
        email: &str,
        phone: &str,
        cover_letter: Option<&str>,
        resume_url: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let resume_url = validation::optional_text(resume_url, "resumeUrl", 2_048)?;
        if let Some(url) = &resume_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ValidationError::new("resumeUrl", Violation::InvalidFormat));
            }
        }
        Ok(Self {
            full_name: validation::required_text(full_name, "fullName", SHORT_TEXT_MAX)?,
            email: validation::email(email, "email")?,
            phone: validation::phone(phone, "phone")?,
            cover_letter: validation::optional_text(cover_letter, "coverLetter", LONG_TEXT_MAX)?,
            resume_url,
        })
    }

    /// New application for `job_id`.
    pub fn into_application(
        self,
        job_id: JobId,
        user_id: Option<UserId>,
        now: DateTime<Utc>,
    ) -> JobApplication {
        JobApplication {
            id: ApplicationId::random(),
            job_id,
            user_id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            cover_letter: self.cover_letter,
            resume_url: self.resume_url,
            status: RequestStatus::New,
            created_at: now,
            updated_at: now,
        }
    }
}

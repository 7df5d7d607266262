//! Review status shared by job applications and service requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Error;
use super::validation::{ValidationError, Violation};

/// Back-office review status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    New,
    Reviewing,
    Quoted,
    Accepted,
    Completed,
    Rejected,
}

impl RequestStatus {
    /// Database and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Reviewing => "reviewing",
            Self::Quoted => "quoted",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "reviewing" => Ok(Self::Reviewing),
            "quoted" => Ok(Self::Quoted),
            "accepted" => Ok(Self::Accepted),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ValidationError::new("status", Violation::UnknownValue)),
        }
    }
}

/// Which progression a status belongs to.
///
/// Both flows move forward only and allow `rejected` from any status that is
/// not final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFlow {
    /// `new → reviewing → accepted`.
    JobApplication,
    /// `new → reviewing → quoted → accepted → completed`.
    ServiceRequest,
}

impl StatusFlow {
    fn sequence(self) -> &'static [RequestStatus] {
        use RequestStatus::{Accepted, Completed, New, Quoted, Reviewing};
        match self {
            Self::JobApplication => &[New, Reviewing, Accepted],
            Self::ServiceRequest => &[New, Reviewing, Quoted, Accepted, Completed],
        }
    }

    fn position(self, status: RequestStatus) -> Option<usize> {
        self.sequence().iter().position(|s| *s == status)
    }

    /// Whether `status` admits no further transitions in this flow.
    pub fn is_final(self, status: RequestStatus) -> bool {
        status == RequestStatus::Rejected || self.sequence().last() == Some(&status)
    }

    /// Whether `from → to` is allowed in this flow.
    pub fn allows(self, from: RequestStatus, to: RequestStatus) -> bool {
        if self.is_final(from) {
            return false;
        }
        if to == RequestStatus::Rejected {
            return self.position(from).is_some();
        }
        match (self.position(from), self.position(to)) {
            (Some(current), Some(target)) => target > current,
            _ => false,
        }
    }

    /// Check a transition, producing a `conflict` error when disallowed.
    pub fn check(self, from: RequestStatus, to: RequestStatus) -> Result<(), Error> {
        if self.allows(from, to) {
            return Ok(());
        }
        Err(
            Error::conflict(format!("status cannot move from {from} to {to}")).with_details(
                json!({ "from": from.as_str(), "to": to.as_str() }),
            ),
        )
    }
}

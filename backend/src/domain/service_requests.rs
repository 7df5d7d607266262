//! Fabrication and recycling service requests.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{self, LONG_TEXT_MAX, SHORT_TEXT_MAX, ValidationError};
use super::{RequestStatus, ServiceRequestId, UserId};

/// Kind of service request, used for routing and admin filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceRequestKind {
    Fabrication,
    Recycling,
}

impl fmt::Display for ServiceRequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fabrication => "fabrication",
            Self::Recycling => "recycling",
        })
    }
}

/// Who is asking, shared by both request kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requester {
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: String,
}

impl Requester {
    /// Validate contact fields.
    pub fn try_new(
        name: &str,
        company: Option<&str>,
        email: &str,
        phone: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validation::required_text(name, "name", SHORT_TEXT_MAX)?,
            company: validation::optional_text(company, "company", SHORT_TEXT_MAX)?,
            email: validation::email(email, "email")?,
            phone: validation::phone(phone, "phone")?,
        })
    }
}

/// Status bookkeeping common to both request kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMeta {
    pub id: ServiceRequestId,
    pub user_id: Option<UserId>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RequestMeta {
    fn new(user_id: Option<UserId>, now: DateTime<Utc>) -> Self {
        Self {
            id: ServiceRequestId::random(),
            user_id,
            status: RequestStatus::New,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Custom fabrication job (cutting, bending, welding...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricationRequest {
    #[serde(flatten)]
    pub meta: RequestMeta,
    #[serde(flatten)]
    pub requester: Requester,
    pub material: String,
    pub service_type: String,
    pub quantity: String,
    pub specifications: Option<String>,
}

/// Validated fabrication request details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FabricationDraft {
    requester: Requester,
    material: String,
    service_type: String,
    quantity: String,
    specifications: Option<String>,
}

impl FabricationDraft {
    /// Validate the job description fields.
    pub fn try_new(
        requester: Requester,
        material: &str,
        service_type: &str,
        quantity: &str,
        specifications: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            requester,
            material: validation::required_text(material, "material", SHORT_TEXT_MAX)?,
            service_type: validation::required_text(service_type, "serviceType", SHORT_TEXT_MAX)?,
            quantity: validation::required_text(quantity, "quantity", SHORT_TEXT_MAX)?,
            specifications: validation::optional_text(
                specifications,
                "specifications",
                LONG_TEXT_MAX,
            )?,
        })
    }

    /// New request in status `new`.
    pub fn into_request(self, user_id: Option<UserId>, now: DateTime<Utc>) -> FabricationRequest {
        FabricationRequest {
            meta: RequestMeta::new(user_id, now),
            requester: self.requester,
            material: self.material,
            service_type: self.service_type,
            quantity: self.quantity,
            specifications: self.specifications,
        }
    }
}

/// Scrap pickup for recycling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecyclingRequest {
    #[serde(flatten)]
    pub meta: RequestMeta,
    #[serde(flatten)]
    pub requester: Requester,
    pub material_type: String,
    pub estimated_quantity: String,
    pub pickup_address: String,
}

/// Validated recycling request details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecyclingDraft {
    requester: Requester,
    material_type: String,
    estimated_quantity: String,
    pickup_address: String,
}

impl RecyclingDraft {
    /// Validate the pickup fields.
    pub fn try_new(
        requester: Requester,
        material_type: &str,
        estimated_quantity: &str,
        pickup_address: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            requester,
            material_type: validation::required_text(material_type, "materialType", SHORT_TEXT_MAX)?,
            estimated_quantity: validation::required_text(
                estimated_quantity,
                "estimatedQuantity",
                SHORT_TEXT_MAX,
            )?,
            pickup_address: validation::required_text(
                pickup_address,
                "pickupAddress",
                SHORT_TEXT_MAX * 5,
            )?,
        })
    }

    /// New request in status `new`.
    pub fn into_request(self, user_id: Option<UserId>, now: DateTime<Utc>) -> RecyclingRequest {
        RecyclingRequest {
            meta: RequestMeta::new(user_id, now),
            requester: self.requester,
            material_type: self.material_type,
            estimated_quantity: self.estimated_quantity,
            pickup_address: self.pickup_address,
        }
    }
}

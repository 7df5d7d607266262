//! Embodied-carbon calculator.
//!
//! ```text
//! POST /api/v1/carbon/estimate
//! {"material":"steel","quantityTonnes":10,"recycledPercent":40,"transportMode":"rail","distanceKm":800}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::carbon::{self, CarbonEstimate, CarbonInput, Material, TransportMode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CarbonEstimateSchema, ErrorSchema};

/// Calculator input as submitted by the client.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarbonRequest {
    /// steel, stainless_steel, aluminium, copper, brass, zinc or lead.
    #[schema(value_type = String, example = "steel")]
    pub material: Material,
    #[schema(example = 10.0)]
    pub quantity_tonnes: f64,
    /// Share of recycled feedstock, 0 to 100.
    #[serde(default)]
    pub recycled_percent: f64,
    /// road, rail, sea or air.
    #[schema(value_type = String, example = "road")]
    pub transport_mode: TransportMode,
    #[serde(default)]
    pub distance_km: f64,
}

impl From<CarbonRequest> for CarbonInput {
    fn from(value: CarbonRequest) -> Self {
        Self {
            material: value.material,
            quantity_tonnes: value.quantity_tonnes,
            recycled_percent: value.recycled_percent,
            transport_mode: value.transport_mode,
            distance_km: value.distance_km,
        }
    }
}

/// Estimate tonnes of CO2e for a purchase against an all-virgin baseline.
#[utoipa::path(
    post,
    path = "/api/v1/carbon/estimate",
    request_body = CarbonRequest,
    responses(
        (status = 200, description = "Estimate", body = CarbonEstimateSchema),
        (status = 400, description = "Invalid input", body = ErrorSchema)
    ),
    tags = ["carbon"],
    operation_id = "estimateCarbon"
)]
#[post("/carbon/estimate")]
pub async fn estimate(payload: web::Json<CarbonRequest>) -> ApiResult<web::Json<CarbonEstimate>> {
    let input = CarbonInput::from(payload.into_inner());
    Ok(web::Json(carbon::estimate(&input)?))
}

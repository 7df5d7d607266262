//! Embodied-carbon estimate for a metal purchase.
//!
//! Production emissions blend a virgin and a recycled emission factor by the
//! recycled share; transport adds a per tonne-kilometre factor for the chosen
//! mode. The baseline is the same purchase made entirely from virgin metal.
//! All outputs are tonnes of CO2-equivalent.

use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, Violation};

/// Metal being purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Steel,
    #[serde(alias = "stainless")]
    StainlessSteel,
    #[serde(alias = "aluminum")]
    Aluminium,
    Copper,
    Brass,
    Zinc,
    Lead,
}

impl Material {
    /// `(virgin, recycled)` emission factors in tCO2e per tonne.
    pub fn factors(self) -> (f64, f64) {
        match self {
            Self::Steel => (2.3, 0.6),
            Self::StainlessSteel => (6.15, 1.5),
            Self::Aluminium => (16.5, 0.6),
            Self::Copper => (4.1, 0.8),
            Self::Brass => (3.0, 0.7),
            Self::Zinc => (3.1, 0.5),
            Self::Lead => (1.6, 0.5),
        }
    }
}

/// Freight mode to site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Road,
    Rail,
    Sea,
    Air,
}

impl TransportMode {
    /// Emission factor in kg CO2e per tonne-kilometre.
    pub fn kg_per_tonne_km(self) -> f64 {
        match self {
            Self::Road => 0.062,
            Self::Rail => 0.022,
            Self::Sea => 0.008,
            Self::Air => 0.602,
        }
    }
}

/// Calculator input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonInput {
    pub material: Material,
    pub quantity_tonnes: f64,
    pub recycled_percent: f64,
    pub transport_mode: TransportMode,
    pub distance_km: f64,
}

/// Calculator output, tonnes CO2e.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonEstimate {
    pub production: f64,
    pub transport: f64,
    pub total: f64,
    pub baseline: f64,
    pub savings: f64,
    pub savings_percent: f64,
}

impl CarbonInput {
    fn validate(&self) -> Result<(), ValidationError> {
        if !self.quantity_tonnes.is_finite() || self.quantity_tonnes <= 0.0 {
            return Err(ValidationError::new("quantityTonnes", Violation::OutOfRange));
        }
        if !self.recycled_percent.is_finite() || !(0.0..=100.0).contains(&self.recycled_percent) {
            return Err(ValidationError::new("recycledPercent", Violation::OutOfRange));
        }
        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            return Err(ValidationError::new("distanceKm", Violation::OutOfRange));
        }
        Ok(())
    }
}

/// Compute the estimate for `input`.
///
/// # Examples
/// ```
/// use storefront::domain::carbon::{estimate, CarbonInput, Material, TransportMode};
///
/// let result = estimate(&CarbonInput {
///     material: Material::Steel,
///     quantity_tonnes: 10.0,
///     recycled_percent: 0.0,
///     transport_mode: TransportMode::Road,
///     distance_km: 0.0,
/// })
/// .unwrap();
/// assert!((result.total - 23.0).abs() < 1e-9);
/// assert_eq!(result.savings_percent, 0.0);
/// ```
pub fn estimate(input: &CarbonInput) -> Result<CarbonEstimate, ValidationError> {
    input.validate()?;
    let (virgin, recycled) = input.material.factors();
    let share = input.recycled_percent / 100.0;
    let blended = virgin * (1.0 - share) + recycled * share;

    let production = blended * input.quantity_tonnes;
    let transport = input.quantity_tonnes
        * input.distance_km
        * input.transport_mode.kg_per_tonne_km()
        / 1_000.0;
    let total = production + transport;
    let baseline = virgin * input.quantity_tonnes + transport;
    let savings = baseline - total;
    let savings_percent = if baseline > 0.0 {
        savings / baseline * 100.0
    } else {
        0.0
    };

    Ok(CarbonEstimate {
        production,
        transport,
        total,
        baseline,
        savings,
        savings_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const EPS: f64 = 1e-9;

    fn base() -> CarbonInput {
        CarbonInput {
            material: Material::Aluminium,
            quantity_tonnes: 2.0,
            recycled_percent: 50.0,
            transport_mode: TransportMode::Rail,
            distance_km: 500.0,
        }
    }

    #[fixture]
    fn input() -> CarbonInput {
        base()
    }

    #[rstest]
    fn blends_factors_and_adds_transport(input: CarbonInput) {
        let result = estimate(&input).expect("valid input");
        // (16.5 * 0.5 + 0.6 * 0.5) * 2
        assert!((result.production - 17.1).abs() < EPS);
        // 2 t * 500 km * 0.022 kg / 1000
        assert!((result.transport - 0.022).abs() < EPS);
        assert!((result.total - 17.122).abs() < EPS);
        assert!((result.baseline - 33.022).abs() < EPS);
        assert!((result.savings - 15.9).abs() < EPS);
        assert!((result.savings_percent - 15.9 / 33.022 * 100.0).abs() < EPS);
    }

    #[rstest]
    fn fully_recycled_uses_recycled_factor(input: CarbonInput) {
        let result = estimate(&CarbonInput {
            recycled_percent: 100.0,
            distance_km: 0.0,
            ..input
        })
        .expect("valid input");
        assert!((result.production - 1.2).abs() < EPS);
    }

    #[rstest]
    #[case(CarbonInput { quantity_tonnes: 0.0, ..base() }, "quantityTonnes")]
    #[case(CarbonInput { quantity_tonnes: f64::NAN, ..base() }, "quantityTonnes")]
    #[case(CarbonInput { recycled_percent: 101.0, ..base() }, "recycledPercent")]
    #[case(CarbonInput { recycled_percent: -1.0, ..base() }, "recycledPercent")]
    #[case(CarbonInput { distance_km: -5.0, ..base() }, "distanceKm")]
    fn rejects_invalid_input(#[case] input: CarbonInput, #[case] field: &str) {
        let err = estimate(&input).expect_err("invalid input");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn deserialises_aliases() {
        let input: CarbonInput = serde_json::from_str(
            r#"{"material":"aluminum","quantityTonnes":1,"recycledPercent":0,
                "transportMode":"sea","distanceKm":10}"#,
        )
        .expect("valid json");
        assert_eq!(input.material, Material::Aluminium);
        assert_eq!(input.transport_mode, TransportMode::Sea);
    }
}

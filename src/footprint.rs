use serde::Serialize;

use crate::factors::{Diet, TransportMode, ELECTRICITY_KG_PER_KWH};
use crate::util::round2;

/// Per-component lifestyle footprint, kg CO2e, each rounded to 2 dp.
///
/// The total is the sum of the rounded components, not the rounded exact sum;
/// this mirrors the figures users see per component.
#[derive(Debug, Clone, Serialize)]
pub struct FootprintResult {
    pub electricity: f64,
    pub transport: f64,
    pub diet: f64,
    pub total: f64,
}

/// Computes a lifestyle carbon footprint from electricity use (kWh), a
/// transport mode and distance (km), and a diet category.
///
/// Unknown transport modes or diets contribute zero with a warning; this
/// never fails.
pub fn compute(electricity_kwh: f64, transport_type: &str, distance_km: f64, diet: &str) -> FootprintResult {
    let electricity = electricity_kwh * ELECTRICITY_KG_PER_KWH;

    let transport = match TransportMode::parse(transport_type) {
        Some(mode) => distance_km * mode.kg_per_km(),
        None => {
            tracing::warn!("unknown transport type: {transport_type}");
            0.0
        }
    };

    let diet = match Diet::parse(diet) {
        Some(category) => category.kg_per_day(),
        None => {
            tracing::warn!("unknown diet type: {diet}");
            0.0
        }
    };

    let electricity = round2(electricity);
    let transport = round2(transport);
    let diet = round2(diet);

    FootprintResult {
        electricity,
        transport,
        diet,
        total: round2(electricity + transport + diet),
    }
}

const GENERAL_TIPS: &[&str] = &[
    "Use LED bulbs which use up to 85% less energy than traditional bulbs",
    "Turn off lights and unplug electronics when not in use",
    "Reduce water usage with shorter showers and fixing leaks",
    "Eat locally grown, seasonal food to reduce transportation emissions",
    "Reduce food waste by planning meals and composting scraps",
];

/// Reduction tips scaled to the size of the footprint, largest first.
pub fn reduction_tips(total_kg: f64) -> Vec<&'static str> {
    let extra: &[&str] = if total_kg > 20.0 {
        &[
            "Consider renewable energy options for your home",
            "Evaluate home insulation to reduce heating/cooling needs",
            "Look into carbon offset programs for unavoidable emissions",
            "Consider reducing air travel when possible",
        ]
    } else if total_kg > 10.0 {
        &[
            "Try to reduce meat consumption a few days per week",
            "Use public transportation more frequently",
            "Consider carpooling or ride-sharing options",
        ]
    } else {
        &[
            "Continue your great sustainability practices",
            "Share your sustainability knowledge with friends and family",
        ]
    };

    GENERAL_TIPS.iter().chain(extra).copied().collect()
}

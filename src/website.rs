use serde::Serialize;

use crate::factors::{
    DATA_TRANSFER_KG_PER_GB, DEFAULT_MONTHLY_VIEWS, SERVER_ENERGY_KG_PER_KWH, SERVER_KWH_PER_GB,
};
use crate::util::round2;

/// Website footprint estimate. `carbon_per_visit` is in grams CO2e for
/// readability; the monthly and annual totals are in kg.
#[derive(Debug, Clone, Serialize)]
pub struct WebsiteFootprint {
    pub website_size_mb: f64,
    pub carbon_per_visit: f64,
    pub monthly_carbon: f64,
    pub annual_carbon: f64,
    pub monthly_views: i64,
}

/// Estimates a website's carbon footprint from its page size and traffic.
///
/// Views default to 10 000 when absent or non-positive. Totals derive from
/// the exact per-visit figure; each reported field is rounded independently.
pub fn compute(size_mb: f64, monthly_views: Option<i64>) -> WebsiteFootprint {
    let views = match monthly_views {
        Some(views) if views > 0 => views,
        _ => DEFAULT_MONTHLY_VIEWS,
    };

    let size_gb = size_mb / 1024.0;
    let data_carbon = size_gb * DATA_TRANSFER_KG_PER_GB;
    let server_carbon = size_gb * SERVER_KWH_PER_GB * SERVER_ENERGY_KG_PER_KWH;
    let per_visit_kg = data_carbon + server_carbon;

    let monthly_kg = per_visit_kg * views as f64;
    let annual_kg = monthly_kg * 12.0;

    WebsiteFootprint {
        website_size_mb: round2(size_mb),
        carbon_per_visit: round2(per_visit_kg * 1000.0),
        monthly_carbon: round2(monthly_kg),
        annual_carbon: round2(annual_kg),
        monthly_views: views,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_size_estimate() {
        let result = compute(2.0, Some(10_000));
        assert_eq!(result.website_size_mb, 2.0);
        assert_eq!(result.carbon_per_visit, 1.77);
        assert_eq!(result.monthly_carbon, 17.68);
        assert_eq!(result.annual_carbon, 212.11);
        assert_eq!(result.monthly_views, 10_000);
    }

    #[test]
    fn views_default_when_absent_or_non_positive() {
        assert_eq!(compute(1.0, None).monthly_views, 10_000);
        assert_eq!(compute(1.0, Some(0)).monthly_views, 10_000);
        assert_eq!(compute(1.0, Some(-5)).monthly_views, 10_000);
        assert_eq!(compute(1.0, Some(250)).monthly_views, 250);
    }

    #[test]
    fn monthly_scales_with_views() {
        let small = compute(2.0, Some(1_000));
        let large = compute(2.0, Some(100_000));
        assert!((large.monthly_carbon / small.monthly_carbon - 100.0).abs() < 0.5);
    }

    #[test]
    fn annual_is_twelve_months() {
        let result = compute(4.0, Some(5_000));
        let exact_per_visit = (4.0 / 1024.0) * (0.81 + 0.2 * 0.475);
        let monthly = exact_per_visit * 5_000.0;
        assert_eq!(result.annual_carbon, round2(monthly * 12.0));
    }
}

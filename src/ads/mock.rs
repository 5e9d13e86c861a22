//! Static fallback dataset
//!
//! Served whenever real data is unavailable or disabled. The note attached to
//! each item tells the dashboard why it is looking at mock data.

use super::metrics::{self, CampaignRow, MetricValue, PerformanceReport};

pub const NO_CREDENTIALS_NOTE: &str = "MOCK DATA - No API credentials found";
pub const NO_CAMPAIGNS_NOTE: &str = "MOCK DATA - No campaign data found for the selected date range";

/// Note used when a failed API call was downgraded to mock data
pub fn error_note(message: &str) -> String {
    format!("ERROR: {}", message)
}

/// Mock account summary
pub fn performance(note: &str) -> PerformanceReport {
    PerformanceReport {
        impressions: MetricValue::count(125_789, 8.5),
        clicks: MetricValue::count(5_432, 12.3),
        conversions: MetricValue::count(321, 5.7),
        cost: MetricValue::text("$4,567.89", 7.8),
        conversion_rate: MetricValue::text("5.9%", -2.1),
        click_through_rate: MetricValue::text("4.3%", 3.5),
        cost_per_conversion: MetricValue::text("$14.23", 2.1),
    }
    .with_note(note)
}

/// Mock campaign table
pub fn campaigns(note: &str) -> Vec<CampaignRow> {
    let rows = vec![
        campaign(
            "Brand Awareness Campaign",
            "$1,500.00",
            (45_672, 2_341, 895.72, 187),
            (5.1, 7.99, 4.79),
        ),
        campaign(
            "Product Promotion",
            "$2,000.00",
            (62_189, 1_978, 1_245.63, 98),
            (3.2, 4.95, 12.71),
        ),
        campaign(
            "Seasonal Sale",
            "$1,200.00",
            (17_928, 1_113, 689.41, 36),
            (6.2, 3.23, 19.15),
        ),
    ];
    metrics::with_note(rows, note)
}

fn campaign(
    name: &str,
    budget: &str,
    (impressions, clicks, cost, conversions): (u64, u64, f64, u64),
    (ctr, conversion_rate, cost_per_conversion): (f64, f64, f64),
) -> CampaignRow {
    CampaignRow {
        name: name.to_string(),
        status: "ENABLED".to_string(),
        budget: budget.to_string(),
        impressions,
        clicks,
        cost,
        conversions,
        ctr,
        conversion_rate,
        cost_per_conversion,
        note: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ads::metrics::MetricDisplay;

    #[test]
    fn test_mock_performance_carries_note() {
        let report = performance(NO_CREDENTIALS_NOTE);
        assert_eq!(report.impressions.value, MetricDisplay::Count(125_789));
        assert_eq!(report.impressions.note.as_deref(), Some(NO_CREDENTIALS_NOTE));
        assert_eq!(report.conversion_rate.change, -2.1);
    }

    #[test]
    fn test_mock_campaigns() {
        let rows = campaigns(&error_note("boom"));
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.note.as_deref() == Some("ERROR: boom")));
        assert_eq!(rows[1].name, "Product Promotion");
    }
}

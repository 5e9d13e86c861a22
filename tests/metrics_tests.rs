//! Tests for dashboard metric payloads

use ads_dashboard::ads::metrics::{
    build_campaign_rows, build_performance_report, with_note, CampaignMetrics, MetricDisplay,
    MetricTotals,
};
use ads_dashboard::ads::{mock, DateRange};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn campaign(id: &str, name: &str, impressions: u64) -> CampaignMetrics {
    CampaignMetrics {
        id: id.to_string(),
        name: name.to_string(),
        status: "ENABLED".to_string(),
        budget_micros: 1_500_000_000,
        impressions,
        clicks: 120,
        cost_micros: 345_670_000,
        conversions: 12.0,
        ctr: 3.456,
        conversion_rate: 10.0,
        cost_per_conversion: 28.805833,
    }
}

#[test]
fn test_report_compares_against_previous_period() {
    let current = MetricTotals {
        impressions: 12_000,
        clicks: 600,
        cost_micros: 1_200_000_000,
        conversions: 30.0,
    };
    let previous = MetricTotals {
        impressions: 10_000,
        clicks: 400,
        cost_micros: 1_000_000_000,
        conversions: 40.0,
    };

    let report = build_performance_report(&current, &previous);

    assert_eq!(report.impressions.value, MetricDisplay::Count(12_000));
    assert_eq!(report.impressions.change, 20.0);
    assert_eq!(report.clicks.change, 50.0);
    assert_eq!(report.conversions.change, -25.0);
    assert_eq!(report.cost.value, MetricDisplay::Text("$1,200.00".to_string()));
    assert_eq!(report.cost.change, 20.0);
    // 5.0% now vs 4.0% before: percentage points
    assert_eq!(report.click_through_rate.value, MetricDisplay::Text("5.0%".to_string()));
    assert_eq!(report.click_through_rate.change, 1.0);
    // 5.0% now vs 10.0% before
    assert_eq!(report.conversion_rate.change, -5.0);
    // $40 now vs $25 before
    assert_eq!(report.cost_per_conversion.value, MetricDisplay::Text("$40.00".to_string()));
    assert_eq!(report.cost_per_conversion.change, 60.0);
}

#[test]
fn test_report_without_history_has_zero_change() {
    let current = MetricTotals {
        impressions: 10,
        clicks: 1,
        cost_micros: 0,
        conversions: 0.0,
    };

    let report = build_performance_report(&current, &MetricTotals::default());
    assert_eq!(report.impressions.change, 0.0);
    assert_eq!(report.cost_per_conversion.value, MetricDisplay::Text("$0.00".to_string()));
}

#[test]
fn test_totals_collect_from_rows() {
    let rows = [
        MetricTotals {
            impressions: 100,
            clicks: 10,
            cost_micros: 1_000_000,
            conversions: 1.5,
        },
        MetricTotals {
            impressions: 50,
            clicks: 5,
            cost_micros: 500_000,
            conversions: 0.5,
        },
    ];

    let totals: MetricTotals = rows.iter().collect();
    assert_eq!(totals.impressions, 150);
    assert_eq!(totals.clicks, 15);
    assert_eq!(totals.cost(), 1.5);
    assert_eq!(totals.conversions, 2.0);
}

#[test]
fn test_campaign_rows_dedupe_and_convert() {
    let rows = build_campaign_rows(vec![
        campaign("1", "Brand", 5_000),
        campaign("2", "Generic", 3_000),
        campaign("1", "Brand (segment)", 1_000),
    ]);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Brand");
    assert_eq!(rows[0].impressions, 5_000);
    assert_eq!(rows[0].budget, "$1,500.00");
    assert_eq!(rows[0].cost, 345.67);
    assert_eq!(rows[0].conversions, 12);
    assert_eq!(rows[0].ctr, 3.5);
    assert_eq!(rows[0].cost_per_conversion, 28.81);
    assert_eq!(rows[0].note, None);
    assert_eq!(rows[1].name, "Generic");
}

#[test]
fn test_notes_apply_to_every_row() {
    let rows = with_note(build_campaign_rows(vec![campaign("7", "Only", 1)]), "note");
    assert!(rows.iter().all(|r| r.note.as_deref() == Some("note")));

    let mock_rows = mock::campaigns(mock::NO_CAMPAIGNS_NOTE);
    assert!(mock_rows
        .iter()
        .all(|r| r.note.as_deref() == Some(mock::NO_CAMPAIGNS_NOTE)));
}

#[test]
fn test_campaign_row_serialization() {
    let rows = mock::campaigns(mock::NO_CREDENTIALS_NOTE);
    let json = serde_json::to_value(&rows[0]).unwrap();

    for key in [
        "name",
        "status",
        "budget",
        "impressions",
        "clicks",
        "cost",
        "conversions",
        "ctr",
        "conversion_rate",
        "cost_per_conversion",
        "note",
    ] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }
}

#[test]
fn test_date_ranges() {
    let range = DateRange::last_30_days(date(2024, 6, 1));
    assert_eq!(range.end, date(2024, 5, 31));
    assert_eq!(range.start, date(2024, 5, 1));

    let previous = range.previous_period().unwrap();
    assert_eq!(previous.end, date(2024, 4, 30));
    assert_eq!(previous.days(), range.days());

    let explicit =
        DateRange::from_params(Some("2024-01-01"), Some("2024-01-31"), date(2024, 6, 1)).unwrap();
    assert_eq!(
        explicit.gaql_filter(),
        "segments.date BETWEEN '2024-01-01' AND '2024-01-31'"
    );

    let fallback = DateRange::from_params(Some("2024-01-01"), None, date(2024, 6, 1)).unwrap();
    assert_eq!(fallback, range);
}

//! Dashboard metric payloads and the arithmetic behind them
//!
//! Raw API rows are summed into [`MetricTotals`]; the dashboard payloads are
//! derived from totals of the requested period and of the period before it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MICROS_PER_UNIT: f64 = 1_000_000.0;

/// Displayed value of a metric card: a plain count or preformatted text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricDisplay {
    Count(u64),
    Text(String),
}

/// One metric card: current value, change vs the previous period, optional note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    pub value: MetricDisplay,
    pub change: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MetricValue {
    pub fn count(value: u64, change: f64) -> Self {
        Self {
            value: MetricDisplay::Count(value),
            change,
            note: None,
        }
    }

    pub fn text(value: impl Into<String>, change: f64) -> Self {
        Self {
            value: MetricDisplay::Text(value.into()),
            change,
            note: None,
        }
    }
}

/// Account-level performance summary served to the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub impressions: MetricValue,
    pub clicks: MetricValue,
    pub conversions: MetricValue,
    pub cost: MetricValue,
    pub conversion_rate: MetricValue,
    pub click_through_rate: MetricValue,
    pub cost_per_conversion: MetricValue,
}

impl PerformanceReport {
    fn metrics_mut(&mut self) -> [&mut MetricValue; 7] {
        [
            &mut self.impressions,
            &mut self.clicks,
            &mut self.conversions,
            &mut self.cost,
            &mut self.conversion_rate,
            &mut self.click_through_rate,
            &mut self.cost_per_conversion,
        ]
    }

    /// Attach the same note to every metric
    pub fn with_note(mut self, note: &str) -> Self {
        for metric in self.metrics_mut() {
            metric.note = Some(note.to_string());
        }
        self
    }
}

/// One row of the campaign table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRow {
    pub name: String,
    pub status: String,
    pub budget: String,
    pub impressions: u64,
    pub clicks: u64,
    pub cost: f64,
    pub conversions: u64,
    pub ctr: f64,
    pub conversion_rate: f64,
    pub cost_per_conversion: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Attach the same note to every campaign row
pub fn with_note(rows: Vec<CampaignRow>, note: &str) -> Vec<CampaignRow> {
    rows.into_iter()
        .map(|row| CampaignRow {
            note: Some(note.to_string()),
            ..row
        })
        .collect()
}

/// Summed raw metrics over a period
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricTotals {
    pub impressions: u64,
    pub clicks: u64,
    pub cost_micros: u64,
    pub conversions: f64,
}

impl MetricTotals {
    pub fn add(&mut self, other: &MetricTotals) {
        self.impressions += other.impressions;
        self.clicks += other.clicks;
        self.cost_micros += other.cost_micros;
        self.conversions += other.conversions;
    }

    pub fn cost(&self) -> f64 {
        micros_to_units(self.cost_micros)
    }

    /// Click-through rate in percent
    pub fn ctr(&self) -> f64 {
        ratio_percent(self.clicks as f64, self.impressions as f64)
    }

    /// Conversions per click in percent
    pub fn conversion_rate(&self) -> f64 {
        ratio_percent(self.conversions, self.clicks as f64)
    }

    pub fn cost_per_conversion(&self) -> f64 {
        if self.conversions == 0.0 {
            0.0
        } else {
            self.cost() / self.conversions
        }
    }
}

impl<'a> FromIterator<&'a MetricTotals> for MetricTotals {
    fn from_iter<I: IntoIterator<Item = &'a MetricTotals>>(iter: I) -> Self {
        let mut totals = MetricTotals::default();
        for row in iter {
            totals.add(row);
        }
        totals
    }
}

/// Build the dashboard summary from the current and previous period totals
///
/// Counts, cost and cost per conversion report a relative change in percent;
/// CTR and conversion rate report the difference in percentage points.
pub fn build_performance_report(
    current: &MetricTotals,
    previous: &MetricTotals,
) -> PerformanceReport {
    let ctr_change = current.ctr() - previous.ctr();
    let conversion_rate_change = current.conversion_rate() - previous.conversion_rate();

    PerformanceReport {
        impressions: MetricValue::count(
            current.impressions,
            round_to(
                relative_change(current.impressions as f64, previous.impressions as f64),
                1,
            ),
        ),
        clicks: MetricValue::count(
            current.clicks,
            round_to(
                relative_change(current.clicks as f64, previous.clicks as f64),
                1,
            ),
        ),
        conversions: MetricValue::count(
            current.conversions as u64,
            round_to(relative_change(current.conversions, previous.conversions), 1),
        ),
        cost: MetricValue::text(
            format_currency(current.cost()),
            round_to(
                relative_change(current.cost_micros as f64, previous.cost_micros as f64),
                1,
            ),
        ),
        conversion_rate: MetricValue::text(
            format_percent(current.conversion_rate()),
            round_to(conversion_rate_change, 1),
        ),
        click_through_rate: MetricValue::text(
            format_percent(current.ctr()),
            round_to(ctr_change, 1),
        ),
        cost_per_conversion: MetricValue::text(
            format_currency(current.cost_per_conversion()),
            round_to(
                relative_change(
                    current.cost_per_conversion(),
                    previous.cost_per_conversion(),
                ),
                1,
            ),
        ),
    }
}

/// Per-campaign metrics as decoded from the API
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CampaignMetrics {
    pub id: String,
    pub name: String,
    pub status: String,
    pub budget_micros: u64,
    pub impressions: u64,
    pub clicks: u64,
    pub cost_micros: u64,
    pub conversions: f64,
    /// Percent
    pub ctr: f64,
    /// Percent
    pub conversion_rate: f64,
    /// Currency units
    pub cost_per_conversion: f64,
}

/// Convert decoded campaigns into table rows, keeping the first row per campaign id
pub fn build_campaign_rows(campaigns: Vec<CampaignMetrics>) -> Vec<CampaignRow> {
    let mut seen = HashSet::new();

    campaigns
        .into_iter()
        .filter(|c| seen.insert(c.id.clone()))
        .map(|c| CampaignRow {
            name: c.name,
            status: c.status,
            budget: format_currency(micros_to_units(c.budget_micros)),
            impressions: c.impressions,
            clicks: c.clicks,
            cost: micros_to_units(c.cost_micros),
            conversions: c.conversions as u64,
            ctr: round_to(c.ctr, 1),
            conversion_rate: round_to(c.conversion_rate, 2),
            cost_per_conversion: round_to(c.cost_per_conversion, 2),
            note: None,
        })
        .collect()
}

pub fn micros_to_units(micros: u64) -> f64 {
    micros as f64 / MICROS_PER_UNIT
}

fn ratio_percent(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}

/// Relative change in percent; 0 when there is no previous value
pub fn relative_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Format as US dollars with thousands separators, e.g. `$4,567.89`
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

/// Format a percentage with one decimal, e.g. `5.9%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

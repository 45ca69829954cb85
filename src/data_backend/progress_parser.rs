use std::time::Instant;

use serde_json::Value;

use crate::data_backend::{
    decode_records, parse_decimal, parse_recorded_at, short_date_fmt, trend::trend,
    unwrap_collection,
};
use crate::data_types::{
    progress_data_types::ProgressEntry, ChartPanel, Metric, MetricSeries, ProgressChart,
};

/// Entries from a `/progress/my` body, in fetched order.
pub fn entries_from_body(body: Value) -> Vec<ProgressEntry> {
    decode_records(unwrap_collection(body))
}

/// Oldest first. Ties and undated entries keep their fetched order,
/// undated ones go last.
pub fn sort_by_recorded_at(entries: &[ProgressEntry]) -> Vec<&ProgressEntry> {
    let mut sorted: Vec<&ProgressEntry> = entries.iter().collect();
    sorted.sort_by_cached_key(|entry| {
        let recorded_at = parse_recorded_at(entry.date_str());
        (recorded_at.is_none(), recorded_at)
    });
    sorted
}

pub fn metric_series(sorted: &[&ProgressEntry], metric: Metric) -> MetricSeries {
    MetricSeries(
        sorted
            .iter()
            .map(|entry| entry.raw_metric(metric).and_then(parse_decimal))
            .collect(),
    )
}

/// Builds the date labels and all six parallel series. Always returns
/// index-aligned series, empty ones for an empty history.
pub fn build_chart(entries: &[ProgressEntry]) -> ProgressChart {
    let now = Instant::now();
    let sorted = sort_by_recorded_at(entries);

    let dates = sorted
        .iter()
        .map(|entry| short_date_fmt(entry.date_str()))
        .collect();

    let weight_data = metric_series(&sorted, Metric::Weight);
    let chest_data = metric_series(&sorted, Metric::Chest);
    let waist_data = metric_series(&sorted, Metric::Waist);

    let chart = ProgressChart {
        dates,
        weight_trend: trend(&weight_data),
        chest_trend: trend(&chest_data),
        waist_trend: trend(&waist_data),
        weight_data,
        chest_data,
        waist_data,
        arm_data: metric_series(&sorted, Metric::Arm),
        hip_data: metric_series(&sorted, Metric::Hip),
        body_fat_data: metric_series(&sorted, Metric::BodyFat),
    };

    log::debug!("Chart for {} entries: {:.2?}", entries.len(), now.elapsed());
    chart
}

/// Chart data for the progress tab, `None` when nothing was recorded yet.
pub fn prepare_chart_data(entries: &[ProgressEntry]) -> Option<ProgressChart> {
    if entries.is_empty() {
        return None;
    }
    Some(build_chart(entries))
}

pub fn visible_panels(chart: &ProgressChart) -> Vec<ChartPanel> {
    let mut panels = Vec::new();
    if chart.weight_data.has_values() {
        panels.push(ChartPanel::Weight);
    }
    if [Metric::Chest, Metric::Waist, Metric::Arm, Metric::Hip]
        .iter()
        .any(|m| chart.series(*m).has_values())
    {
        panels.push(ChartPanel::Measurements);
    }
    if chart.body_fat_data.has_values() {
        panels.push(ChartPanel::BodyFat);
    }
    panels
}

/// Body-mass index rounded to one decimal.
pub fn bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    let (height_cm, weight_kg) = (height_cm?, weight_kg?);
    if height_cm <= 0.0 || weight_kg <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some((weight_kg / (height_m * height_m) * 10.0).round() / 10.0)
}

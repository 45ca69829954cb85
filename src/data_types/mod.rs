pub mod diet_data_types;
pub mod lenient;
pub mod progress_data_types;

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::errors::PortalError;

/// Names follow `Display`/`FromStr` ("body-fat"), which is what the CLI takes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    Weight,
    Chest,
    Waist,
    Arm,
    Hip,
    BodyFat,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Weight,
        Metric::Chest,
        Metric::Waist,
        Metric::Arm,
        Metric::Hip,
        Metric::BodyFat,
    ];

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Weight => "kg",
            Metric::BodyFat => "%",
            _ => "cm",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Metric::Weight => "Weight",
            Metric::Chest => "Chest",
            Metric::Waist => "Waist",
            Metric::Arm => "Arm",
            Metric::Hip => "Hip",
            Metric::BodyFat => "Body Fat",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::Weight => "weight",
            Metric::Chest => "chest",
            Metric::Waist => "waist",
            Metric::Arm => "arm",
            Metric::Hip => "hip",
            Metric::BodyFat => "body-fat",
        };
        f.write_str(name)
    }
}

impl FromStr for Metric {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weight" => Ok(Metric::Weight),
            "chest" => Ok(Metric::Chest),
            "waist" => Ok(Metric::Waist),
            "arm" => Ok(Metric::Arm),
            "hip" => Ok(Metric::Hip),
            "body-fat" | "bodyfat" | "body_fat" => Ok(Metric::BodyFat),
            other => Err(PortalError::UnknownMetric(other.to_string())),
        }
    }
}

/// One metric across all entries, index-aligned with [`ProgressChart::dates`].
/// Missing or unreadable values stay in place as `None`.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct MetricSeries(pub Vec<Option<f64>>);

impl MetricSeries {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().flatten().copied()
    }

    pub fn has_values(&self) -> bool {
        self.0.iter().any(Option::is_some)
    }
}

#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct Trend {
    pub first: f64,
    pub last: f64,
    pub change: f64,
}

#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrendDirection {
    Improving,
    Declining,
    Unchanged,
}

#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChartPanel {
    Weight,
    Measurements,
    BodyFat,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProgressChart {
    pub dates: Vec<String>,
    pub weight_data: MetricSeries,
    pub chest_data: MetricSeries,
    pub waist_data: MetricSeries,
    pub arm_data: MetricSeries,
    pub hip_data: MetricSeries,
    pub body_fat_data: MetricSeries,
    pub weight_trend: Option<Trend>,
    pub chest_trend: Option<Trend>,
    pub waist_trend: Option<Trend>,
}

impl ProgressChart {
    pub fn series(&self, metric: Metric) -> &MetricSeries {
        match metric {
            Metric::Weight => &self.weight_data,
            Metric::Chest => &self.chest_data,
            Metric::Waist => &self.waist_data,
            Metric::Arm => &self.arm_data,
            Metric::Hip => &self.hip_data,
            Metric::BodyFat => &self.body_fat_data,
        }
    }

    /// Trends shown as summary cards, in display order.
    pub fn summary_trends(&self) -> Vec<(Metric, Trend)> {
        [
            (Metric::Weight, self.weight_trend),
            (Metric::Chest, self.chest_trend),
            (Metric::Waist, self.waist_trend),
        ]
        .into_iter()
        .filter_map(|(metric, trend)| trend.map(|t| (metric, t)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_round_trip_through_display() {
        for metric in Metric::ALL {
            assert_eq!(metric.to_string().parse::<Metric>().unwrap(), metric);
        }
        assert_eq!(Metric::BodyFat.to_string(), "body-fat");
        assert_eq!(" BodyFat ".parse::<Metric>().unwrap(), Metric::BodyFat);
        assert!(matches!(
            "bmi".parse::<Metric>(),
            Err(PortalError::UnknownMetric(name)) if name == "bmi"
        ));
    }
}

use std::collections::BTreeSet;

use crate::data_types::{Metric, MetricSeries, Trend, TrendDirection};

/// First-vs-last change over the recorded values of a series.
/// Needs at least two values; a single reading has no trend.
pub fn trend(series: &MetricSeries) -> Option<Trend> {
    let mut values = series.values();
    let first = values.next()?;
    let last = values.last()?;

    Some(Trend {
        first,
        last,
        change: last - first,
    })
}

/// Which metrics count as improving when they go down.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPolicy {
    lower_is_better: BTreeSet<Metric>,
}

impl Default for TrendPolicy {
    fn default() -> Self {
        Self::with_lower_is_better([Metric::Weight, Metric::Waist, Metric::Hip, Metric::BodyFat])
    }
}

impl TrendPolicy {
    pub fn with_lower_is_better(metrics: impl IntoIterator<Item = Metric>) -> Self {
        Self {
            lower_is_better: metrics.into_iter().collect(),
        }
    }

    pub fn is_lower_better(&self, metric: Metric) -> bool {
        self.lower_is_better.contains(&metric)
    }

    pub fn assess(&self, metric: Metric, trend: &Trend) -> TrendDirection {
        if trend.change == 0.0 {
            return TrendDirection::Unchanged;
        }

        let went_down = trend.change < 0.0;
        if went_down == self.is_lower_better(metric) {
            TrendDirection::Improving
        } else {
            TrendDirection::Declining
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[Option<f64>]) -> MetricSeries {
        MetricSeries(values.to_vec())
    }

    #[test]
    fn first_vs_last() {
        let t = trend(&series(&[Some(70.0), Some(68.0), Some(65.0)])).unwrap();
        assert_eq!(
            t,
            Trend {
                first: 70.0,
                last: 65.0,
                change: -5.0
            }
        );
    }

    #[test]
    fn gaps_are_skipped() {
        let t = trend(&series(&[None, Some(90.0), None, Some(94.5), None])).unwrap();
        assert_eq!(t.first, 90.0);
        assert_eq!(t.last, 94.5);
        assert_eq!(t.change, 4.5);
    }

    #[test]
    fn single_value_has_no_trend() {
        assert_eq!(trend(&series(&[None, Some(80.0), None])), None);
        assert_eq!(trend(&series(&[])), None);
        assert_eq!(trend(&series(&[None, None])), None);
    }

    #[test]
    fn equal_endpoints_still_trend() {
        let t = trend(&series(&[Some(80.0), Some(82.0), Some(80.0)])).unwrap();
        assert_eq!(t.change, 0.0);
    }

    #[test]
    fn default_policy_directions() {
        let policy = TrendPolicy::default();
        let down = Trend {
            first: 82.0,
            last: 80.0,
            change: -2.0,
        };
        let flat = Trend {
            first: 80.0,
            last: 80.0,
            change: 0.0,
        };
        assert_eq!(policy.assess(Metric::Weight, &down), TrendDirection::Improving);
        assert_eq!(policy.assess(Metric::Chest, &down), TrendDirection::Declining);
        assert_eq!(policy.assess(Metric::Arm, &flat), TrendDirection::Unchanged);
    }

    #[test]
    fn policy_can_be_overridden() {
        let policy = TrendPolicy::with_lower_is_better([Metric::Chest]);
        let up = Trend {
            first: 80.0,
            last: 81.0,
            change: 1.0,
        };
        assert_eq!(policy.assess(Metric::Weight, &up), TrendDirection::Improving);
        assert_eq!(policy.assess(Metric::Chest, &up), TrendDirection::Declining);
    }
}

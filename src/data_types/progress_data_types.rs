use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient, Metric};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecordedBy {
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: Option<String>,
}

/// A body-measurement record as returned by `/progress/my`.
///
/// Measurement fields are kept as raw JSON since the backend sends decimal
/// columns as strings, while older rows carry plain numbers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    #[serde(default)]
    pub id: Value,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date_recorded: Option<String>,
    pub weight_kg: Option<Value>,
    pub chest_cm: Option<Value>,
    pub waist_cm: Option<Value>,
    pub arm_cm: Option<Value>,
    pub hip_cm: Option<Value>,
    pub body_fat_percent: Option<Value>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub photo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub recorded_by: Option<RecordedBy>,
}

impl ProgressEntry {
    /// Raw `dateRecorded`, empty when the backend sent none.
    pub fn date_str(&self) -> &str {
        self.date_recorded.as_deref().unwrap_or_default()
    }

    pub fn raw_metric(&self, metric: Metric) -> Option<&Value> {
        match metric {
            Metric::Weight => self.weight_kg.as_ref(),
            Metric::Chest => self.chest_cm.as_ref(),
            Metric::Waist => self.waist_cm.as_ref(),
            Metric::Arm => self.arm_cm.as_ref(),
            Metric::Hip => self.hip_cm.as_ref(),
            Metric::BodyFat => self.body_fat_percent.as_ref(),
        }
    }
}

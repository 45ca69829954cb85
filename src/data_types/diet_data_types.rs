use std::fmt;

use serde::{
    de::{IgnoredAny, MapAccess, SeqAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::Value;

use super::lenient;

/// A diet plan row from `/diet-plans/my`. The plan itself is stored as a
/// JSON document inside `plan_text`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanRecord {
    #[serde(default)]
    pub id: Value,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub plan_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub effective_from: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub effective_to: Option<String>,
}

/// Only malformed JSON fails a plan. Mistyped fields inside well-formed
/// JSON decode to their empty values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct DietPlanDocument {
    #[serde(default, deserialize_with = "lenient::record")]
    pub macros: Option<Macros>,
    #[serde(default)]
    pub meals: MealSlots,
    #[serde(default, deserialize_with = "lenient::string")]
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Macros {
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub calories: Option<Quantity>,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub protein: Option<Quantity>,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub carbs: Option<Quantity>,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub fats: Option<Quantity>,
}

/// Trainers type macros either as numbers or free text ("2000", "150-160").
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Quantity {
    Number(f64),
    Text(String),
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Number(n) => write!(f, "{}", n),
            Quantity::Text(t) => f.write_str(t),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct MealEntry {
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "lenient::string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub items: Vec<String>,
}

/// Meal slots in the order the trainer wrote them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MealSlots(pub Vec<(String, MealEntry)>);

impl MealSlots {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MealEntry)> {
        self.0.iter().map(|(key, meal)| (key.as_str(), meal))
    }

    pub fn get(&self, key: &str) -> Option<&MealEntry> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, meal)| meal)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for MealSlots {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, meal) in &self.0 {
            map.serialize_entry(key, meal)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MealSlots {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MealSlotsVisitor;

        impl<'de> Visitor<'de> for MealSlotsVisitor {
            type Value = MealSlots;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of meal keys to meals")
            }

            fn visit_map<V>(self, mut map: V) -> Result<MealSlots, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut slots: Vec<(String, MealEntry)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
                    // a slot that isn't an object can't be enabled
                    let Ok(meal) = serde_json::from_value::<MealEntry>(value) else {
                        continue;
                    };
                    // a repeated key replaces the earlier meal in place
                    if let Some(existing) = slots.iter_mut().find(|(k, _)| *k == key) {
                        existing.1 = meal;
                    } else {
                        slots.push((key, meal));
                    }
                }
                Ok(MealSlots(slots))
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<MealSlots, V::Error>
            where
                V: SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(MealSlots::default())
            }

            fn visit_unit<E>(self) -> Result<MealSlots, E>
            where
                E: serde::de::Error,
            {
                Ok(MealSlots::default())
            }

            fn visit_bool<E>(self, _: bool) -> Result<MealSlots, E>
            where
                E: serde::de::Error,
            {
                Ok(MealSlots::default())
            }

            fn visit_i64<E>(self, _: i64) -> Result<MealSlots, E>
            where
                E: serde::de::Error,
            {
                Ok(MealSlots::default())
            }

            fn visit_u64<E>(self, _: u64) -> Result<MealSlots, E>
            where
                E: serde::de::Error,
            {
                Ok(MealSlots::default())
            }

            fn visit_f64<E>(self, _: f64) -> Result<MealSlots, E>
            where
                E: serde::de::Error,
            {
                Ok(MealSlots::default())
            }

            fn visit_str<E>(self, _: &str) -> Result<MealSlots, E>
            where
                E: serde::de::Error,
            {
                Ok(MealSlots::default())
            }
        }

        deserializer.deserialize_any(MealSlotsVisitor)
    }
}

#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MealIcon {
    Sun,
    Coffee,
    Utensils,
    Cookie,
    Moon,
    Apple,
}

/// An enabled meal, ready for a list renderer.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PresentedMeal {
    pub key: String,
    pub label: String,
    pub icon: MealIcon,
    pub emoji: &'static str,
    pub time: Option<String>,
    pub items: Vec<String>,
}

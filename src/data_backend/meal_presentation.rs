use crate::data_types::diet_data_types::{MealIcon, MealSlots, PresentedMeal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealSlot {
    Breakfast,
    MorningSnack,
    Lunch,
    AfternoonSnack,
    Dinner,
    EveningSnack,
    Other(String),
}

impl MealSlot {
    pub fn from_key(key: &str) -> Self {
        match key {
            "breakfast" => MealSlot::Breakfast,
            "morning-snack" => MealSlot::MorningSnack,
            "lunch" => MealSlot::Lunch,
            "afternoon-snack" => MealSlot::AfternoonSnack,
            "dinner" => MealSlot::Dinner,
            "evening-snack" => MealSlot::EveningSnack,
            other => MealSlot::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            MealSlot::Breakfast => "Breakfast".to_string(),
            MealSlot::MorningSnack => "Morning Snack".to_string(),
            MealSlot::Lunch => "Lunch".to_string(),
            MealSlot::AfternoonSnack => "Afternoon Snack".to_string(),
            MealSlot::Dinner => "Dinner".to_string(),
            MealSlot::EveningSnack => "Evening Snack".to_string(),
            MealSlot::Other(key) => title_case_key(key),
        }
    }

    pub fn icon(&self) -> MealIcon {
        match self {
            MealSlot::Breakfast => MealIcon::Sun,
            MealSlot::MorningSnack => MealIcon::Coffee,
            MealSlot::Lunch => MealIcon::Utensils,
            MealSlot::AfternoonSnack => MealIcon::Cookie,
            MealSlot::Dinner => MealIcon::Moon,
            MealSlot::EveningSnack => MealIcon::Apple,
            MealSlot::Other(_) => MealIcon::Utensils,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "🌅",
            MealSlot::MorningSnack => "☕",
            MealSlot::Lunch => "🍽️",
            MealSlot::AfternoonSnack => "🍪",
            MealSlot::Dinner => "🌙",
            MealSlot::EveningSnack => "🍎",
            MealSlot::Other(_) => "🍴",
        }
    }
}

/// "post-workout" -> "Post Workout"
fn title_case_key(key: &str) -> String {
    key.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Enabled meals in plan order, items untouched.
pub fn present_meals(meals: &MealSlots) -> Vec<PresentedMeal> {
    meals
        .iter()
        .filter(|(_, meal)| meal.enabled)
        .map(|(key, meal)| {
            let slot = MealSlot::from_key(key);
            PresentedMeal {
                key: key.to_string(),
                label: slot.label(),
                icon: slot.icon(),
                emoji: slot.emoji(),
                time: meal.time.clone(),
                items: meal.items.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::diet_data_types::MealEntry;

    fn meal(enabled: bool, items: &[&str]) -> MealEntry {
        MealEntry {
            enabled,
            time: None,
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn disabled_meals_are_hidden() {
        let meals = MealSlots(vec![
            ("breakfast".into(), meal(false, &["Oats"])),
            ("lunch".into(), meal(true, &["Eggs"])),
        ]);
        let presented = present_meals(&meals);

        assert_eq!(presented.len(), 1);
        assert_eq!(presented[0].key, "lunch");
        assert_eq!(presented[0].label, "Lunch");
        assert_eq!(presented[0].icon, MealIcon::Utensils);
        assert_eq!(presented[0].items, vec!["Eggs"]);
    }

    #[test]
    fn plan_order_and_items_are_kept() {
        let meals = MealSlots(vec![
            ("dinner".into(), meal(true, &["Soup", "Bread", "Soup"])),
            ("breakfast".into(), meal(true, &["Oats"])),
            ("post-workout".into(), meal(true, &[])),
        ]);
        let presented = present_meals(&meals);

        let labels: Vec<&str> = presented.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Dinner", "Breakfast", "Post Workout"]);
        assert_eq!(presented[0].items, vec!["Soup", "Bread", "Soup"]);
        assert!(presented[2].items.is_empty());
    }

    #[test]
    fn known_slot_metadata() {
        let slot = MealSlot::from_key("afternoon-snack");
        assert_eq!(slot, MealSlot::AfternoonSnack);
        assert_eq!(slot.label(), "Afternoon Snack");
        assert_eq!(slot.icon(), MealIcon::Cookie);
        assert_eq!(slot.emoji(), "🍪");
        assert_eq!(MealSlot::from_key("evening-snack").icon(), MealIcon::Apple);
    }

    #[test]
    fn unknown_slot_fallback() {
        let slot = MealSlot::from_key("pre-bed-shake");
        assert_eq!(slot.label(), "Pre Bed Shake");
        assert_eq!(slot.icon(), MealIcon::Utensils);
        assert_eq!(slot.emoji(), "🍴");
        assert_eq!(MealSlot::from_key("supper").label(), "Supper");
        assert_eq!(MealSlot::from_key("late--snack").label(), "Late  Snack");
    }
}

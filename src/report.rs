use crate::constants::{NO_MEALS_MSG, NO_PLAN_MSG, NO_PROGRESS_MSG};
use crate::data_backend::{
    diet_parser::parse_record,
    long_date_fmt,
    meal_presentation::present_meals,
    parse_decimal,
    progress_parser::{bmi, prepare_chart_data, visible_panels},
    trend::TrendPolicy,
};
use crate::data_types::{
    diet_data_types::{DietPlanRecord, Macros},
    progress_data_types::ProgressEntry,
    ChartPanel, Metric, Trend, TrendDirection,
};

pub fn build_plan_msg(plan: Option<&DietPlanRecord>) -> String {
    let mut msg = String::new();

    let Some(plan) = plan else {
        msg += &format!("{}\n", NO_PLAN_MSG);
        return msg;
    };

    msg += &format!("== {} ==\n", plan.title.as_deref().unwrap_or("Diet Plan"));
    if let Some(from) = plan.effective_from.as_deref() {
        msg += &format!("Effective from {}", long_date_fmt(from));
        if let Some(to) = plan.effective_to.as_deref() {
            msg += &format!(" to {}", long_date_fmt(to));
        }
        msg += "\n";
    }

    let document = parse_record(plan);
    if let Some(macros) = document.as_ref().and_then(|d| d.macros.as_ref()) {
        let line = macros_line(macros);
        if !line.is_empty() {
            msg += &format!("\n{}\n", line);
        }
    }

    msg += "\nYour Daily Meals\n";
    let meals = document
        .as_ref()
        .map(|d| present_meals(&d.meals))
        .unwrap_or_default();

    if meals.is_empty() {
        msg += &format!(" {}\n", NO_MEALS_MSG);
    }

    for meal in meals {
        msg += &format!("\n{} {}", meal.emoji, meal.label);
        if let Some(time) = meal.time.as_deref().filter(|t| !t.is_empty()) {
            msg += &format!("  ⏰ {}", time);
        }
        msg += "\n";
        for item in &meal.items {
            msg += &format!(" • {}\n", item);
        }
    }

    if let Some(notes) = document.as_ref().and_then(|d| d.notes.as_deref()) {
        msg += &format!("\nNotes: {}\n", notes);
    }

    msg
}

fn macros_line(macros: &Macros) -> String {
    let parts = [
        ("Calories", &macros.calories, ""),
        ("Protein", &macros.protein, "g"),
        ("Carbs", &macros.carbs, "g"),
        ("Fats", &macros.fats, "g"),
    ];

    parts
        .iter()
        .filter_map(|&(name, qty, unit)| qty.as_ref().map(|q| format!("{}: {}{}", name, q, unit)))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn signed_change(change: f64) -> String {
    if change > 0.0 {
        format!("+{:.1}", change)
    } else {
        format!("{:.1}", change)
    }
}

fn trend_card(metric: Metric, trend: &Trend, policy: &TrendPolicy) -> String {
    let marker = match policy.assess(metric, trend) {
        TrendDirection::Improving => "▲ improving",
        TrendDirection::Declining => "▼ declining",
        TrendDirection::Unchanged => "= unchanged",
    };
    let unit = metric.unit();

    format!(
        " • {}: {} {}  ({})\n     {}{} → {}{}\n",
        metric.title(),
        signed_change(trend.change),
        unit,
        marker,
        trend.first,
        unit,
        trend.last,
        unit
    )
}

pub fn build_progress_msg(
    entries: &[ProgressEntry],
    policy: &TrendPolicy,
    height_cm: Option<f64>,
) -> String {
    let mut msg = String::new();

    let Some(chart) = prepare_chart_data(entries) else {
        msg += &format!("{}\n", NO_PROGRESS_MSG);
        return msg;
    };

    msg += "== Progress ==\n";
    for (metric, trend) in chart.summary_trends() {
        msg += &trend_card(metric, &trend, policy);
    }

    if let Some(bmi) = bmi(height_cm, chart.weight_data.values().last()) {
        msg += &format!(" • BMI: {:.1}\n", bmi);
    }

    let panels: Vec<&str> = visible_panels(&chart)
        .into_iter()
        .map(|panel| match panel {
            ChartPanel::Weight => "weight",
            ChartPanel::Measurements => "measurements",
            ChartPanel::BodyFat => "body fat",
        })
        .collect();
    if !panels.is_empty() {
        msg += &format!("\nCharts: {} ({} points)\n", panels.join(", "), chart.dates.len());
    }

    msg += "\nProgress History\n";
    for entry in entries {
        msg += &format!("\n{}\n", long_date_fmt(entry.date_str()));
        for metric in Metric::ALL {
            if let Some(value) = entry.raw_metric(metric).and_then(parse_decimal) {
                msg += &format!("   {}: {}{}\n", metric.title(), value, metric.unit());
            }
        }
        if let Some(notes) = entry.notes.as_deref().filter(|n| !n.is_empty()) {
            msg += &format!("   Notes: {}\n", notes);
        }
        if let Some(email) = entry.recorded_by.as_ref().and_then(|r| r.email.as_deref()) {
            msg += &format!("   Recorded by {}\n", email);
        }
        if entry.photo_url.is_some() {
            msg += "   📷 Progress Photo\n";
        }
    }

    msg
}

pub fn build_report(
    plan: Option<&DietPlanRecord>,
    entries: &[ProgressEntry],
    policy: &TrendPolicy,
    height_cm: Option<f64>,
) -> String {
    format!(
        "{}\n{}",
        build_plan_msg(plan),
        build_progress_msg(entries, policy, height_cm)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plan(plan_text: Option<&str>) -> DietPlanRecord {
        DietPlanRecord {
            id: json!(1),
            title: Some("Lean Bulk".into()),
            plan_text: plan_text.map(str::to_string),
            effective_from: Some("2024-03-01".into()),
            effective_to: Some("2024-06-01".into()),
        }
    }

    #[test]
    fn plan_msg_lists_enabled_meals() {
        let record = plan(Some(
            r#"{"macros":{"calories":2800,"protein":"180"},
                "meals":{"breakfast":{"enabled":false,"items":["Oats"]},
                         "lunch":{"enabled":true,"time":"12:30","items":["Rice","Chicken"]}}}"#,
        ));
        let msg = build_plan_msg(Some(&record));

        assert!(msg.contains("== Lean Bulk =="));
        assert!(msg.contains("Effective from March 1, 2024 to June 1, 2024"));
        assert!(msg.contains("Calories: 2800 | Protein: 180g"));
        assert!(msg.contains("🍽️ Lunch  ⏰ 12:30\n • Rice\n • Chicken\n"));
        assert!(!msg.contains("Breakfast"));
    }

    #[test]
    fn broken_plan_shows_no_meals() {
        let msg = build_plan_msg(Some(&plan(Some("not json"))));
        assert!(msg.contains(NO_MEALS_MSG));
        assert_eq!(build_plan_msg(None), format!("{}\n", NO_PLAN_MSG));
    }

    #[test]
    fn progress_msg_summarises_trends() {
        let entries: Vec<ProgressEntry> = serde_json::from_value(json!([
            {"id": 3, "dateRecorded": "2024-03-03", "weightKg": "80", "chestCm": "101",
             "notes": "Felt strong", "recordedBy": {"email": "coach@gym.test"}},
            {"id": 1, "dateRecorded": "2024-03-01", "weightKg": "82", "chestCm": "100"}
        ]))
        .unwrap();
        let msg = build_progress_msg(&entries, &TrendPolicy::default(), Some(180.0));

        assert!(msg.contains(" • Weight: -2.0 kg  (▲ improving)\n     82kg → 80kg\n"));
        assert!(msg.contains(" • Chest: +1.0 cm  (▲ improving)"));
        assert!(msg.contains("BMI: 24.7"));
        assert!(msg.contains("Charts: weight, measurements (2 points)"));
        // history keeps the fetched order
        let newest = msg.find("March 3, 2024").unwrap();
        let oldest = msg.find("March 1, 2024").unwrap();
        assert!(newest < oldest);
        assert!(msg.contains("Recorded by coach@gym.test"));
    }

    #[test]
    fn empty_progress() {
        let msg = build_progress_msg(&[], &TrendPolicy::default(), None);
        assert_eq!(msg, format!("{}\n", NO_PROGRESS_MSG));
    }
}

// chrono format strings, "Mar 1" and "March 1, 2024"
pub const SHORT_DATE_FMT: &str = "%b %-d";
pub const LONG_DATE_FMT: &str = "%B %-d, %Y";
pub const INVALID_DATE_LABEL: &str = "Invalid Date";

pub const NO_PLAN_MSG: &str = "No Diet Plan Assigned Yet";
pub const NO_MEALS_MSG: &str = "No meals defined";
pub const NO_PROGRESS_MSG: &str = "No Progress Entries Yet";

pub const PARSER_LOG_TARGET: &str = "gymportal_progress_rs::PlanParser";
pub const ENVELOPE_LOG_TARGET: &str = "gymportal_progress_rs::Envelope";

use crate::constants::{ENVELOPE_LOG_TARGET, PARSER_LOG_TARGET};
use crate::data_backend::unwrap_collection;
use crate::data_types::diet_data_types::{DietPlanDocument, DietPlanRecord};
use crate::errors::PortalError;

use serde_json::Value;

pub fn try_parse_plan_text(plan_text: &str) -> Result<DietPlanDocument, PortalError> {
    Ok(serde_json::from_str(plan_text)?)
}

/// Decodes a stored plan. A plan that doesn't decode is treated as no plan;
/// the reason only goes to the log.
pub fn parse_plan_text(plan_text: &str) -> Option<DietPlanDocument> {
    match try_parse_plan_text(plan_text) {
        Ok(document) => Some(document),
        Err(e) => {
            log::warn!(target: PARSER_LOG_TARGET, "Parse diet plan error: {}", e);
            None
        }
    }
}

pub fn parse_record(record: &DietPlanRecord) -> Option<DietPlanDocument> {
    record.plan_text.as_deref().and_then(parse_plan_text)
}

/// The member's current plan: the first record of a `/diet-plans/my` body.
/// It is picked before decoding, so a broken first record means no plan
/// rather than an older one moving up.
pub fn current_plan_from_body(body: Value) -> Option<DietPlanRecord> {
    let first = unwrap_collection(body).into_iter().next()?;
    match serde_json::from_value(first) {
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!(target: ENVELOPE_LOG_TARGET, "Current diet plan unreadable: {}", e);
            None
        }
    }
}

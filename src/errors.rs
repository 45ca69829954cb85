use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("diet plan could not be decoded: {0}")]
    PlanDecode(#[from] serde_json::Error),
    #[error("unknown metric '{0}'")]
    UnknownMetric(String),
    #[error("response body is not valid JSON: {0}")]
    InvalidBody(String),
}

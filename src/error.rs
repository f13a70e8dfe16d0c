use thiserror::Error;

/// Failures while loading or building an aircraft profile.
///
/// The computation itself never fails; limit violations are reported as
/// data on the result (see [`crate::calc::result`]).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read profile: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse profile JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid aircraft profile: {0}")]
    InvalidProfile(String),
}

impl ConfigError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ConfigError::InvalidProfile(msg.into())
    }
}

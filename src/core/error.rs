use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripError {
    #[error("API error: {message}")]
    ApiError {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Planning failed: {0}")]
    PlanningFailed(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request timeout")]
    Timeout,
}

impl From<reqwest::Error> for TripError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TripError::Timeout
        } else {
            TripError::ApiError {
                message: err.to_string(),
                source: Some(err),
            }
        }
    }
}

impl From<rusqlite::Error> for TripError {
    fn from(err: rusqlite::Error) -> Self {
        TripError::DatabaseError(err.to_string())
    }
}

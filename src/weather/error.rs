use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request failed: {0}")]
    Middleware(#[from] reqwest_middleware::Error),
    #[error("city not found: {0}")]
    CityNotFound(String),
    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unexpected response: missing {0}")]
    MissingField(&'static str),
    #[error("unexpected response: {field} out of range ({value})")]
    InvalidValue { field: &'static str, value: i64 },
}

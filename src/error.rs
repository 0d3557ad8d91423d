use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlightError {
    #[error("browser automation failed: {reason}")]
    Browser { reason: String },

    #[error("render timed out waiting for {what}")]
    RenderTimeout { what: String },

    #[error("failed to parse rendered content: {reason}")]
    Parse { reason: String },

    #[error("no rendered row matched the requested itinerary")]
    NoMatch,

    #[error("invalid flight query: {reason}")]
    InvalidQuery { reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, FlightError>;

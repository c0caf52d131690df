use thiserror::Error;

#[derive(Debug, Error)]
pub enum PicError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("Invalid {field}: {value}")]
    InvalidField { field: String, value: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{service} profile for {contact} has neither a url nor a username")]
    DataIntegrity { contact: String, service: String },

    #[error("Invalid image {source_name}: {reason}")]
    InvalidImage { source_name: String, reason: String },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Timed out waiting for element: {locator}")]
    ElementTimeout { locator: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

pub type PicResult<T> = Result<T, PicError>;

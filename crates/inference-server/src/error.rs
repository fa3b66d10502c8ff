use serde_json::Value;

/// Errors that can abort startup before the server accepts any connection.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("environment variable '{name}' is not an integer: {value}")]
    MalformedInteger { name: &'static str, value: String },
    #[error("environment variable 'LANGUAGE_MODEL' is not set")]
    MissingModel,
    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("adapter construction failed: {0}")]
    Adapter(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The four externally visible error kinds from the response envelope (`spec.md` §7).
///
/// `Disconnected` never reaches an adapter or validator; it is always
/// produced by the Event Box dominance rule, not raised directly.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("request body does not match the expected shape")]
    Validation(Vec<Value>),
    #[error("{0}")]
    User(String),
    #[error("{0}")]
    Application(String),
    #[error("connection lost")]
    Disconnected,
    #[error("server is shutting down")]
    QueueClosed,
}

impl RequestError {
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::Validation(_) => "VALIDATION",
            RequestError::User(_) => "USER",
            RequestError::Application(_) | RequestError::QueueClosed => "APPLICATION",
            RequestError::Disconnected => "DISCONNECTED",
        }
    }

    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            RequestError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RequestError::User(_) => StatusCode::BAD_REQUEST,
            RequestError::Application(_) | RequestError::QueueClosed => StatusCode::INTERNAL_SERVER_ERROR,
            RequestError::Disconnected => StatusCode::NO_CONTENT,
        }
    }
}

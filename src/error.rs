pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Endpoint unavailable: status {status}")]
    EndpointUnavailable { status: u16 },

    #[error("Unexpected response shape: {0}")]
    Shape(String),

    #[error("Missing key: {0}")]
    MissingKey(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("Notification failed: {0}")]
    Notify(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Fatal errors stop the process; everything else only abandons the current cycle.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Config(_) => true,
            Error::Transport(_)
            | Error::EndpointUnavailable { .. }
            | Error::Shape(_)
            | Error::MissingKey(_)
            | Error::MissingField(_)
            | Error::UnknownStatus(_)
            | Error::Notify(_)
            | Error::Json(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_config_errors_are_fatal() {
        assert!(Error::Config("missing".into()).is_fatal());
        assert!(!Error::EndpointUnavailable { status: 500 }.is_fatal());
        assert!(!Error::Shape("not a list".into()).is_fatal());
        assert!(!Error::Notify("chat not found".into()).is_fatal());
    }

    #[test]
    fn endpoint_error_carries_status_code() {
        let err = Error::EndpointUnavailable { status: 503 };
        assert_eq!(err.to_string(), "Endpoint unavailable: status 503");
    }
}

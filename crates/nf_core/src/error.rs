use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Error response code: {0}")]
    Status(u16),

    #[error("Malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Missing or invalid field: {field}")]
    MissingField { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification used when logging pipeline failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedUrl,
    Network,
    NonSuccessStatus,
    MalformedJson,
    MissingField,
    Other,
}

impl Error {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Error::MissingField { field: field.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidUrl(_) => ErrorKind::MalformedUrl,
            Error::Network(_) => ErrorKind::Network,
            Error::Status(_) => ErrorKind::NonSuccessStatus,
            Error::MalformedJson(_) => ErrorKind::MalformedJson,
            Error::MissingField { .. } => ErrorKind::MissingField,
            Error::Io(_) | Error::Config(_) => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Error::InvalidUrl("x".into()).kind(), ErrorKind::MalformedUrl);
        assert_eq!(Error::Status(404).kind(), ErrorKind::NonSuccessStatus);
        assert_eq!(Error::missing_field("webTitle").kind(), ErrorKind::MissingField);

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(Error::from(json_err).kind(), ErrorKind::MalformedJson);
    }

    #[test]
    fn test_display() {
        assert_eq!(Error::Status(503).to_string(), "Error response code: 503");
        assert_eq!(
            Error::missing_field("results[2].webUrl").to_string(),
            "Missing or invalid field: results[2].webUrl"
        );
    }
}

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    Http {
        status: u16,
        code: Option<String>,
        message: String,
    },
    Parse(String),
    Serialization(String),
    Storage(String),
}

impl AppError {
    /// Backend business code attached to an HTTP error, if any.
    /// Recognized codes (`EMAIL_NOT_VERIFIED`, `ACTIVE_SUBSCRIPTION_EXISTS`)
    /// are expected outcomes, not failures.
    pub fn code(&self) -> Option<&str> {
        match self {
            AppError::Http { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn is_code(&self, expected: &str) -> bool {
        self.code() == Some(expected)
    }

    /// True for HTTP 404, which several endpoints use as a valid
    /// "no such record" answer rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Http { status: 404, .. })
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "{message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { message, .. } => write!(formatter, "{message}"),
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
            AppError::Storage(message) => write!(formatter, "Storage error: {message}"),
        }
    }
}

impl std::error::Error for AppError {}

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Fatal failures. These abort the call that produced them and are never
/// retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Credentials rejected, no token returned, or a malformed auth response.
    #[error("authentication failed: {reason}")]
    Auth { reason: String },

    /// Connection, timeout or body-read failure.
    #[error("transport failure for {url}")]
    Transient {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("HTTP {status} from {url}")]
    Request { status: u16, url: String },

    /// The server answered, but not in the expected shape.
    #[error("unexpected response from {url}: {reason}")]
    Protocol { url: String, reason: String },
}

impl Error {
    pub fn auth(reason: impl Into<String>) -> Self {
        Self::Auth {
            reason: reason.into(),
        }
    }

    pub fn protocol(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Protocol {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Recoverable failure of a single record or point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing field `{field}`")]
    MissingField { field: &'static str },

    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl ParseError {
    pub const fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

//! Marketplace access errors.

/// Result type for marketplace calls.
pub type MarketResult<T> = Result<T, MarketError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketError {
    /// The API answered with a non-2xx status.
    #[error("{method} {url} returned {status}: {body}")]
    Transport {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },
    /// No response within the client's timeout.
    #[error("request timed out: {0}")]
    Timeout(String),
    /// The connection could not be established.
    #[error("connection error: {0}")]
    Connection(String),
    /// Any other client-side failure (request building, body decoding).
    #[error("request failed: {0}")]
    Request(String),
    /// A 2xx response without the fields the contract promises.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// The listing kept returning a next-page token past the page cap.
    #[error("offer listing did not finish within {pages} pages")]
    PageLimitExceeded { pages: usize },
}

/// Operator-facing classification of a failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Connection,
    Other,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connection => "connection",
            FailureKind::Other => "other",
        }
    }
}

impl core::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MarketError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            MarketError::Timeout(_) => FailureKind::Timeout,
            MarketError::Connection(_) => FailureKind::Connection,
            _ => FailureKind::Other,
        }
    }
}

impl From<reqwest::Error> for MarketError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

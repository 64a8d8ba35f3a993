//! Common error type for the session core.
//!
//! Errors split into two families: configuration errors (bad tick rate,
//! bad key count, zero main BPM) and chart data errors (non-monotonic
//! timing points, malformed replay records). Both are surfaced before the
//! tick loop starts; per-tick operations never fail.

/// Result alias that carries the [`SessionError`] type.
pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Invalid construction parameter. Fatal before the session starts.
    #[error("configuration error: {0}")]
    Config(String),
    /// Malformed chart or replay data, rejected at load time.
    #[error("data error: {0}")]
    Data(String),
    /// Wrapper around standard IO errors (settings, replay files).
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// Shorthand for a configuration error with a formatted message.
    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    /// Shorthand for a data error with a formatted message.
    pub fn data<T: Into<String>>(msg: T) -> Self {
        Self::Data(msg.into())
    }
}

//! Client-side error type

/// Failures surfaced by the client library. The `Display` form of every
/// variant is suitable for showing to an end user.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with an error envelope
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The request never completed (connection refused, timeout, ...)
    #[error("Could not reach the server")]
    Transport(#[source] reqwest::Error),
    /// Reading or writing the persisted token failed
    #[error("Could not access stored session")]
    Storage(#[source] std::io::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err)
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err)
    }
}

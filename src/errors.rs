use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field was empty; no request was sent.
    Validation,
    /// The request never produced an HTTP response.
    Transport,
    /// The backend answered with a non-success status.
    Status(u16),
    Io,
}

#[derive(Debug, Clone)]
pub struct ClientError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Status(status),
            message: message.into(),
        }
    }

    pub fn io(err: impl std::error::Error) -> Self {
        Self {
            kind: ErrorKind::Io,
            message: err.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind == ErrorKind::Transport
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Validation => write!(f, "{}", self.message),
            ErrorKind::Transport => write!(f, "network error: {}", self.message),
            ErrorKind::Status(status) => write!(f, "server error {status}: {}", self.message),
            ErrorKind::Io => write!(f, "io error: {}", self.message),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::status(status.as_u16(), err.to_string()),
            None => Self::transport(err.to_string()),
        }
    }
}

use std::{error::Error, fmt};

pub type PingResult<T> = std::result::Result<T, PingError>;

/// Which stage of a run failed. Every kind aborts the run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PingErrorKind {
    Config,
    Resolution,
    Connection,
    Send,
}

impl fmt::Display for PingErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PingErrorKind::Config => "configuration error",
            PingErrorKind::Resolution => "resolution error",
            PingErrorKind::Connection => "connection error",
            PingErrorKind::Send => "send error",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug)]
pub struct PingError {
    pub kind: PingErrorKind,
    pub message: String,
    // no chained error
}

impl PingError {
    pub(crate) fn new(kind: PingErrorKind, message: impl Into<String>) -> Self {
        PingError { kind, message: message.into() }
    }
}

impl fmt::Display for PingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl Error for PingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

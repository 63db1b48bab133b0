//! Failure kinds surfaced by hosts and the renderer.
//!
//! Every variant is fatal: hosts log it and terminate. Nothing in the
//! crate retries or recovers.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum DemoError {
    /// Platform library, event loop, or window could not be created.
    InitFailure(String),
    /// The display surface could not be created or presented.
    SurfaceUnavailable(String),
    /// Exclusive access to the pixel memory was refused.
    LockFailure(String),
    /// A configuration value was not recognized.
    InvalidConfig(String),
    /// Writing to the text log failed.
    Io(io::Error),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFailure(msg) => write!(f, "initialization failed: {msg}"),
            Self::SurfaceUnavailable(msg) => write!(f, "surface unavailable: {msg}"),
            Self::LockFailure(msg) => write!(f, "surface lock failed: {msg}"),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Io(err) => write!(f, "text log write failed: {err}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DemoError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure_kind() {
        let err = DemoError::LockFailure("surface already locked".into());
        assert_eq!(err.to_string(), "surface lock failed: surface already locked");
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err: DemoError = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert!(std::error::Error::source(&err).is_some());
    }
}

// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Io(String),
    Config(String),
    Snapshot(String),
    Args(String),

    /// The scheduler was asked to dispatch while its surface is not attached
    /// to a host. Continuing would corrupt the display set, so the operation
    /// is refused.
    Detached,

    /// The scheduler service task is no longer running.
    ServiceStopped,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Snapshot(e) => write!(f, "Snapshot Error: {}", e),
            Error::Args(e) => write!(f, "Argument Error: {}", e),
            Error::Detached => write!(f, "Surface is not attached to a host"),
            Error::ServiceStopped => write!(f, "Scheduler service is not running"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl<T: fmt::Debug> From<ciborium::de::Error<T>> for Error {
    fn from(err: ciborium::de::Error<T>) -> Self {
        Error::Snapshot(err.to_string())
    }
}

impl<T: fmt::Debug> From<ciborium::ser::Error<T>> for Error {
    fn from(err: ciborium::ser::Error<T>) -> Self {
        Error::Snapshot(err.to_string())
    }
}

impl From<pico_args::Error> for Error {
    fn from(err: pico_args::Error) -> Self {
        Error::Args(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the grabber

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a grab run
#[derive(Error, Debug)]
pub enum GrabError {
    /// Transport failure or unexpected HTTP status from the listings server
    #[error("HTTP error: {0}")]
    Http(String),

    /// A feed record did not carry the fixed field layout
    #[error("Malformed record: {fields} fields, expected at least {expected}")]
    MalformedRecord { fields: usize, expected: usize },

    /// Broadcast date or time-of-day could not be read
    #[error("Invalid broadcast time '{0}'")]
    InvalidTime(String),

    /// The channel list has never been configured
    #[error("Configuration file not found: {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XMLTV serialization failure
    #[error("XML error: {0}")]
    Xml(String),
}

pub type Result<T> = std::result::Result<T, GrabError>;

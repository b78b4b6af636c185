use std::fmt;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffzyError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("truncated archive: {0}")]
    TruncatedArchive(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("walk error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

impl HuffzyError {
    pub fn malformed_header<T: fmt::Display>(msg: T) -> Self {
        HuffzyError::MalformedHeader(msg.to_string())
    }

    pub fn truncated<T: fmt::Display>(msg: T) -> Self {
        HuffzyError::TruncatedArchive(msg.to_string())
    }

    pub fn invalid_argument<T: fmt::Display>(msg: T) -> Self {
        HuffzyError::InvalidArgument(msg.to_string())
    }
}

pub type HuffzyResult<T> = Result<T, HuffzyError>;

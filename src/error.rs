// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the nopea HTTP client
//!
//! Every failure surfaces to the immediate caller of the terminal call.
//! Nothing is logged-and-swallowed internally and nothing is retried.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for nopea operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the nopea HTTP client
#[derive(Error, Debug)]
pub enum Error {
    /// Terminal call received an empty URL
    #[error("empty url")]
    EmptyUrl,

    /// File-upload call with zero attachments
    #[error("no files attached to upload")]
    NoFiles,

    /// A file attachment could not be opened
    #[error("cannot open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file attachment could not be read
    #[error("cannot read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structured body could not be marshaled
    #[error("body serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Body could not be reinterpreted as a key-value map for form encoding
    #[error("body is not a key-value map, cannot form-encode it")]
    BodyDecode,

    /// Malformed client certificate or key pair
    #[error("client certificate error: {0}")]
    Certificate(String),

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Opaque failure from the transport collaborator
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a file-open error
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a file-read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create a certificate error
    pub fn certificate<S: Into<String>>(msg: S) -> Self {
        Error::Certificate(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Check if this error came from the transport collaborator
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Check if this error was raised before any transport interaction
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::EmptyUrl
                | Error::NoFiles
                | Error::BodyDecode
                | Error::Certificate(_)
                | Error::Url(_)
                | Error::Config(_)
        )
    }

    /// Check if this error came from reading a file attachment
    pub fn is_file(&self) -> bool {
        matches!(self, Error::FileOpen { .. } | Error::FileRead { .. })
    }
}

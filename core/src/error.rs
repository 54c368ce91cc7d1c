//! Error types for the Thunes API client.
//!
//! # Design
//! Local validation failures (missing identifier, rejected attachment) are
//! raised before anything is sent. Everything else maps one-to-one onto what
//! went wrong with the round trip: the transport failed, the API answered with
//! its error envelope, or a body did not match the expected schema. Nothing
//! here is retried.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attachment::MAX_ATTACHMENT_SIZE;
use crate::transport::TransportError;

/// One `{code, message}` entry of the API error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub code: String,
    pub message: String,
}

/// Body returned by the API on any non-success status:
/// `{"errors":[{"code":"...","message":"..."}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub errors: Vec<ErrorEntry>,
}

impl ErrorEnvelope {
    /// Codes of every entry, in the order the API returned them.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.code.as_str())
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", entry.code, entry.message)?;
        }
        Ok(())
    }
}

/// Errors returned by every client operation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required argument was missing, e.g. neither the id nor the external
    /// id of a quotation or transaction.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The attachment's file extension is not accepted by the API.
    #[error("file extension {0:?} is not allowed for transaction attachments")]
    UnsupportedAttachment(String),

    #[error("attachment is {size} bytes, the maximum is {max} bytes", max = MAX_ATTACHMENT_SIZE)]
    AttachmentTooLarge { size: u64 },

    /// The attachment could not be read from disk.
    #[error("failed to read attachment: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The API answered with an unexpected status and its error envelope.
    #[error("{0}")]
    Api(ErrorEnvelope),

    /// Unexpected status with an envelope that lists no errors.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// A request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// True for failures raised before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidArgument(_)
                | ApiError::UnsupportedAttachment(_)
                | ApiError::AttachmentTooLarge { .. }
                | ApiError::Io(_)
                | ApiError::SerializationError(_)
        )
    }

    /// The error envelope, if the API returned one.
    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            ApiError::Api(envelope) => Some(envelope),
            _ => None,
        }
    }
}

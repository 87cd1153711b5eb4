use std::path::{Path, PathBuf};

/// Convenience result type used across ntscrt.
pub type CrtResult<T> = Result<T, CrtError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Every failure is surfaced once, at the point where it happens. Nothing in the
/// pipeline retries.
#[derive(thiserror::Error, Debug)]
pub enum CrtError {
    /// Invalid user-provided arguments or configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Missing or unallocatable buffers, uninitialized collaborators.
    #[error("resource error: {0}")]
    Resource(String),

    /// A source image could not be loaded or decoded.
    #[error("decode failure{}: {reason}", frame_suffix(.index))]
    Decode {
        /// Frame index of the failed load when running a numbered sequence.
        index: Option<u64>,
        /// Human readable cause.
        reason: String,
    },

    /// An output image could not be encoded or written.
    #[error("encode/write failure for '{}': {reason}", .path.display())]
    EncodeWrite {
        /// Destination that could not be written.
        path: PathBuf,
        /// Human readable cause.
        reason: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn frame_suffix(index: &Option<u64>) -> String {
    match index {
        Some(i) => format!(" at frame {i}"),
        None => String::new(),
    }
}

impl CrtError {
    /// Build a [`CrtError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`CrtError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`CrtError::Decode`] value for a standalone image.
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            index: None,
            reason: reason.into(),
        }
    }

    /// Build a [`CrtError::Decode`] value naming the frame index that failed.
    pub fn decode_frame(index: u64, reason: impl Into<String>) -> Self {
        Self::Decode {
            index: Some(index),
            reason: reason.into(),
        }
    }

    /// Build a [`CrtError::EncodeWrite`] value.
    pub fn encode_write(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::EncodeWrite {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Frame index carried by a decode failure, if any.
    pub fn failed_frame(&self) -> Option<u64> {
        match self {
            Self::Decode { index, .. } => *index,
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

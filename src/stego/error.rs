// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegavid

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers input validation, extraction semantics, and
//! internal failures. Input-validation kinds are surfaced before any frame
//! is mutated; extraction kinds travel inside the extraction outcome.

use core::fmt;

use crate::video::FrameError;

/// Errors that can occur during embedding or extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// No frames were supplied.
    EmptyFrames,
    /// Frames in the sequence disagree on width or height.
    MismatchedDimensions,
    /// The key is empty or whitespace-only.
    EmptyKey,
    /// The message is empty.
    EmptyMessage,
    /// The payload does not fit the raster (two pixels per payload bit).
    CapacityExceeded { required: usize, available: usize },
    /// The extracted length prefix is unusable: wrong key or no hidden
    /// message. Carries the value that was read.
    InvalidLength(i64),
    /// The recomputed payload digest disagrees with the embedded tag:
    /// wrong key or corrupted data.
    HashMismatch,
    /// An invalid frame raster reached the pipeline.
    InvalidFrame(FrameError),
    /// Unexpected extraction failure (truncated payload, non-UTF-8 text).
    Internal(String),
}

impl StegoError {
    /// User-facing text published to the message sink when extraction
    /// fails. Input-validation kinds have no user text; they are rejected
    /// before extraction starts.
    pub fn user_text(&self) -> Option<String> {
        match self {
            Self::InvalidLength(len) => Some(format!(
                "[ERROR: Invalid message length ({len}). Wrong key or no hidden message.]"
            )),
            Self::HashMismatch => {
                Some("[ERROR: HASH MISMATCH - Wrong key or corrupted data]".to_owned())
            }
            Self::CapacityExceeded { .. } | Self::Internal(_) | Self::InvalidFrame(_) => {
                Some(format!("[EXTRACTION ERROR: {self}]"))
            }
            _ => None,
        }
    }
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFrames => write!(f, "no frames supplied"),
            Self::MismatchedDimensions => write!(f, "frames disagree on dimensions"),
            Self::EmptyKey => write!(f, "key is empty"),
            Self::EmptyMessage => write!(f, "message is empty"),
            Self::CapacityExceeded { required, available } => {
                write!(f, "payload needs {required} pixels but the video has {available}")
            }
            Self::InvalidLength(len) => {
                write!(f, "invalid message length {len} (wrong key or no hidden message)")
            }
            Self::HashMismatch => write!(f, "payload hash mismatch (wrong key or corrupted data)"),
            Self::InvalidFrame(e) => write!(f, "invalid frame: {e}"),
            Self::Internal(msg) => write!(f, "extraction failed: {msg}"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidFrame(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FrameError> for StegoError {
    fn from(e: FrameError) -> Self {
        Self::InvalidFrame(e)
    }
}

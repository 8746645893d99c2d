// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegavid

//! Reversible steganographic embedding and extraction.
//!
//! The embedder hides a framed message (`[length][message][SHA-256]`) in
//! the blue-channel LSBs of a frame sequence, visiting pixels in a
//! key-seeded chaotic order. Alongside each payload bit it stores the LSB
//! it overwrote, which is what lets the extractor hand back the original
//! cover bit-for-bit at every payload-carrying pixel.
//!
//! Only the blue channel carries data, and only in losslessly coded
//! frames; any lossy recompression between embed and extract destroys the
//! payload. The payload is framed and integrity-checked but not
//! encrypted: the chaotic traversal scatters it, it does not cipher it.

pub mod capacity;
pub mod error;
pub mod payload;
mod pipeline;
pub mod progress;
pub mod quality;

pub use error::StegoError;
pub use pipeline::{embed, extract, ExtractOutcome};
pub use progress::{MessageSink, ProgressSink};

use crate::video::Frame;

/// Validate a frame sequence: non-empty, all frames the same size.
///
/// Called at the start of both [`embed`] and [`extract`], before any frame
/// is cloned or mutated.
///
/// # Errors
/// - [`StegoError::EmptyFrames`] if the sequence is empty.
/// - [`StegoError::MismatchedDimensions`] if any frame disagrees with the
///   first on width or height.
pub fn validate_frames(frames: &[Frame]) -> Result<(), StegoError> {
    let first = frames.first().ok_or(StegoError::EmptyFrames)?;
    if frames
        .iter()
        .any(|f| f.width() != first.width() || f.height() != first.height())
    {
        return Err(StegoError::MismatchedDimensions);
    }
    Ok(())
}

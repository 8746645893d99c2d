// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegavid

//! Embedding capacity arithmetic.
//!
//! Every payload bit consumes two steps of the chaotic traversal: one for
//! the bit itself and one for the overwritten LSB it displaces. A message
//! of `len` bytes therefore fits iff
//! `2 * 8 * (4 + len + 32) <= frame_count * width * height`.
//!
//! The traversal may revisit pixels, so this is framing arithmetic over
//! traversal steps, not a promise of that many distinct positions.

use crate::stego::error::StegoError;
use crate::stego::payload::PAYLOAD_OVERHEAD;

/// Payload size in bytes for a message of `message_len` bytes.
pub fn payload_len(message_len: usize) -> usize {
    PAYLOAD_OVERHEAD + message_len
}

/// Payload size in bits.
pub fn payload_bits(message_len: usize) -> usize {
    8 * payload_len(message_len)
}

/// Traversal steps consumed by embedding: payload bits plus an equal run
/// of side-information bits.
pub fn required_pixels(message_len: usize) -> usize {
    2 * payload_bits(message_len)
}

/// Check the capacity law for a raster of `total_pixels`.
///
/// # Errors
/// [`StegoError::CapacityExceeded`] iff `required_pixels(message_len)`
/// exceeds `total_pixels`. The boundary case (exact fit) is accepted.
pub fn ensure_capacity(total_pixels: usize, message_len: usize) -> Result<(), StegoError> {
    let required = required_pixels(message_len);
    if required > total_pixels {
        return Err(StegoError::CapacityExceeded { required, available: total_pixels });
    }
    Ok(())
}

/// Largest message length in bytes that passes the capacity law for a
/// raster of `total_pixels`. Zero when even the framing overhead does not
/// fit.
pub fn max_message_len(total_pixels: usize) -> usize {
    (total_pixels / 16).saturating_sub(PAYLOAD_OVERHEAD)
}

// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegavid

//! Payload framing and bit packing.
//!
//! The payload is the byte string carried bit-by-bit in the blue-channel
//! LSBs:
//!
//! ```text
//! [4 bytes ] message length (little-endian u32)
//! [L bytes ] message (UTF-8)
//! [32 bytes] SHA-256 of the message bytes
//! ```
//!
//! Bits are ordered MSB-first within each byte: bit `i` of the payload
//! lives in byte `i / 8`, bit position `7 - (i % 8)`.

use sha2::{Digest, Sha256};

use crate::stego::error::StegoError;

/// Length-prefix size in bytes.
pub const LENGTH_BYTES: usize = 4;
/// SHA-256 tag size in bytes.
pub const TAG_BYTES: usize = 32;
/// Fixed framing overhead around the message bytes.
pub const PAYLOAD_OVERHEAD: usize = LENGTH_BYTES + TAG_BYTES;
/// Upper bound on the embedded message length. A length prefix outside
/// `(0, MAX_MESSAGE_BYTES]` reads as "wrong key or no hidden message".
pub const MAX_MESSAGE_BYTES: usize = 10_000_000;

/// Frame a message for embedding: `[len_le32][message][sha256(message)]`.
pub fn build_payload(message: &str) -> Vec<u8> {
    let msg = message.as_bytes();
    let mut payload = Vec::with_capacity(PAYLOAD_OVERHEAD + msg.len());
    payload.extend_from_slice(&(msg.len() as u32).to_le_bytes());
    payload.extend_from_slice(msg);
    payload.extend_from_slice(&Sha256::digest(msg));
    payload
}

/// Validate a length prefix read back from the LSB stream.
///
/// The prefix is interpreted as a little-endian signed 32-bit value so that
/// garbage with the top bit set reads as negative rather than as a huge
/// length.
///
/// # Errors
/// [`StegoError::InvalidLength`] if the value is not in `(0, 10_000_000]`.
pub fn parse_length(prefix: [u8; LENGTH_BYTES]) -> Result<usize, StegoError> {
    let len = i32::from_le_bytes(prefix) as i64;
    if len <= 0 || len > MAX_MESSAGE_BYTES as i64 {
        return Err(StegoError::InvalidLength(len));
    }
    Ok(len as usize)
}

/// Parse a complete payload and verify its tag.
///
/// # Errors
/// - [`StegoError::InvalidLength`] if the prefix is out of range.
/// - [`StegoError::HashMismatch`] if the recomputed SHA-256 differs from
///   the embedded tag.
/// - [`StegoError::Internal`] on truncation or non-UTF-8 message bytes.
pub fn parse_payload(payload: &[u8]) -> Result<String, StegoError> {
    if payload.len() < PAYLOAD_OVERHEAD {
        return Err(StegoError::Internal(format!(
            "payload of {} bytes is shorter than the framing overhead",
            payload.len()
        )));
    }
    let len = parse_length([payload[0], payload[1], payload[2], payload[3]])?;
    if payload.len() != PAYLOAD_OVERHEAD + len {
        return Err(StegoError::Internal(format!(
            "payload of {} bytes does not match declared message length {len}",
            payload.len()
        )));
    }

    let message = &payload[LENGTH_BYTES..LENGTH_BYTES + len];
    let tag = &payload[LENGTH_BYTES + len..];
    if Sha256::digest(message).as_slice() != tag {
        return Err(StegoError::HashMismatch);
    }

    String::from_utf8(message.to_vec())
        .map_err(|_| StegoError::Internal("embedded message is not valid UTF-8".to_owned()))
}

/// Read payload bit `index`: byte `index / 8`, bit `7 - (index % 8)`.
///
/// This is the framer's bit-order contract; the pipeline walks payload
/// bytes through this accessor instead of materializing a bit vector.
pub fn bit(bytes: &[u8], index: usize) -> u8 {
    (bytes[index / 8] >> (7 - index % 8)) & 1
}

/// Write payload bit `index` from the LSB of `value`, inverse of [`bit`].
///
/// Extraction assembles payload bytes in place with this as it walks the
/// traversal, one recovered LSB at a time.
pub fn set_bit(bytes: &mut [u8], index: usize, value: u8) {
    let mask = 1 << (7 - index % 8);
    if value & 1 == 1 {
        bytes[index / 8] |= mask;
    } else {
        bytes[index / 8] &= !mask;
    }
}

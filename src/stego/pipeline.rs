// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegavid

//! Reversible embed / extract pipeline.
//!
//! Embedding is two-phase over a single chaotic stream. Phase A writes the
//! payload bits into blue-channel LSBs, recording each overwritten LSB.
//! Phase B continues the same stream and writes the recorded bits (the
//! side-information) into the next run of positions. Extraction replays
//! the identical stream three times: a 32-bit length probe, a reset and a
//! full payload pass, and a side-information pass riding the same
//! non-reset stream. Restoration then replays the payload positions once
//! more with a fresh stream and writes the side-information back into the
//! caller's frames.
//!
//! The traversal can land on the same pixel more than once. That is
//! accepted: embed and extract visit positions in the identical total
//! order, which is the correctness invariant. The LSB at a revisited
//! position holds whatever was written last, so no per-position value is
//! promised, only the replayed order.

use crate::chaos::LogisticSequence;
use crate::stego::capacity;
use crate::stego::error::StegoError;
use crate::stego::payload;
use crate::stego::progress::{MessageSink, ProgressSink, ProgressTicker};
use crate::video::{locate, total_pixels, Frame, PixelBuffer};

/// Result of an extraction attempt.
///
/// `message` is cleared whenever `error` is set. `hash_valid` is true only
/// when the recomputed SHA-256 matched the embedded tag. The caller's
/// frames have been restored on success and, best-effort, on
/// [`StegoError::HashMismatch`]; with a wrong key the "restored" LSBs are
/// whatever the unrelated traversal read out, which the caller must expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOutcome {
    pub message: String,
    pub hash_valid: bool,
    pub error: Option<StegoError>,
}

/// Hide `message` in the blue-channel LSBs of `frames`.
///
/// The input frames are cloned; the clones are modified and returned as
/// the stego sequence. The caller's frames are untouched.
///
/// # Errors
/// [`StegoError::EmptyFrames`], [`StegoError::MismatchedDimensions`],
/// [`StegoError::EmptyKey`], [`StegoError::EmptyMessage`] or
/// [`StegoError::CapacityExceeded`], all raised before any clone is
/// mutated.
pub fn embed(
    frames: &[Frame],
    message: &str,
    key: &str,
    progress: Option<&mut dyn ProgressSink>,
) -> Result<Vec<Frame>, StegoError> {
    super::validate_frames(frames)?;
    if message.is_empty() {
        return Err(StegoError::EmptyMessage);
    }
    let mut seq = LogisticSequence::from_key(key)?;

    let total = total_pixels(frames);
    capacity::ensure_capacity(total, message.len())?;

    let width = frames[0].width();
    let height = frames[0].height();
    let payload_bytes = payload::build_payload(message);
    let bit_count = 8 * payload_bytes.len();

    let mut stego = frames.to_vec();
    let mut side_info = vec![0u8; bit_count];
    let mut ticker = ProgressTicker::new(progress);

    {
        let mut buffers: Vec<PixelBuffer<'_>> = stego.iter_mut().map(PixelBuffer::new).collect();

        // Phase A: payload bits, recording each pixel's prior LSB.
        for i in 0..bit_count {
            let (frame, y, x) = locate(seq.next_index(total), width, height);
            let blue = buffers[frame].blue(x, y);
            side_info[i] = blue & 1;
            buffers[frame].set_blue(x, y, (blue & !1) | payload::bit(&payload_bytes, i));
            ticker.tick(((i + 1) * 50 / bit_count) as u8, frame);
        }

        // Phase B: side-information, continuing the same stream. A position
        // already written in Phase A may be overwritten here.
        for (i, &bit) in side_info.iter().enumerate() {
            let (frame, y, x) = locate(seq.next_index(total), width, height);
            let blue = buffers[frame].blue(x, y);
            buffers[frame].set_blue(x, y, (blue & !1) | bit);
            ticker.tick((50 + (i + 1) * 50 / bit_count) as u8, frame);
        }
    }

    Ok(stego)
}

/// Recover a message from `frames` and restore the original cover.
///
/// Extraction reads from an internal clone. As a final step the
/// side-information is written back into the caller's `frames`, reverting
/// every payload-carrying pixel to its pre-embedding LSB.
///
/// The outer `Err` covers input validation only, raised before any work:
/// [`StegoError::EmptyFrames`], [`StegoError::MismatchedDimensions`],
/// [`StegoError::EmptyKey`]. Extraction-semantic failures
/// ([`StegoError::InvalidLength`], [`StegoError::CapacityExceeded`],
/// [`StegoError::HashMismatch`], [`StegoError::Internal`]) are returned
/// inside the [`ExtractOutcome`] with a cleared message, and their
/// user-facing text is published to `sink`.
pub fn extract(
    frames: &mut [Frame],
    key: &str,
    mut sink: Option<&mut dyn MessageSink>,
    progress: Option<&mut dyn ProgressSink>,
) -> Result<ExtractOutcome, StegoError> {
    super::validate_frames(frames)?;
    // Key problems are validation, not extraction semantics.
    LogisticSequence::from_key(key)?;

    let outcome = match extract_inner(frames, key, progress) {
        Ok(message) => ExtractOutcome { message, hash_valid: true, error: None },
        Err(error) => {
            ExtractOutcome { message: String::new(), hash_valid: false, error: Some(error) }
        }
    };

    if let Some(sink) = sink.as_mut() {
        match &outcome.error {
            None => sink.publish(&outcome.message),
            Some(error) => {
                if let Some(text) = error.user_text() {
                    sink.publish(&text);
                }
            }
        }
    }

    Ok(outcome)
}

fn extract_inner(
    frames: &mut [Frame],
    key: &str,
    progress: Option<&mut dyn ProgressSink>,
) -> Result<String, StegoError> {
    let total = total_pixels(frames);
    let width = frames[0].width();
    let height = frames[0].height();

    let mut seq = LogisticSequence::from_key(key)?;
    let mut working: Vec<Frame> = frames.to_vec();
    let mut ticker = ProgressTicker::new(progress);

    let (payload_bytes, side_info) = {
        let mut buffers: Vec<PixelBuffer<'_>> =
            working.iter_mut().map(PixelBuffer::new).collect();

        // Pass 0: length probe, first 32 bits of the stream.
        let mut prefix = [0u8; payload::LENGTH_BYTES];
        for i in 0..8 * payload::LENGTH_BYTES {
            let (frame, y, x) = locate(seq.next_index(total), width, height);
            payload::set_bit(&mut prefix, i, buffers[frame].blue(x, y));
        }
        let len = payload::parse_length(prefix)?;

        // The framing must fit twice: payload region plus side-information.
        capacity::ensure_capacity(total, len)?;
        let bit_count = capacity::payload_bits(len);

        // Pass 1: replay the stream from the start and assemble the payload
        // bytes in place, one recovered LSB at a time.
        seq.reset();
        let mut payload_bytes = vec![0u8; capacity::payload_len(len)];
        for i in 0..bit_count {
            let (frame, y, x) = locate(seq.next_index(total), width, height);
            payload::set_bit(&mut payload_bytes, i, buffers[frame].blue(x, y));
            ticker.tick(((i + 1) * 50 / bit_count) as u8, frame);
        }

        // Pass 2: side-information, riding the same non-reset stream.
        let mut side_info = vec![0u8; bit_count];
        for (i, slot) in side_info.iter_mut().enumerate() {
            let (frame, y, x) = locate(seq.next_index(total), width, height);
            *slot = buffers[frame].blue(x, y) & 1;
            ticker.tick((50 + (i + 1) * 50 / bit_count) as u8, frame);
        }

        (payload_bytes, side_info)
    };

    // Restore before judging the payload, so a wrong-key hash failure
    // still hands the caller reassembled frames.
    restore(frames, key, &side_info, total, width, height)?;

    payload::parse_payload(&payload_bytes)
}

/// Write the side-information back over the payload positions, in the
/// caller's frames. A fresh sequence replays exactly the Phase A
/// positions.
fn restore(
    frames: &mut [Frame],
    key: &str,
    side_info: &[u8],
    total: usize,
    width: u32,
    height: u32,
) -> Result<(), StegoError> {
    let mut seq = LogisticSequence::from_key(key)?;
    let mut buffers: Vec<PixelBuffer<'_>> = frames.iter_mut().map(PixelBuffer::new).collect();
    for &bit in side_info {
        let (frame, y, x) = locate(seq.next_index(total), width, height);
        let blue = buffers[frame].blue(x, y);
        buffers[frame].set_blue(x, y, (blue & !1) | bit);
    }
    Ok(())
}

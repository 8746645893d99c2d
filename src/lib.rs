// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegavid

//! # stegavid-core
//!
//! Pure-Rust reversible steganography engine for hiding text messages in
//! the frames of losslessly coded video. A key-seeded logistic-map
//! traversal picks the pixels, the blue-channel LSBs carry a framed and
//! SHA-256-tagged payload, and the overwritten LSBs ride along as
//! side-information so extraction can hand the original cover back.
//!
//! Video decoding and encoding stay outside this crate: a collaborator
//! feeds in an ordered sequence of 24-bit B,G,R frames from a lossless
//! codec and writes the stego frames back out losslessly. Anything lossy
//! in that path invalidates the scheme.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use stegavid_core::{embed, extract};
//!
//! let frames = decode_cover("holiday.avi"); // external, lossless
//! let stego = embed(&frames, "meet at dawn", "passphrase", None)?;
//!
//! let mut received = stego.clone();
//! let outcome = extract(&mut received, "passphrase", None, None)?;
//! assert_eq!(outcome.message, "meet at dawn");
//! assert!(outcome.hash_valid);
//! // `received` now equals the original cover at every payload pixel.
//! ```

pub mod chaos;
pub mod stego;
pub mod video;

pub use chaos::{key_seed, LogisticSequence};
pub use stego::capacity::{ensure_capacity, max_message_len, required_pixels};
pub use stego::payload::MAX_MESSAGE_BYTES;
pub use stego::quality::{psnr, sequence_psnr, IDENTICAL_PSNR};
pub use stego::{embed, extract, validate_frames, ExtractOutcome};
pub use stego::{MessageSink, ProgressSink, StegoError};
pub use video::{locate, total_pixels, Frame, FrameError, PixelBuffer, RowOrder};

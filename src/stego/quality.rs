// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegavid

//! Peak signal-to-noise ratio diagnostics.
//!
//! PSNR quantifies how far a stego frame drifted from its cover. It plays
//! no part in embed/extract correctness; it exists so frontends can chart
//! the distortion per frame. LSB embedding typically lands above 50 dB.

use crate::stego::error::StegoError;
use crate::video::Frame;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// PSNR reported for identical frames (MSE of zero).
pub const IDENTICAL_PSNR: f64 = 99.0;

/// PSNR in decibels between two frames of identical dimensions.
///
/// Mean squared error is taken over all three colour channels of every
/// pixel; `PSNR = 10 * log10(255^2 / MSE)`, capped to
/// [`IDENTICAL_PSNR`] when the frames are equal.
///
/// # Errors
/// [`StegoError::MismatchedDimensions`] if the frames disagree on size.
pub fn psnr(a: &Frame, b: &Frame) -> Result<f64, StegoError> {
    Ok(psnr_from_mse(frame_mse(a, b)?))
}

/// PSNR over a whole clip: per-frame MSE values averaged, then converted.
///
/// # Errors
/// [`StegoError::EmptyFrames`] if the sequences are empty or of different
/// length, [`StegoError::MismatchedDimensions`] if any pair disagrees on
/// size.
pub fn sequence_psnr(a: &[Frame], b: &[Frame]) -> Result<f64, StegoError> {
    if a.is_empty() || a.len() != b.len() {
        return Err(StegoError::EmptyFrames);
    }

    #[cfg(feature = "parallel")]
    let mse_values: Result<Vec<f64>, StegoError> =
        a.par_iter().zip(b.par_iter()).map(|(fa, fb)| frame_mse(fa, fb)).collect();
    #[cfg(not(feature = "parallel"))]
    let mse_values: Result<Vec<f64>, StegoError> =
        a.iter().zip(b.iter()).map(|(fa, fb)| frame_mse(fa, fb)).collect();

    let mse_values = mse_values?;
    let mean = mse_values.iter().sum::<f64>() / mse_values.len() as f64;
    Ok(psnr_from_mse(mean))
}

fn psnr_from_mse(mse: f64) -> f64 {
    if mse == 0.0 {
        return IDENTICAL_PSNR;
    }
    10.0 * (255.0f64 * 255.0 / mse).log10()
}

fn frame_mse(a: &Frame, b: &Frame) -> Result<f64, StegoError> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(StegoError::MismatchedDimensions);
    }
    let mut sum = 0.0f64;
    for y in 0..a.height() {
        for x in 0..a.width() {
            let pa = a.pixel(x, y);
            let pb = b.pixel(x, y);
            for c in 0..3 {
                let d = pa[c] as f64 - pb[c] as f64;
                sum += d * d;
            }
        }
    }
    Ok(sum / (a.pixel_count() as f64 * 3.0))
}

// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stegavid

//! Round-trip integration tests for embed/extract over synthetic covers.

use stegavid_core::{
    embed, extract, psnr, sequence_psnr, Frame, MessageSink, RowOrder, StegoError,
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Seed for the deterministic cover generator shared by these tests.
const COVER_SEED: u32 = 12180;

/// Deterministic per-byte cover content (xxhash-style finalizer), so every
/// run sees the identical raster.
fn cover_byte(frame: usize, x: u32, y: u32, channel: usize, seed: u32) -> u8 {
    let mut h = x.wrapping_mul(0x9E37_79B1)
        ^ y.wrapping_mul(0x85EB_CA77)
        ^ (frame as u32).wrapping_mul(0xC2B2_AE3D)
        ^ (channel as u32).wrapping_mul(0x27D4_EB2F)
        ^ seed.wrapping_mul(0x1656_67B1);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7FEB_352D);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846C_A68B);
    h ^= h >> 16;
    (h & 0xFF) as u8
}

fn cover_frames(count: usize, width: u32, height: u32) -> Vec<Frame> {
    (0..count)
        .map(|f| {
            let stride = width as usize * 3;
            let mut data = vec![0u8; stride * height as usize];
            for y in 0..height {
                for x in 0..width {
                    let at = y as usize * stride + x as usize * 3;
                    for c in 0..3 {
                        data[at + c] = cover_byte(f, x, y, c, COVER_SEED);
                    }
                }
            }
            Frame::from_raw(width, height, stride, RowOrder::TopDown, data).unwrap()
        })
        .collect()
}

/// Same logical pixels as [`cover_frames`], stored bottom-up.
fn cover_frames_bottom_up(count: usize, width: u32, height: u32) -> Vec<Frame> {
    (0..count)
        .map(|f| {
            let stride = width as usize * 3;
            let mut data = vec![0u8; stride * height as usize];
            for y in 0..height {
                let row = (height - 1 - y) as usize * stride;
                for x in 0..width {
                    let at = row + x as usize * 3;
                    for c in 0..3 {
                        data[at + c] = cover_byte(f, x, y, c, COVER_SEED);
                    }
                }
            }
            Frame::from_raw(width, height, stride, RowOrder::BottomUp, data).unwrap()
        })
        .collect()
}

/// Covers for tests whose assertions do not depend on pixel values.
fn random_frames(count: usize, width: u32, height: u32, seed: u64) -> Vec<Frame> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let stride = width as usize * 3;
            let data: Vec<u8> = (0..stride * height as usize).map(|_| rng.gen()).collect();
            Frame::from_raw(width, height, stride, RowOrder::TopDown, data).unwrap()
        })
        .collect()
}

fn roundtrip(frames: &[Frame], message: &str, key: &str) {
    let stego = embed(frames, message, key, None).unwrap();
    let mut received = stego.clone();
    let outcome = extract(&mut received, key, None, None).unwrap();
    assert!(outcome.error.is_none(), "unexpected error: {:?}", outcome.error);
    assert!(outcome.hash_valid);
    assert_eq!(outcome.message, message);
}

#[test]
fn roundtrip_basic() {
    let frames = cover_frames(10, 320, 240);
    roundtrip(&frames, "Hello, World! This is a test message.", "amber-key-10");
}

#[test]
fn roundtrip_kilobyte_message() {
    let frames = cover_frames(50, 640, 480);
    roundtrip(&frames, &"A".repeat(1024), "amber8");
}

#[test]
fn roundtrip_unicode() {
    let frames = cover_frames(10, 320, 240);
    roundtrip(&frames, "Hello \u{1F600} \u{1F30D}", "Key");
}

#[test]
fn roundtrip_single_character() {
    let frames = cover_frames(10, 320, 240);
    roundtrip(&frames, "A", "amber-key-2");
}

#[test]
fn roundtrip_single_frame() {
    let frames = cover_frames(1, 640, 480);
    roundtrip(&frames, "solo frame message", "amber10");
}

#[test]
fn roundtrip_bottom_up_cover() {
    let frames = cover_frames_bottom_up(10, 320, 240);
    roundtrip(&frames, "Hello, World! This is a test message.", "amber-key-10");
}

#[test]
fn row_order_does_not_change_the_stego_pixels() {
    let top_down = cover_frames(3, 160, 120);
    let bottom_up = cover_frames_bottom_up(3, 160, 120);
    let message = "layout independence";
    let key = "amber-key-10";

    let stego_td = embed(&top_down, message, key, None).unwrap();
    let stego_bu = embed(&bottom_up, message, key, None).unwrap();
    for (a, b) in stego_td.iter().zip(&stego_bu) {
        for y in 0..a.height() {
            for x in 0..a.width() {
                assert_eq!(a.pixel(x, y), b.pixel(x, y), "pixel ({x}, {y}) diverged");
            }
        }
    }
}

#[test]
fn message_sink_receives_recovered_text() {
    let frames = cover_frames(10, 320, 240);
    let message = "Hello, World! This is a test message.";
    let stego = embed(&frames, message, "amber-key-10", None).unwrap();

    let mut received = stego.clone();
    let mut published = String::new();
    {
        let mut cb = |text: &str| published.push_str(text);
        let sink: &mut dyn MessageSink = &mut cb;
        extract(&mut received, "amber-key-10", Some(sink), None).unwrap();
    }
    assert_eq!(published, message);
}

#[test]
fn extract_progress_is_monotonic_and_completes() {
    let frames = cover_frames(10, 320, 240);
    let stego = embed(&frames, "A", "amber-key-2", None).unwrap();

    let mut received = stego.clone();
    let mut reports: Vec<u8> = Vec::new();
    {
        let mut cb = |pct: u8, _frame: usize| reports.push(pct);
        extract(&mut received, "amber-key-2", None, Some(&mut cb)).unwrap();
    }
    assert!(reports.windows(2).all(|w| w[0] < w[1]), "percent went backwards");
    assert_eq!(*reports.last().unwrap(), 100);
}

#[test]
fn stego_differs_from_cover_but_keeps_shape() {
    let frames = cover_frames(10, 320, 240);
    let stego = embed(&frames, "Hello, World! This is a test message.", "amber-key-10", None)
        .unwrap();
    assert_eq!(stego.len(), frames.len());
    for (cover, steg) in frames.iter().zip(&stego) {
        assert_eq!(cover.width(), steg.width());
        assert_eq!(cover.height(), steg.height());
    }
    assert_ne!(stego, frames, "embedding must change at least one LSB");
}

#[test]
fn exact_capacity_message_embeds() {
    // 100 * 96 = 9600 pixels carry at most a 564-byte message.
    let frames = random_frames(1, 100, 96, 41);
    let message = "C".repeat(564);
    assert!(embed(&frames, &message, "CapKey", None).is_ok());

    let over = "C".repeat(565);
    assert!(matches!(
        embed(&frames, &over, "CapKey", None),
        Err(StegoError::CapacityExceeded { .. })
    ));
}

#[test]
fn oversized_message_rejected_before_any_work() {
    let frames = random_frames(2, 100, 100, 42);
    let message = "x".repeat(2501);
    let err = embed(&frames, &message, "CapKey", None);
    assert!(matches!(
        err,
        Err(StegoError::CapacityExceeded { required: 40592, available: 20000 })
    ));
}

#[test]
fn embedding_is_imperceptible_by_psnr() {
    let frames = cover_frames(10, 320, 240);
    let stego = embed(&frames, "Hello, World! This is a test message.", "amber-key-10", None)
        .unwrap();
    for (cover, steg) in frames.iter().zip(&stego) {
        assert!(psnr(cover, steg).unwrap() > 50.0);
    }
    assert!(sequence_psnr(&frames, &stego).unwrap() > 50.0);
}

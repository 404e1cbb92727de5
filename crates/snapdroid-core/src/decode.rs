//! Raw device frame to [`PixelGrid`] decoding.
//!
//! Devices hand back a bag of bytes plus dimensions and a pixel depth;
//! this module normalizes every depth we understand into row-major
//! 32-bit ARGB so the rest of the pipeline only ever sees one layout.

use snapdroid_bridge::RawFrame;

use crate::error::CaptureError;
use crate::grid::PixelGrid;

/// Wire layouts we can normalize, keyed by bit depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PixelLayout {
    /// Four bytes per pixel: R, G, B, A.
    Rgba8888,
    /// Three bytes per pixel: R, G, B. Opaque.
    Rgb888,
    /// Two bytes per pixel, little-endian RGB565. Opaque.
    Rgb565,
    /// One byte per pixel, grayscale. Opaque.
    Gray8,
}

impl PixelLayout {
    fn from_bits_per_pixel(bits_per_pixel: u32) -> Option<Self> {
        match bits_per_pixel {
            32 => Some(PixelLayout::Rgba8888),
            24 => Some(PixelLayout::Rgb888),
            16 => Some(PixelLayout::Rgb565),
            8 => Some(PixelLayout::Gray8),
            _ => None,
        }
    }
}

/// Decode a raw frame into an ARGB pixel grid.
///
/// The frame must carry at least `width * height` pixels worth of bytes
/// for its depth; trailing bytes (row padding some devices append) are
/// ignored. Fails with [`CaptureError::UnsupportedPixelFormat`] for
/// depths outside 8/16/24/32 and [`CaptureError::MalformedFrame`] for a
/// truncated body.
pub fn decode(frame: &RawFrame) -> Result<PixelGrid, CaptureError> {
    let layout = PixelLayout::from_bits_per_pixel(frame.bits_per_pixel).ok_or(
        CaptureError::UnsupportedPixelFormat {
            bits_per_pixel: frame.bits_per_pixel,
        },
    )?;

    let expected = frame.expected_len();
    if frame.data.len() < expected {
        return Err(CaptureError::MalformedFrame {
            expected,
            actual: frame.data.len(),
        });
    }

    let count = frame.width as usize * frame.height as usize;
    let mut pixels = Vec::with_capacity(count);
    match layout {
        PixelLayout::Rgba8888 => {
            for px in frame.data[..expected].chunks_exact(4) {
                pixels.push(argb(px[3], px[0], px[1], px[2]));
            }
        }
        PixelLayout::Rgb888 => {
            for px in frame.data[..expected].chunks_exact(3) {
                pixels.push(argb(0xFF, px[0], px[1], px[2]));
            }
        }
        PixelLayout::Rgb565 => {
            for px in frame.data[..expected].chunks_exact(2) {
                let value = u16::from_le_bytes([px[0], px[1]]);
                let r = expand5((value >> 11) as u8 & 0x1F);
                let g = expand6((value >> 5) as u8 & 0x3F);
                let b = expand5(value as u8 & 0x1F);
                pixels.push(argb(0xFF, r, g, b));
            }
        }
        PixelLayout::Gray8 => {
            for &px in &frame.data[..expected] {
                pixels.push(argb(0xFF, px, px, px));
            }
        }
    }

    Ok(PixelGrid::from_parts(frame.width, frame.height, pixels))
}

fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Widen a 5-bit channel to 8 bits by replicating the high bits, so
/// full-scale maps to 0xFF rather than 0xF8.
fn expand5(v: u8) -> u8 {
    v << 3 | v >> 2
}

/// Widen a 6-bit channel to 8 bits, same replication scheme.
fn expand6(v: u8) -> u8 {
    v << 2 | v >> 4
}

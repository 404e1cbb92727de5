//! Parser for the raw `screencap` stream.
//!
//! The stream is a small little-endian header followed by the packed
//! pixel body: `u32` width, `u32` height, `u32` pixel format, and on
//! newer Android releases an extra `u32` colorspace word. Nothing in the
//! header says which variant was sent, so the remainder is sized against
//! the expected body to tell them apart.

use anyhow::{bail, Result};
use bytes::Buf;
use snapdroid_bridge::RawFrame;

const HEADER_BASE: usize = 12;
const HEADER_WITH_COLORSPACE: usize = 16;

/// Parse one screencap reply.
///
/// Returns `Ok(None)` for an empty or header-short reply, the device's
/// way of producing nothing when it drops off mid-call. A reply with a
/// full header but truncated body is returned as-is; the decoder is the
/// one that reports truncation. Unknown pixel-format codes are an error,
/// as are dimension claims whose byte size overflows.
pub fn parse(raw: &[u8]) -> Result<Option<RawFrame>> {
    if raw.len() < HEADER_BASE {
        return Ok(None);
    }

    let mut header = raw;
    let width = header.get_u32_le();
    let height = header.get_u32_le();
    let format = header.get_u32_le();

    // android.graphics.PixelFormat codes.
    let bits_per_pixel: u32 = match format {
        1 | 2 => 32, // RGBA_8888 / RGBX_8888
        3 => 24,     // RGB_888
        4 => 16,     // RGB_565
        9 => 8,      // L_8
        other => bail!("unsupported screencap format {}", other),
    };

    let expected = match (width as usize)
        .checked_mul(height as usize)
        .and_then(|count| count.checked_mul(bits_per_pixel as usize / 8))
    {
        Some(len) => len,
        None => bail!("implausible screencap frame size {}x{}", width, height),
    };

    let past_base = raw.len() - HEADER_BASE;
    let past_colorspace = raw.len().checked_sub(HEADER_WITH_COLORSPACE);
    let body_start = if past_colorspace == Some(expected) {
        HEADER_WITH_COLORSPACE
    } else if past_base == expected {
        HEADER_BASE
    } else if past_colorspace.is_some_and(|len| len >= expected) {
        HEADER_WITH_COLORSPACE
    } else {
        HEADER_BASE
    };

    Ok(Some(RawFrame {
        width,
        height,
        bits_per_pixel,
        data: raw[body_start..].to_vec(),
    }))
}

/// Rotate a raw frame 90 degrees counter-clockwise, byte for byte.
///
/// This is the device-side landscape correction: pixel (x, y) moves to
/// row `width - 1 - x`, column `y` of the swapped-dimension frame, in
/// `bytes_per_pixel`-sized units, whatever the pixel layout. Truncated
/// frames pass through untouched so the decoder can report them; a
/// zero-area frame just swaps its dimensions.
pub fn rotate_landscape(frame: RawFrame) -> RawFrame {
    let w = frame.width as usize;
    let h = frame.height as usize;
    let bpp = frame.bytes_per_pixel();
    let expected = frame.expected_len();
    if frame.data.len() < expected {
        return frame;
    }
    if w == 0 || h == 0 {
        return RawFrame {
            width: frame.height,
            height: frame.width,
            ..frame
        };
    }

    let mut data = vec![0u8; expected];
    for y in 0..h {
        for x in 0..w {
            let src = (y * w + x) * bpp;
            let dst = ((w - 1 - x) * h + y) * bpp;
            data[dst..dst + bpp].copy_from_slice(&frame.data[src..src + bpp]);
        }
    }

    RawFrame {
        width: frame.height,
        height: frame.width,
        bits_per_pixel: frame.bits_per_pixel,
        data,
    }
}

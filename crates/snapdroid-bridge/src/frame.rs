/// Raw frame buffer dump retrieved from a device's display.
///
/// The bytes are uninterpreted: tightly packed, row-major, top-to-bottom,
/// in whatever pixel layout the device reported via `bits_per_pixel`.
/// Immutable once constructed; decoding it into a canonical pixel grid is
/// the consumer's job.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Bits per pixel as reported by the device (8, 16, 24 or 32 for the
    /// formats a decoder can handle; other values are carried verbatim)
    pub bits_per_pixel: u32,
    /// Raw pixel bytes, at least `expected_len()` long for a well-formed frame
    pub data: Vec<u8>,
}

impl RawFrame {
    /// Bytes occupied by one pixel, rounded down for sub-byte formats.
    pub fn bytes_per_pixel(&self) -> usize {
        (self.bits_per_pixel / 8) as usize
    }

    /// Byte length a well-formed frame of these dimensions must have.
    /// Saturates when the dimensions overflow `usize`, so an oversized
    /// claim reads as a truncated body.
    pub fn expected_len(&self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(self.bytes_per_pixel())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_len() {
        let frame = RawFrame {
            width: 4,
            height: 3,
            bits_per_pixel: 16,
            data: Vec::new(),
        };
        assert_eq!(frame.bytes_per_pixel(), 2);
        assert_eq!(frame.expected_len(), 24);
    }

    #[test]
    fn test_expected_len_saturates() {
        let frame = RawFrame {
            width: u32::MAX,
            height: u32::MAX,
            bits_per_pixel: 32,
            data: Vec::new(),
        };
        assert_eq!(frame.expected_len(), usize::MAX);
    }
}

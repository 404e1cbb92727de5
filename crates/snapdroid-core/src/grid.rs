//! Canonical pixel grid and its lossless quarter-turn rotations.

/// Clockwise rotation in quarter turns.
///
/// Accumulates modulo a full turn: callers tracking "current rotation"
/// across repeated user requests keep an [`Orientation`] and advance it
/// with [`Orientation::turned_cw`]; the rotation functions themselves are
/// stateless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    /// Parse a clockwise rotation in degrees. Accepts any multiple of 90,
    /// taken modulo 360; rejects everything else.
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        Some(match (degrees / 90) % 4 {
            0 => Orientation::Deg0,
            1 => Orientation::Deg90,
            2 => Orientation::Deg180,
            _ => Orientation::Deg270,
        })
    }

    pub fn degrees(self) -> u32 {
        self.quarter_turns() * 90
    }

    /// Number of single 90 degree clockwise steps this stands for.
    pub fn quarter_turns(self) -> u32 {
        match self {
            Orientation::Deg0 => 0,
            Orientation::Deg90 => 1,
            Orientation::Deg180 => 2,
            Orientation::Deg270 => 3,
        }
    }

    /// The orientation one more clockwise quarter turn away.
    pub fn turned_cw(self) -> Self {
        match self {
            Orientation::Deg0 => Orientation::Deg90,
            Orientation::Deg90 => Orientation::Deg180,
            Orientation::Deg180 => Orientation::Deg270,
            Orientation::Deg270 => Orientation::Deg0,
        }
    }
}

/// Decoded image: row-major 32-bit ARGB values, exactly
/// `width * height` of them.
///
/// Single-owner by construction: transforms consume the grid and hand
/// back a new one, so a grid is never aliased while being rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelGrid {
    /// Build a grid from row-major ARGB pixels. Returns `None` when the
    /// pixel count does not match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Option<Self> {
        let count = (width as usize).checked_mul(height as usize)?;
        if pixels.len() != count {
            return None;
        }
        Some(Self { width, height, pixels })
    }

    /// Constructor for producers that already guarantee the pixel-count
    /// invariant.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self { width, height, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major ARGB pixels.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// ARGB value at (x, y), or `None` outside the grid.
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Flatten to row-major RGBA bytes, the layout image encoders expect.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for &argb in &self.pixels {
            bytes.push((argb >> 16) as u8);
            bytes.push((argb >> 8) as u8);
            bytes.push(argb as u8);
            bytes.push((argb >> 24) as u8);
        }
        bytes
    }

    /// Rotate 90 degrees clockwise.
    ///
    /// Pure permutation, bit-exact: input pixel (x, y) lands at output
    /// (height - 1 - y, x), and the output dimensions are the input's
    /// swapped. Four applications return the original grid.
    pub fn rotate_cw(self) -> Self {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut pixels = vec![0u32; self.pixels.len()];
        for y in 0..h {
            for x in 0..w {
                pixels[x * h + (h - 1 - y)] = self.pixels[y * w + x];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            pixels,
        }
    }

    /// Rotate clockwise by any quarter-turn orientation: the single step
    /// composed zero to three times.
    pub fn rotate(self, orientation: Orientation) -> Self {
        (0..orientation.quarter_turns()).fold(self, |grid, _| grid.rotate_cw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: u32, height: u32, pixels: Vec<u32>) -> PixelGrid {
        PixelGrid::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn test_from_pixels_checks_count() {
        assert!(PixelGrid::from_pixels(2, 2, vec![0; 4]).is_some());
        assert!(PixelGrid::from_pixels(2, 2, vec![0; 3]).is_none());
        assert!(PixelGrid::from_pixels(0, 0, vec![]).is_some());
        assert!(PixelGrid::from_pixels(u32::MAX, u32::MAX, vec![0; 4]).is_none());
    }

    #[test]
    fn test_pixel_at_bounds() {
        let g = grid(2, 1, vec![0x11, 0x22]);
        assert_eq!(g.pixel_at(0, 0), Some(0x11));
        assert_eq!(g.pixel_at(1, 0), Some(0x22));
        assert_eq!(g.pixel_at(2, 0), None);
        assert_eq!(g.pixel_at(0, 1), None);
    }

    #[test]
    fn test_rotate_cw_swaps_dimensions() {
        let g = grid(3, 2, vec![1, 2, 3, 4, 5, 6]).rotate_cw();
        assert_eq!(g.width(), 2);
        assert_eq!(g.height(), 3);
    }

    #[test]
    fn test_rotate_cw_2x2() {
        let g = grid(
            2,
            2,
            vec![0xFF000000, 0xFF00FF00, 0xFF0000FF, 0xFFFFFFFF],
        )
        .rotate_cw();
        assert_eq!(
            g.pixels(),
            &[0xFF0000FF, 0xFF000000, 0xFFFFFFFF, 0xFF00FF00]
        );
    }

    #[test]
    fn test_rotate_cw_rectangle() {
        // 3x2 input:        2x3 output:
        //   1 2 3             4 1
        //   4 5 6             5 2
        //                     6 3
        let g = grid(3, 2, vec![1, 2, 3, 4, 5, 6]).rotate_cw();
        assert_eq!(g.pixels(), &[4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn test_four_rotations_round_trip() {
        let original = grid(3, 2, vec![10, 20, 30, 40, 50, 60]);
        let rotated = original
            .clone()
            .rotate_cw()
            .rotate_cw()
            .rotate_cw()
            .rotate_cw();
        assert_eq!(rotated, original);
    }

    #[test]
    fn test_rotate_180_equals_two_steps() {
        let original = grid(3, 2, vec![1, 2, 3, 4, 5, 6]);
        let two_steps = original.clone().rotate_cw().rotate_cw();
        assert_eq!(original.rotate(Orientation::Deg180), two_steps);
    }

    #[test]
    fn test_rotate_deg0_is_identity() {
        let original = grid(2, 2, vec![1, 2, 3, 4]);
        assert_eq!(original.clone().rotate(Orientation::Deg0), original);
    }

    #[test]
    fn test_rotate_degenerate_shapes() {
        let row = grid(3, 1, vec![1, 2, 3]).rotate_cw();
        assert_eq!((row.width(), row.height()), (1, 3));
        assert_eq!(row.pixels(), &[1, 2, 3]);

        let empty = grid(0, 0, vec![]).rotate_cw();
        assert_eq!((empty.width(), empty.height()), (0, 0));
    }

    #[test]
    fn test_orientation_from_degrees() {
        assert_eq!(Orientation::from_degrees(0), Some(Orientation::Deg0));
        assert_eq!(Orientation::from_degrees(90), Some(Orientation::Deg90));
        assert_eq!(Orientation::from_degrees(180), Some(Orientation::Deg180));
        assert_eq!(Orientation::from_degrees(270), Some(Orientation::Deg270));
        assert_eq!(Orientation::from_degrees(360), Some(Orientation::Deg0));
        assert_eq!(Orientation::from_degrees(450), Some(Orientation::Deg90));
        assert_eq!(Orientation::from_degrees(45), None);
        assert_eq!(Orientation::from_degrees(91), None);
    }

    #[test]
    fn test_orientation_cycle() {
        let mut orientation = Orientation::Deg0;
        for _ in 0..4 {
            orientation = orientation.turned_cw();
        }
        assert_eq!(orientation, Orientation::Deg0);
        assert_eq!(Orientation::Deg270.turned_cw(), Orientation::Deg0);
    }

    #[test]
    fn test_to_rgba_bytes_channel_order() {
        let g = grid(1, 1, vec![0x80112233]);
        assert_eq!(g.to_rgba_bytes(), vec![0x11, 0x22, 0x33, 0x80]);
    }
}

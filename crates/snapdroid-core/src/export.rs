//! PNG encoding of decoded pixel grids.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::CaptureError;
use crate::grid::PixelGrid;

/// Encode a grid as PNG bytes.
pub fn encode_png(grid: &PixelGrid) -> Result<Vec<u8>, CaptureError> {
    let image = rgba_image(grid)?;
    let mut bytes: Vec<u8> = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| CaptureError::Export {
            reason: e.to_string(),
        })?;
    Ok(bytes)
}

/// Encode a grid as PNG and write it to `path`. The format follows the
/// function, not the file extension.
pub fn write_png(grid: &PixelGrid, path: &Path) -> Result<(), CaptureError> {
    rgba_image(grid)?
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| CaptureError::Export {
            reason: e.to_string(),
        })
}

fn rgba_image(grid: &PixelGrid) -> Result<RgbaImage, CaptureError> {
    RgbaImage::from_raw(grid.width(), grid.height(), grid.to_rgba_bytes()).ok_or_else(|| {
        CaptureError::Export {
            reason: format!(
                "pixel buffer does not fit {}x{} image",
                grid.width(),
                grid.height()
            ),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> PixelGrid {
        PixelGrid::from_pixels(
            2,
            2,
            vec![0xFFFF0000, 0xFF00FF00, 0xFF0000FF, 0x80102030],
        )
        .unwrap()
    }

    #[test]
    fn test_encode_png_magic_bytes() {
        let bytes = encode_png(&sample_grid()).unwrap();
        assert_eq!(&bytes[..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_encode_png_round_trip() {
        let grid = sample_grid();
        let bytes = encode_png(&grid).unwrap();
        let loaded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!((loaded.width(), loaded.height()), (2, 2));
        assert_eq!(loaded.into_raw(), grid.to_rgba_bytes());
    }

    #[test]
    fn test_encode_png_rejects_empty_grid() {
        let grid = PixelGrid::from_pixels(0, 0, vec![]).unwrap();
        assert!(matches!(
            encode_png(&grid),
            Err(CaptureError::Export { .. })
        ));
    }

    #[test]
    fn test_write_png_to_disk() {
        let grid = sample_grid();
        let path = std::env::temp_dir().join(format!("snapdroid-export-{}.png", std::process::id()));
        write_png(&grid, &path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.into_raw(), grid.to_rgba_bytes());
    }
}

use anyhow::anyhow;

use crate::foundation::error::CosmatesqueResult;

/// A rendered single-channel 8-bit image. `0` is black, `255` is white.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Luma bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl GrayFrame {
    /// Intensity at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Copy into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.data
            .chunks_exact(self.width as usize)
            .map(<[u8]>::to_vec)
            .collect()
    }

    /// Convert into an [`image::GrayImage`] for encoding.
    pub fn into_gray_image(self) -> CosmatesqueResult<image::GrayImage> {
        let (w, h) = (self.width, self.height);
        image::GrayImage::from_raw(w, h, self.data)
            .ok_or_else(|| anyhow!("frame buffer does not hold {w}x{h} luma pixels").into())
    }
}

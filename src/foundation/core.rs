use crate::foundation::error::{CrtError, CrtResult};

/// 1-based index of a frame in a numbered playback/export sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Lowest legal frame index.
    pub const FIRST: FrameIndex = FrameIndex(1);

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Previous index, never going below [`FrameIndex::FIRST`].
    pub fn prev_clamped(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::FIRST.0))
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Pack 8-bit channels into a `0x00RRGGBB` word.
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Split a `0x??RRGGBB` word into its color channels; the top byte is ignored.
pub fn unpack_rgb(px: u32) -> [u8; 3] {
    [(px >> 16) as u8, (px >> 8) as u8, px as u8]
}

/// Output framebuffer: one packed `0x00RRGGBB` word per pixel, row-major.
///
/// Dimensions are fixed at creation. The buffer is only ever cleared or decayed in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> CrtResult<Self> {
        if width == 0 || height == 0 {
            return Err(CrtError::resource(format!(
                "framebuffer dimensions must be non-zero (got {width}x{height})"
            )));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| CrtError::resource("framebuffer size overflows usize"))?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|e| CrtError::resource(format!("out of memory: {e}")))?;
        pixels.resize(len, 0);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Tightly packed RGB8 copy, suitable for image writers.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for &px in &self.pixels {
            out.extend_from_slice(&unpack_rgb(px));
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

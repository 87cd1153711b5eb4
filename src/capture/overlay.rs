use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::{FrameIndex, pack_rgb, unpack_rgb},
    foundation::error::{CrtError, CrtResult},
    source::adapter::SourceImage,
};

pub type PremulRgba8 = [u8; 4];

/// Burns something into a source frame before it goes through the pipeline.
///
/// Stands in for render-to-texture-then-readback: the returned frame replaces the input.
pub trait OverlayCompositor {
    fn composite(&mut self, frame: SourceImage, index: FrameIndex) -> CrtResult<SourceImage>;
}

/// Source-over of premultiplied RGBA8.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = mul_div255(u16::from(*c), a);
        }
    }
}

/// Fixed RGBA image composited at a pixel offset, clipped to the frame.
#[derive(Clone, Debug)]
pub struct ImageOverlay {
    width: u32,
    height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    rgba8_premul: Vec<u8>,
    x: u32,
    y: u32,
}

impl ImageOverlay {
    /// Build from straight-alpha RGBA8.
    pub fn from_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>, x: u32, y: u32) -> CrtResult<Self> {
        if rgba8.len() != width as usize * height as usize * 4 {
            return Err(CrtError::config(format!(
                "overlay buffer holds {} bytes, expected {}",
                rgba8.len(),
                width as usize * height as usize * 4
            )));
        }
        premultiply_rgba8_in_place(&mut rgba8);
        Ok(Self {
            width,
            height,
            rgba8_premul: rgba8,
            x,
            y,
        })
    }

    pub fn from_path(path: &Path, x: u32, y: u32) -> CrtResult<Self> {
        let img = image::open(path)
            .with_context(|| format!("decode overlay '{}'", path.display()))?
            .to_rgba8();
        let (w, h) = img.dimensions();
        Self::from_rgba8(w, h, img.into_raw(), x, y)
    }
}

impl OverlayCompositor for ImageOverlay {
    fn composite(&mut self, frame: SourceImage, _index: FrameIndex) -> CrtResult<SourceImage> {
        let (fw, fh) = (frame.width(), frame.height());
        let mut pixels = frame.into_pixels();

        for oy in 0..self.height {
            let Some(ty) = self.y.checked_add(oy).filter(|&ty| ty < fh) else {
                break;
            };
            for ox in 0..self.width {
                let Some(tx) = self.x.checked_add(ox).filter(|&tx| tx < fw) else {
                    break;
                };
                let o = (oy as usize * self.width as usize + ox as usize) * 4;
                let src = [
                    self.rgba8_premul[o],
                    self.rgba8_premul[o + 1],
                    self.rgba8_premul[o + 2],
                    self.rgba8_premul[o + 3],
                ];
                let dst_px = &mut pixels[ty as usize * fw as usize + tx as usize];
                let [r, g, b] = unpack_rgb(*dst_px);
                let [r, g, b, _] = over([r, g, b, 255], src);
                *dst_px = pack_rgb(r, g, b);
            }
        }

        SourceImage::from_packed(fw, fh, pixels)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/overlay.rs"]
mod tests;

//! Frame source adapter.
//!
//! Turns whatever a loader produced (3 or 4 channels, any row stride, RGB or BGR byte order)
//! into the packed `0x00RRGGBB` layout the signal engine consumes. Channel order is fixed by an
//! explicit per-element reorder; the source bytes are never reinterpreted in place.

use crate::foundation::core::pack_rgb;
use crate::foundation::error::{CrtError, CrtResult};

/// Byte order of one pixel in a decoded buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
    Rgba,
    Bgra,
}

impl ChannelOrder {
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb | Self::Bgr => 3,
            Self::Rgba | Self::Bgra => 4,
        }
    }

    /// Byte offsets of red, green and blue within one pixel.
    fn rgb_offsets(self) -> [usize; 3] {
        match self {
            Self::Rgb | Self::Rgba => [0, 1, 2],
            Self::Bgr | Self::Bgra => [2, 1, 0],
        }
    }
}

/// Borrowed view of a decoded image as handed over by a loader.
#[derive(Clone, Copy, Debug)]
pub struct DecodedImage<'a> {
    pub width: u32,
    pub height: u32,
    /// Bytes per row; at least `width * order.channels()`.
    pub stride: usize,
    pub order: ChannelOrder,
    pub data: &'a [u8],
}

impl<'a> DecodedImage<'a> {
    /// Tightly packed rows.
    pub fn packed(width: u32, height: u32, order: ChannelOrder, data: &'a [u8]) -> Self {
        Self {
            width,
            height,
            stride: width as usize * order.channels(),
            order,
            data,
        }
    }
}

/// Source frame in engine layout. Immutable once built; replaced wholesale per frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl SourceImage {
    /// Wrap already packed `0x00RRGGBB` pixels.
    pub fn from_packed(width: u32, height: u32, pixels: Vec<u32>) -> CrtResult<Self> {
        if width == 0 || height == 0 {
            return Err(CrtError::decode(format!(
                "source has zero dimensions ({width}x{height})"
            )));
        }
        if pixels.len() != width as usize * height as usize {
            return Err(CrtError::decode(format!(
                "source buffer holds {} pixels, expected {}",
                pixels.len(),
                width as usize * height as usize
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> CrtResult<Self> {
        let px = pack_rgb(rgb[0], rgb[1], rgb[2]);
        Self::from_packed(width, height, vec![px; width as usize * height as usize])
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

    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Consume into the raw packed buffer, e.g. for an overlay read-back.
    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }
}

/// Reorder a decoded buffer into engine layout.
pub fn adapt(img: &DecodedImage<'_>) -> CrtResult<SourceImage> {
    if img.data.is_empty() {
        return Err(CrtError::decode("loader returned an empty pixel buffer"));
    }
    if img.width == 0 || img.height == 0 {
        return Err(CrtError::decode(format!(
            "source has zero dimensions ({}x{})",
            img.width, img.height
        )));
    }

    let channels = img.order.channels();
    let row_bytes = (img.width as usize)
        .checked_mul(channels)
        .ok_or_else(|| CrtError::decode("row size overflows usize"))?;
    if img.stride < row_bytes {
        return Err(CrtError::decode(format!(
            "row stride {} is shorter than {} bytes of pixel data",
            img.stride, row_bytes
        )));
    }
    let needed = img
        .stride
        .checked_mul(img.height as usize - 1)
        .and_then(|n| n.checked_add(row_bytes))
        .ok_or_else(|| {
            CrtError::decode(format!(
                "row stride {} over {} rows overflows usize",
                img.stride, img.height
            ))
        })?;
    if img.data.len() < needed {
        return Err(CrtError::decode(format!(
            "pixel buffer has {} bytes, expected at least {needed}",
            img.data.len()
        )));
    }

    let [ri, gi, bi] = img.order.rgb_offsets();
    let mut pixels = Vec::with_capacity(img.width as usize * img.height as usize);
    for row in img.data.chunks(img.stride).take(img.height as usize) {
        for px in row[..row_bytes].chunks_exact(channels) {
            pixels.push(pack_rgb(px[ri], px[gi], px[bi]));
        }
    }

    SourceImage::from_packed(img.width, img.height, pixels)
}

/// Adapt an image decoded by the `image` crate. Alpha is dropped.
pub fn adapt_dynamic(img: &image::DynamicImage) -> CrtResult<SourceImage> {
    match img {
        image::DynamicImage::ImageRgb8(rgb) => adapt(&DecodedImage::packed(
            rgb.width(),
            rgb.height(),
            ChannelOrder::Rgb,
            rgb.as_raw(),
        )),
        image::DynamicImage::ImageRgba8(rgba) => adapt(&DecodedImage::packed(
            rgba.width(),
            rgba.height(),
            ChannelOrder::Rgba,
            rgba.as_raw(),
        )),
        other => {
            let rgb = other.to_rgb8();
            adapt(&DecodedImage::packed(
                rgb.width(),
                rgb.height(),
                ChannelOrder::Rgb,
                rgb.as_raw(),
            ))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/adapter.rs"]
mod tests;

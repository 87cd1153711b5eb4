/// Decay one packed pixel: `c/2 + c/4 + c/8 + c/16` per channel, alpha/format bits dropped.
///
/// Each shifted copy is masked so no bit bleeds into the neighbouring channel.
#[inline]
pub fn fade_pixel(px: u32) -> u32 {
    let c = px & 0x00ff_ffff;
    ((c >> 1) & 0x007f_7f7f)
        + ((c >> 2) & 0x003f_3f3f)
        + ((c >> 3) & 0x001f_1f1f)
        + ((c >> 4) & 0x000f_0f0f)
}

/// Phosphor afterglow: decay the whole framebuffer in place before the next draw.
pub fn fade_phosphors(pixels: &mut [u32]) {
    for px in pixels.iter_mut() {
        *px = fade_pixel(*px);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/phosphor.rs"]
mod tests;

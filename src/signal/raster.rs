//! Integer-only reference engine.
//!
//! Nowhere near a real NTSC modem: it resamples the source to the output grid, moves it through
//! YIQ, and reproduces the knobs the pipeline drives (color kill, colorburst phase, chroma
//! bandwidth, sync offsets, roll, snow and field interleave) closely enough to be useful.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    foundation::core::{Framebuffer, pack_rgb, unpack_rgb},
    foundation::error::{CrtError, CrtResult},
    signal::engine::{DrawParams, Picture, SignalEngine},
    signal::params::SignalParameters,
};

/// Contrast value that maps luma 1:1.
pub const UNITY_CONTRAST: i32 = 180;
/// Saturation value that maps chroma 1:1.
pub const UNITY_SATURATION: i32 = 10;

/// Bound on decoded YIQ components; anything past it is already saturated on output.
const SIGNAL_LIMIT: i64 = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RasterEngineConfig {
    /// Seed for the snow generator; `reset` restarts the sequence.
    pub seed: u64,
}

impl Default for RasterEngineConfig {
    fn default() -> Self {
        Self { seed: 0x1a2b_3c4d }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Yiq {
    y: i32,
    i: i32,
    q: i32,
}

fn rgb_to_yiq(px: u32) -> Yiq {
    let [r, g, b] = unpack_rgb(px).map(i32::from);
    Yiq {
        y: (77 * r + 150 * g + 29 * b) >> 8,
        i: (153 * r - 70 * g - 83 * b) >> 8,
        q: (54 * r - 134 * g + 80 * b) >> 8,
    }
}

fn yiq_to_rgb(c: Yiq) -> u32 {
    let r = c.y + ((245 * c.i + 159 * c.q) >> 8);
    let g = c.y + ((-70 * c.i - 166 * c.q) >> 8);
    let b = c.y + ((-283 * c.i + 436 * c.q) >> 8);
    pack_rgb(
        r.clamp(0, 255) as u8,
        g.clamp(0, 255) as u8,
        b.clamp(0, 255) as u8,
    )
}

fn to_signal(v: i64) -> i32 {
    v.clamp(-SIGNAL_LIMIT, SIGNAL_LIMIT) as i32
}

/// Number of 90° steps encoded by a colorburst table (the offset it was built from).
fn burst_quadrant(cc: &[i32; 4]) -> usize {
    let peak = cc.iter().position(|&v| v == 1).unwrap_or(1);
    (5 - peak) % 4
}

fn blend_half(a: u32, b: u32) -> u32 {
    ((a & 0xfe_fefe) >> 1) + ((b & 0xfe_fefe) >> 1)
}

/// Picture controls in `i64`, so any knob combination stays in range.
fn apply_picture(c: Yiq, p: &Picture) -> Yiq {
    let (black, white) = (i64::from(p.black_point), i64::from(p.white_point));
    let saturation = i64::from(p.saturation);

    let y = i64::from(c.y) * i64::from(p.contrast) / i64::from(UNITY_CONTRAST)
        + i64::from(p.brightness);
    let y = (black * 255 / 100).saturating_add(y.saturating_mul(white - black) / 100);
    let chroma = |v: i32| to_signal(i64::from(v) * saturation / i64::from(UNITY_SATURATION));
    Yiq {
        y: to_signal(y),
        i: chroma(c.i),
        q: chroma(c.q),
    }
}

pub struct RasterEngine {
    config: RasterEngineConfig,
    width: u32,
    height: u32,
    signal: Vec<Yiq>,
    encoded: bool,
    field: bool,
    rng: StdRng,
}

impl RasterEngine {
    pub fn new(config: RasterEngineConfig) -> Self {
        Self {
            config,
            width: 0,
            height: 0,
            signal: Vec::new(),
            encoded: false,
            field: false,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }
}

impl Default for RasterEngine {
    fn default() -> Self {
        Self::new(RasterEngineConfig::default())
    }
}

impl SignalEngine for RasterEngine {
    fn init(&mut self, width: u32, height: u32) -> CrtResult<()> {
        if width == 0 || height == 0 {
            return Err(CrtError::resource("engine output size must be non-zero"));
        }
        self.width = width;
        self.height = height;
        self.signal = vec![Yiq::default(); width as usize * height as usize];
        self.encoded = false;
        Ok(())
    }

    fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.config.seed);
    }

    fn encode(&mut self, params: &SignalParameters<'_>) -> CrtResult<()> {
        if self.signal.is_empty() {
            return Err(CrtError::resource("engine used before init"));
        }
        let src = params.source;
        let (w, h) = (self.width as usize, self.height as usize);
        let (sw, sh) = (src.width() as usize, src.height() as usize);
        let quadrant = burst_quadrant(&params.colorburst);

        for y in 0..h {
            let sy = y * sh / h;
            let row = &mut self.signal[y * w..(y + 1) * w];
            for (x, out) in row.iter_mut().enumerate() {
                let sx = x * sw / w;
                let mut c = rgb_to_yiq(src.pixel(sx as u32, sy as u32));
                if params.color {
                    for _ in 0..quadrant {
                        (c.i, c.q) = (-c.q, c.i);
                    }
                } else {
                    c.i = 0;
                    c.q = 0;
                }
                *out = c;
            }

            // Band-limit chroma unless artifact colors are wanted.
            if params.color && !params.raw && w > 2 {
                let orig: Vec<Yiq> = row.to_vec();
                for x in 0..w {
                    let l = orig[x.saturating_sub(1)];
                    let r = orig[(x + 1).min(w - 1)];
                    row[x].i = (l.i + 2 * orig[x].i + r.i) / 4;
                    row[x].q = (l.q + 2 * orig[x].q + r.q) / 4;
                }
            }
        }

        self.field = params.field;
        self.encoded = true;
        Ok(())
    }

    fn draw(&mut self, fb: &mut Framebuffer, params: &DrawParams) -> CrtResult<()> {
        if fb.width() != self.width || fb.height() != self.height {
            return Err(CrtError::resource(format!(
                "framebuffer is {}x{}, engine was initialised for {}x{}",
                fb.width(),
                fb.height(),
                self.width,
                self.height
            )));
        }
        if !self.encoded {
            return Err(CrtError::resource("draw called before encode"));
        }

        let (w, h) = (self.width as i64, self.height as i64);
        let parity = usize::from(self.field);
        let noise = params.noise.max(0);
        let pixels = fb.pixels_mut();

        for y in 0..h as usize {
            let sy = (y as i64 + i64::from(params.vsync) + i64::from(params.roll)).rem_euclid(h);
            for x in 0..w as usize {
                let sx = (x as i64 + i64::from(params.hsync)).rem_euclid(w);
                let mut c = apply_picture(self.signal[(sy * w + sx) as usize], &params.picture);
                if noise > 0 {
                    let snow = i64::from(self.rng.random_range(-noise..=noise));
                    c.y = to_signal(i64::from(c.y) + snow);
                }
                let px = yiq_to_rgb(c);
                let dst = &mut pixels[y * w as usize + x];
                *dst = if y & 1 == parity {
                    px
                } else {
                    blend_half(*dst, px)
                };
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/signal/raster.rs"]
mod tests;

use crate::source::adapter::SourceImage;

/// Colorburst reference pattern for phase offset 0.
pub const COLORBURST_REFERENCE: [i32; 4] = [0, 1, 0, -1];

/// Reference pattern rotated left by `phase_offset mod 4`; each step is a 90° phase change.
pub fn colorburst_table(phase_offset: i32) -> [i32; 4] {
    let p = phase_offset.rem_euclid(4) as usize;
    std::array::from_fn(|i| COLORBURST_REFERENCE[(p + i) % 4])
}

/// Everything one `encode` call needs. Rebuilt for every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalParameters<'a> {
    pub source: &'a SourceImage,
    pub color: bool,
    pub field: bool,
    pub raw: bool,
    pub colorburst: [i32; 4],
}

impl<'a> SignalParameters<'a> {
    pub fn build(
        source: &'a SourceImage,
        phase_offset: i32,
        color: bool,
        field: bool,
        raw: bool,
    ) -> Self {
        Self {
            source,
            color,
            field,
            raw,
            colorburst: colorburst_table(phase_offset),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/signal/params.rs"]
mod tests;

use std::path::{Path, PathBuf};

use crate::{
    foundation::core::FrameIndex,
    foundation::error::{CrtError, CrtResult},
    source::adapter::{SourceImage, adapt_dynamic},
};

/// Decode one image file (any format the `image` crate reads, PPM included).
pub fn load_image(path: &Path) -> CrtResult<SourceImage> {
    let img = image::open(path)
        .map_err(|e| CrtError::decode(format!("'{}': {e}", path.display())))?;
    let src = adapt_dynamic(&img)?;
    tracing::info!(path = %path.display(), width = src.width(), height = src.height(), "loaded");
    Ok(src)
}

/// Supplies the source image for a given frame of a numbered sequence.
pub trait FrameLoader {
    /// Load frame `index`. Errors must name the index; the caller stops on them.
    fn load(&mut self, index: FrameIndex) -> CrtResult<SourceImage>;
}

/// Numbered file name template.
///
/// `{}` is replaced by the frame index, `{:0N}` by the index zero-padded to `N` digits.
/// Exactly one placeholder is required.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequencePattern {
    prefix: String,
    suffix: String,
    pad: usize,
}

impl SequencePattern {
    pub fn parse(pattern: &str) -> CrtResult<Self> {
        let open = pattern
            .find('{')
            .ok_or_else(|| CrtError::config(format!("pattern '{pattern}' has no '{{}}' placeholder")))?;
        let close = pattern[open..]
            .find('}')
            .map(|i| open + i)
            .ok_or_else(|| CrtError::config(format!("pattern '{pattern}' has an unclosed '{{'")))?;

        let inner = &pattern[open + 1..close];
        let pad = match inner {
            "" => 0,
            s => s
                .strip_prefix(":0")
                .and_then(|digits| digits.parse::<usize>().ok())
                .ok_or_else(|| {
                    CrtError::config(format!("unsupported placeholder '{{{s}}}' in '{pattern}'"))
                })?,
        };

        let suffix = &pattern[close + 1..];
        if suffix.contains('{') {
            return Err(CrtError::config(format!(
                "pattern '{pattern}' has more than one placeholder"
            )));
        }

        Ok(Self {
            prefix: pattern[..open].to_string(),
            suffix: suffix.to_string(),
            pad,
        })
    }

    pub fn path_for(&self, index: FrameIndex) -> PathBuf {
        PathBuf::from(format!(
            "{}{:0pad$}{}",
            self.prefix,
            index.0,
            self.suffix,
            pad = self.pad
        ))
    }
}

/// Loads `pattern.path_for(index)` from disk.
#[derive(Clone, Debug)]
pub struct FileSequence {
    pattern: SequencePattern,
}

impl FileSequence {
    pub fn new(pattern: SequencePattern) -> Self {
        Self { pattern }
    }
}

impl FrameLoader for FileSequence {
    fn load(&mut self, index: FrameIndex) -> CrtResult<SourceImage> {
        let path = self.pattern.path_for(index);
        load_image(&path).map_err(|e| match e {
            CrtError::Decode { reason, .. } => CrtError::decode_frame(index.0, reason),
            other => other,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/loader.rs"]
mod tests;

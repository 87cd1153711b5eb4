use std::path::{Path, PathBuf};

use crate::{
    foundation::core::{FrameIndex, Framebuffer},
    foundation::error::{CrtError, CrtResult},
};

/// Consumer of processed framebuffers.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, width: u32, height: u32) -> CrtResult<()>;
    /// Push one processed frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &Framebuffer) -> CrtResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> CrtResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    size: Option<(u32, u32)>,
    frames: Vec<(FrameIndex, Vec<u32>)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    pub fn frames(&self) -> &[(FrameIndex, Vec<u32>)] {
        &self.frames
    }

    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, width: u32, height: u32) -> CrtResult<()> {
        self.size = Some((width, height));
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Framebuffer) -> CrtResult<()> {
        self.frames.push((idx, frame.pixels().to_vec()));
        Ok(())
    }

    fn end(&mut self) -> CrtResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Write a framebuffer as RGB8; the format follows the file extension (`.ppm` gives binary PPM).
pub fn write_framebuffer(path: &Path, fb: &Framebuffer) -> CrtResult<()> {
    let format = image::ImageFormat::from_path(path)
        .map_err(|e| CrtError::encode_write(path, format!("unknown output format: {e}")))?;
    image::save_buffer_with_format(
        path,
        &fb.to_rgb8(),
        fb.width(),
        fb.height(),
        image::ColorType::Rgb8,
        format,
    )
    .map_err(|e| CrtError::encode_write(path, e.to_string()))?;
    tracing::info!(path = %path.display(), "wrote frame");
    Ok(())
}

/// Writes every frame to `<dir>/<prefix><index>.<extension>`, one file per index.
#[derive(Clone, Debug)]
pub struct ImageSequenceSink {
    dir: PathBuf,
    prefix: String,
    extension: String,
    pad: usize,
    last_idx: Option<FrameIndex>,
    written: Vec<PathBuf>,
}

impl ImageSequenceSink {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            extension: "png".to_string(),
            pad: 0,
            last_idx: None,
            written: Vec::new(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Zero-pad the index to `pad` digits.
    pub fn with_padding(mut self, pad: usize) -> Self {
        self.pad = pad;
        self
    }

    pub fn path_for(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!(
            "{}{:0pad$}.{}",
            self.prefix,
            idx.0,
            self.extension,
            pad = self.pad
        ))
    }

    /// Files written so far, in push order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for ImageSequenceSink {
    fn begin(&mut self, _width: u32, _height: u32) -> CrtResult<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| CrtError::encode_write(&self.dir, format!("create output dir: {e}")))?;
        image::ImageFormat::from_extension(&self.extension).ok_or_else(|| {
            CrtError::config(format!("unsupported output extension '{}'", self.extension))
        })?;
        self.last_idx = None;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &Framebuffer) -> CrtResult<()> {
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(CrtError::encode_write(
                self.path_for(idx),
                format!("frame {idx} pushed after frame {last}; output would be out of order"),
            ));
        }
        let path = self.path_for(idx);
        write_framebuffer(&path, frame)?;
        self.last_idx = Some(idx);
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> CrtResult<()> {
        tracing::info!(frames = self.written.len(), dir = %self.dir.display(), "sequence complete");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/sink.rs"]
mod tests;

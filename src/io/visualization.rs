//! Frame capture and GIF generation for step-by-step compositing

use std::path::Path;

use image::{Frame, Rgba, RgbaImage};
use ndarray::Array2;

use crate::io::configuration::{FINAL_FRAME_HOLD, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{CompositeError, Result};
use crate::io::image::snapshot_to_image;

/// A composite snapshot taken after one structural step
#[derive(Debug, Clone)]
pub struct StepFrame {
    /// Description of the step that produced the frame
    pub label: String,
    /// Rendered composite grid
    pub image: RgbaImage,
}

/// Captures composite snapshots for visualization
///
/// Records one frame per structural operation so the effect of each add,
/// removal, or reorder can be replayed as an animation.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    frames: Vec<StepFrame>,
}

impl FrameRecorder {
    /// Create an empty recorder
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Record the composite grid after a step
    pub fn capture(&mut self, label: impl Into<String>, snapshot: &Array2<Rgba<u8>>) {
        self.frames.push(StepFrame {
            label: label.into(),
            image: snapshot_to_image(snapshot),
        });
    }

    /// Returns all recorded frames
    pub fn frames(&self) -> &[StepFrame] {
        &self.frames
    }

    /// Returns the number of recorded frames
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as an animated GIF
    ///
    /// Delays shorter than viewers reliably honour are raised to
    /// `VIEWER_MIN_FRAME_DELAY_MS`. The last frame is held longer so the final
    /// composite stays readable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(CompositeError::InvalidSourceData {
                reason: "No frames captured for visualization".to_string(),
            });
        }

        let delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let last = self.frames.len() - 1;
        let frames = self.frames.iter().enumerate().map(|(index, step)| {
            let hold = if index == last { FINAL_FRAME_HOLD } else { 1 };
            Frame::from_parts(
                step.image.clone(),
                0,
                0,
                image::Delay::from_numer_denom_ms(delay_ms * hold, 1),
            )
        });

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CompositeError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| CompositeError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| CompositeError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }
}

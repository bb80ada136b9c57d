use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use kinema_core::{FrameBuffer, KinemaError};

/// Writes frames as a numbered PNG sequence (`frame_0000.png`, ...).
/// Lossless output for inspecting individual frames or piping into other
/// tools.
pub struct PngSequenceEncoder;

impl PngSequenceEncoder {
    /// Write every frame into `output_dir`. Returns the paths written.
    pub fn encode(
        frames: &[FrameBuffer],
        width: u32,
        height: u32,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, KinemaError> {
        if frames.is_empty() {
            return Err(KinemaError::Encode(
                "no frames to encode for PNG sequence".into(),
            ));
        }

        std::fs::create_dir_all(output_dir)?;

        let mut paths = Vec::with_capacity(frames.len());
        for (i, frame) in frames.iter().enumerate() {
            if frame.width != width || frame.height != height {
                return Err(KinemaError::Encode(format!(
                    "frame {} has dimensions {}x{}, expected {}x{}",
                    i, frame.width, frame.height, width, height
                )));
            }
            let path = output_dir.join(format!("frame_{:04}.png", i));
            Self::write_png(frame, &path)?;
            paths.push(path);
        }

        tracing::info!(
            "Wrote {} PNG frames to {} ({}x{})",
            frames.len(),
            output_dir.display(),
            width,
            height
        );

        Ok(paths)
    }

    /// Write a single frame as a PNG file.
    pub fn write_png(frame: &FrameBuffer, path: &Path) -> Result<(), KinemaError> {
        let file = File::create(path)
            .map_err(|e| KinemaError::Encode(format!("failed to create PNG file: {}", e)))?;
        let writer = BufWriter::new(file);

        let mut encoder = png::Encoder::new(writer, frame.width, frame.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| KinemaError::Encode(format!("failed to write PNG header: {}", e)))?;
        writer
            .write_image_data(&frame.data)
            .map_err(|e| KinemaError::Encode(format!("failed to write PNG data: {}", e)))?;
        writer
            .finish()
            .map_err(|e| KinemaError::Encode(format!("failed to finalize PNG: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinema_core::PixelFormat;

    #[test]
    fn test_png_sequence_empty_frames() {
        let result = PngSequenceEncoder::encode(&[], 4, 4, Path::new("/tmp/kinema_png_empty"));
        assert!(result.is_err());
    }

    #[test]
    fn test_png_sequence_writes_numbered_files() {
        let frames = vec![
            FrameBuffer::new(4, 4, PixelFormat::Rgba8),
            FrameBuffer::new(4, 4, PixelFormat::Rgba8),
        ];
        let dir = std::env::temp_dir().join("kinema_test_png_seq");
        let paths = PngSequenceEncoder::encode(&frames, 4, 4, &dir).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("frame_0000.png"));
        assert!(paths[1].exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use kinema_core::{FrameBuffer, KinemaError};

/// Encoder that shells out to FFmpeg for H.264 encoding.
pub struct FfmpegEncoder;

impl FfmpegEncoder {
    /// Check if FFmpeg is available on the system.
    pub fn is_available() -> bool {
        Command::new("ffmpeg")
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Encode a sequence of RGBA frame buffers to an MP4 file using H.264.
    /// All frames must match the given dimensions.
    pub fn encode(
        frames: &[FrameBuffer],
        width: u32,
        height: u32,
        fps: f64,
        output_path: &Path,
    ) -> Result<(), KinemaError> {
        if frames.is_empty() {
            return Err(KinemaError::Encode("no frames to encode".into()));
        }

        if !Self::is_available() {
            return Err(KinemaError::Encode(
                "ffmpeg not found in PATH. Install FFmpeg: https://ffmpeg.org/download.html".into(),
            ));
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.arg("-y");
        cmd.args([
            "-f", "rawvideo",
            "-pixel_format", "rgba",
            "-video_size", &format!("{}x{}", width, height),
            "-framerate", &format!("{}", fps),
            "-i", "-",
        ]);
        cmd.args([
            "-c:v", "libx264",
            "-pix_fmt", "yuv420p",
            "-preset", "medium",
            "-crf", "23",
            "-movflags", "+faststart",
        ]);
        cmd.arg(output_path);

        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| KinemaError::Encode(format!("failed to start ffmpeg: {}", e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| KinemaError::Encode("failed to open ffmpeg stdin".into()))?;

        for (i, frame) in frames.iter().enumerate() {
            if frame.width != width || frame.height != height {
                return Err(KinemaError::Encode(format!(
                    "frame {} has dimensions {}x{}, expected {}x{}",
                    i, frame.width, frame.height, width, height
                )));
            }
            if let Err(e) = stdin.write_all(&frame.data) {
                // On a broken pipe, surface ffmpeg's stderr instead of the
                // bare write error.
                let stderr = child
                    .wait_with_output()
                    .map(|o| String::from_utf8_lossy(&o.stderr).into_owned())
                    .unwrap_or_default();
                return Err(KinemaError::Encode(format!(
                    "failed to write frame {} to ffmpeg: {}. FFmpeg stderr: {}",
                    i, e, stderr
                )));
            }
        }

        // Close stdin to signal end of input.
        drop(stdin);

        let output = child
            .wait_with_output()
            .map_err(|e| KinemaError::Encode(format!("ffmpeg process error: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KinemaError::Encode(format!(
                "ffmpeg failed with status {}: {}",
                output.status, stderr
            )));
        }

        tracing::info!(
            "Encoded {} frames to {} ({}x{} @ {}fps)",
            frames.len(),
            output_path.display(),
            width,
            height,
            fps
        );

        Ok(())
    }
}

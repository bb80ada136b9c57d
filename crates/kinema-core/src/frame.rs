use serde::{Deserialize, Serialize};

/// Pixel format of a frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 8-bit RGBA (4 bytes per pixel).
    Rgba8,
    /// 8-bit RGB (3 bytes per pixel, no alpha).
    Rgb8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgba8 => 4,
            PixelFormat::Rgb8 => 3,
        }
    }
}

/// A single video frame as a raw pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

impl FrameBuffer {
    /// Create a frame buffer filled with transparent black.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let size = (width as usize) * (height as usize) * format.bytes_per_pixel();
        Self {
            data: vec![0u8; size],
            width,
            height,
            format,
        }
    }

    /// Create an RGBA frame buffer filled with a solid color.
    pub fn solid(width: u32, height: u32, color: &crate::Color) -> Self {
        let pixel = color.to_rgba8();
        let pixel_count = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data,
            width,
            height,
            format: PixelFormat::Rgba8,
        }
    }

    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    /// Get the RGBA value at a pixel coordinate. Returns None if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let offset = ((y as usize) * (self.width as usize) + (x as usize)) * bpp;
        match self.format {
            PixelFormat::Rgba8 => Some([
                self.data[offset],
                self.data[offset + 1],
                self.data[offset + 2],
                self.data[offset + 3],
            ]),
            PixelFormat::Rgb8 => Some([
                self.data[offset],
                self.data[offset + 1],
                self.data[offset + 2],
                255,
            ]),
        }
    }

    /// Set the RGBA value at a pixel coordinate. No-op if out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let bpp = self.format.bytes_per_pixel();
        let offset = ((y as usize) * (self.width as usize) + (x as usize)) * bpp;
        self.data[offset] = rgba[0];
        self.data[offset + 1] = rgba[1];
        self.data[offset + 2] = rgba[2];
        if bpp == 4 {
            self.data[offset + 3] = rgba[3];
        }
    }

    /// Blend a single RGBA pixel over the existing pixel at (x, y) using
    /// Porter-Duff "over". No-op if out of bounds or the source is fully
    /// transparent.
    pub fn blend_pixel(&mut self, x: u32, y: u32, src: [u8; 4]) {
        let sa = src[3] as u32;
        if sa == 0 {
            return;
        }
        if sa == 255 {
            self.set_pixel(x, y, src);
            return;
        }
        let Some(dst) = self.get_pixel(x, y) else {
            return;
        };
        let da = dst[3] as u32;
        let inv_sa = 255 - sa;
        let out_a = sa + (da * inv_sa) / 255;
        if out_a == 0 {
            return;
        }
        let blend = |s: u8, d: u8| -> u8 {
            ((s as u32 * sa * 255 + d as u32 * da * inv_sa) / (out_a * 255)) as u8
        };
        self.set_pixel(
            x,
            y,
            [
                blend(src[0], dst[0]),
                blend(src[1], dst[1]),
                blend(src[2], dst[2]),
                out_a as u8,
            ],
        );
    }

    /// Alpha-composite `src` on top of `self` at position (dx, dy),
    /// clipping to the destination bounds.
    pub fn composite_over(&mut self, src: &FrameBuffer, dx: i32, dy: i32) {
        if self.format != PixelFormat::Rgba8 || src.format != PixelFormat::Rgba8 {
            return;
        }
        for sy in 0..src.height as i32 {
            let ty = dy + sy;
            if ty < 0 || ty >= self.height as i32 {
                continue;
            }
            for sx in 0..src.width as i32 {
                let tx = dx + sx;
                if tx < 0 || tx >= self.width as i32 {
                    continue;
                }
                if let Some(pixel) = src.get_pixel(sx as u32, sy as u32) {
                    self.blend_pixel(tx as u32, ty as u32, pixel);
                }
            }
        }
    }
}

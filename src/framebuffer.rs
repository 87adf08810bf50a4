//! Pixel backing store for the raster canvas.
//!
//! Provides a SIMD-aligned RGBA pixel buffer. Whole-buffer compositing goes through
//! trueno vectors so the fade-in blend runs on the best available SIMD backend.

use crate::color::Rgba;
use crate::error::{Error, Result};
use trueno::Vector;

/// Alignment for SIMD operations (64 bytes for AVX-512).
const SIMD_ALIGNMENT: usize = 64;

/// SIMD-aligned framebuffer holding the device pixels of a canvas.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// RGBA pixels in row-major order, 4 bytes per pixel.
    pixels: Vec<u8>,
    /// Stride in bytes (may include padding for alignment).
    stride: usize,
}

impl Framebuffer {
    /// Create a new, fully transparent framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use histo::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        // Calculate stride with alignment padding
        let row_bytes = (width as usize) * 4;
        let stride = (row_bytes + SIMD_ALIGNMENT - 1) & !(SIMD_ALIGNMENT - 1);

        let size = stride * (height as usize);
        let mut pixels = Vec::with_capacity(size + SIMD_ALIGNMENT);
        pixels.resize(size, 0);

        Ok(Self {
            width,
            height,
            pixels,
            stride,
        })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the stride (row width in bytes, including any padding).
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Clear the framebuffer to a solid color.
    ///
    /// Rows are filled in 64-byte chunks (16 RGBA pixels) so the copy auto-vectorizes.
    pub fn clear(&mut self, color: Rgba) {
        let [r, g, b, a] = color.to_array();

        let pattern: [u8; 64] = {
            let mut p = [0u8; 64];
            for px in p.chunks_exact_mut(4) {
                px.copy_from_slice(&[r, g, b, a]);
            }
            p
        };

        for y in 0..self.height {
            let row_start = (y as usize) * self.stride;
            let row_end = row_start + (self.width as usize) * 4;
            let row = &mut self.pixels[row_start..row_end];

            let mut offset = 0;
            while offset + 64 <= row.len() {
                row[offset..offset + 64].copy_from_slice(&pattern);
                offset += 64;
            }

            for chunk in row[offset..].chunks_exact_mut(4) {
                chunk.copy_from_slice(&[r, g, b, a]);
            }
        }
    }

    /// Fill a rectangular region with a solid color.
    ///
    /// Coordinates are clamped to framebuffer bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let x1 = x.min(self.width);
        let y1 = y.min(self.height);
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);

        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let [r, g, b, a] = color.to_array();
        let rect_width = (x2 - x1) as usize;

        for row_y in y1..y2 {
            let row_start = (row_y as usize) * self.stride + (x1 as usize) * 4;
            let row = &mut self.pixels[row_start..row_start + rect_width * 4];

            for chunk in row.chunks_exact_mut(4) {
                chunk.copy_from_slice(&[r, g, b, a]);
            }
        }
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.pixel_index(x, y);
        Some(Rgba::from_array([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]))
    }

    /// Set the color at a specific pixel coordinate.
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    /// Blend an entire framebuffer over this one with a uniform opacity.
    ///
    /// `out = src * alpha + dst * (1 - alpha)`, computed per channel with trueno vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if the framebuffers have different dimensions.
    pub fn blend_over(&mut self, other: &Framebuffer, alpha: f32) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::InvalidDimensions {
                width: other.width,
                height: other.height,
            });
        }

        let alpha = alpha.clamp(0.0, 1.0);
        let inv_alpha = 1.0 - alpha;
        let row_pixels = (self.width as usize) * 4;
        let alpha_row = Vector::from_vec(vec![alpha; row_pixels]);
        let inv_alpha_row = Vector::from_vec(vec![inv_alpha; row_pixels]);

        for y in 0..self.height {
            let row_start = (y as usize) * self.stride;

            let dst_f32: Vec<f32> = self.pixels[row_start..row_start + row_pixels]
                .iter()
                .map(|&b| f32::from(b))
                .collect();
            let src_f32: Vec<f32> = other.pixels[row_start..row_start + row_pixels]
                .iter()
                .map(|&b| f32::from(b))
                .collect();

            let dst_vec = Vector::from_vec(dst_f32);
            let src_vec = Vector::from_vec(src_f32);

            let blended = src_vec
                .mul(&alpha_row)
                .and_then(|src| dst_vec.mul(&inv_alpha_row).and_then(|dst| src.add(&dst)))
                .map_err(|e| Error::Rendering(format!("blend failed: {e:?}")))?;

            let row = &mut self.pixels[row_start..row_start + row_pixels];
            for (byte, &v) in row.iter_mut().zip(blended.as_slice()) {
                *byte = v.round().clamp(0.0, 255.0) as u8;
            }
        }

        Ok(())
    }

    /// Calculate the byte index for a pixel coordinate.
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * self.stride + (x as usize) * 4
    }

    /// Get pixel data as a compact buffer without stride padding.
    ///
    /// PNG expects tightly-packed rows.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        let row_bytes = (self.width as usize) * 4;

        if self.stride == row_bytes {
            return self.pixels[..row_bytes * (self.height as usize)].to_vec();
        }

        let mut compact = Vec::with_capacity(row_bytes * (self.height as usize));
        for y in 0..self.height {
            let start = (y as usize) * self.stride;
            compact.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        compact
    }
}

//! Pixel buffer shared by all patterns.

use crate::color::{BLACK, Rgb, scale_color};

/// Fixed-capacity pixel buffer
///
/// `N` is the capacity; only the first `len` pixels belong to the physical
/// string. Channels are `u8`, so every stored value is already within 0-255.
#[derive(Debug, Clone)]
pub struct PixelBuffer<const N: usize> {
    pixels: [Rgb; N],
    len: usize,
}

impl<const N: usize> PixelBuffer<N> {
    /// Create a dark buffer using `len` pixels (capped at `N`)
    pub const fn new(len: usize) -> Self {
        Self {
            pixels: [BLACK; N],
            len: if len > N { N } else { len },
        }
    }

    /// Number of pixels on the string
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Change the number of pixels in use, clearing the buffer
    pub fn resize(&mut self, len: usize) {
        self.len = len.min(N);
        self.pixels = [BLACK; N];
    }

    /// Get a pixel, or `None` when `index` is outside the string
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.as_slice().get(index).copied()
    }

    /// Set a pixel; writes outside the string are ignored
    pub fn set(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.as_mut_slice().get_mut(index) {
            *pixel = color;
        }
    }

    /// Fill the whole string with one color
    pub fn fill(&mut self, color: Rgb) {
        self.as_mut_slice().fill(color);
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.fill(BLACK);
    }

    /// Dim only the given pixel by `amount`
    pub fn fade_pixel_by(&mut self, index: usize, amount: u8) {
        if let Some(pixel) = self.as_mut_slice().get_mut(index) {
            *pixel = scale_color(*pixel, 255 - amount);
        }
    }

    /// Pixels on the string
    pub fn as_slice(&self) -> &[Rgb] {
        &self.pixels[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [Rgb] {
        &mut self.pixels[..self.len]
    }

    /// Copy this buffer into `out`, scaled by `scale`
    pub fn scaled_into(&self, out: &mut Self, scale: u8) {
        out.len = self.len;
        for (dst, src) in out.pixels.iter_mut().zip(self.as_slice()) {
            *dst = if scale == 255 {
                *src
            } else {
                scale_color(*src, scale)
            };
        }
    }
}

impl<const N: usize> Default for PixelBuffer<N> {
    fn default() -> Self {
        Self::new(N)
    }
}

//! In-memory 1-bpp playfield, flushed to the panel once per frame.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::{
        BinaryColor,
        Rgb565,
    },
    prelude::*,
    primitives::Rectangle,
};

use crate::config::{
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
};

const STRIDE: usize = SCREEN_WIDTH as usize / 8;
const BUFFER_LEN: usize = STRIDE * SCREEN_HEIGHT as usize;

/// Packed row-major, MSB-first.
pub struct FrameBuffer {
    bits: [u8; BUFFER_LEN],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            bits: [0; BUFFER_LEN],
        }
    }

    /// Turn every pixel off.
    pub fn clear_buffer(&mut self) {
        self.bits.fill(0);
    }

    fn locate(point: Point) -> Option<(usize, u8)> {
        if point.x < 0 || point.y < 0 || point.x >= SCREEN_WIDTH || point.y >= SCREEN_HEIGHT {
            return None;
        }
        let (x, y) = (point.x as usize, point.y as usize);
        Some((y * STRIDE + x / 8, 0x80 >> (x % 8)))
    }

    /// Off for anything outside the playfield.
    pub fn pixel(&self, point: Point) -> BinaryColor {
        match Self::locate(point) {
            Some((index, mask)) if self.bits[index] & mask != 0 => BinaryColor::On,
            _ => BinaryColor::Off,
        }
    }

    #[cfg(test)]
    pub(crate) fn lit_pixels(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Row-major colours of the whole playfield.
    pub fn colors(&self) -> impl Iterator<Item = BinaryColor> + '_ {
        self.bounding_box().points().map(|p| self.pixel(p))
    }

    /// Copy the playfield onto `display` with its top-left corner at `origin`.
    pub fn flush<D>(&self, display: &mut D, origin: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let area = Rectangle::new(origin, self.size());
        display.fill_contiguous(&area, self.colors().map(Rgb565::from))
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Anything off the playfield is clipped.
            let Some((index, mask)) = Self::locate(point) else {
                continue;
            };
            match color {
                BinaryColor::On => self.bits[index] |= mask,
                BinaryColor::Off => self.bits[index] &= !mask,
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.bits.fill(match color {
            BinaryColor::On => 0xff,
            BinaryColor::Off => 0x00,
        });
        Ok(())
    }
}

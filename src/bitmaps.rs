//! 1-bit sprite art.
//!
//! Rows are packed MSB-first and padded to whole bytes. Only set bits are
//! drawn, so bitmaps can overlap without punching holes in each other.

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
};

use crate::config::{
    PLATFORM_HEIGHT,
    PLATFORM_WIDTH,
    SPRITE_HEIGHT,
    SPRITE_WIDTH,
    START_PLATFORM_WIDTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap {
    data: &'static [u8],
    width: u32,
    height: u32,
}

impl Bitmap {
    /// Panics at compile time if `data` does not hold `height` padded rows.
    pub const fn new(data: &'static [u8], width: u32, height: u32) -> Self {
        assert!(data.len() == (width as usize).div_ceil(8) * height as usize);
        Self {
            data,
            width,
            height,
        }
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    const fn stride(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.data[y as usize * self.stride() + x as usize / 8];
        byte & (0x80 >> (x % 8)) != 0
    }

    /// Set bits as lit pixels, offset by `top_left`.
    pub fn pixels(&self, top_left: Point) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_set(x, y))
            .map(move |(x, y)| {
                Pixel(top_left + Point::new(x as i32, y as i32), BinaryColor::On)
            })
    }

    pub fn draw<D>(&self, target: &mut D, top_left: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        target.draw_iter(self.pixels(top_left))
    }
}

#[rustfmt::skip]
const SPRITE_DATA: [u8; 24] = [
    0b0011_1111, 0b0000_0000,
    0b0100_0000, 0b1000_0000,
    0b1001_0010, 0b0100_0000,
    0b1000_0000, 0b0100_0000,
    0b1010_0001, 0b0100_0000,
    0b1001_1110, 0b0100_0000,
    0b0100_0000, 0b1000_0000,
    0b0011_1111, 0b0000_0000,
    0b0001_0010, 0b0000_0000,
    0b0010_0001, 0b0000_0000,
    0b0100_0000, 0b1000_0000,
    0b1100_0000, 0b1100_0000,
];

const PLATFORM_DATA: [u8; 6] = [0xff; 6];

const START_PLATFORM_DATA: [u8; 24] = [0xff; 24];

pub const SPRITE: Bitmap = Bitmap::new(&SPRITE_DATA, SPRITE_WIDTH as u32, SPRITE_HEIGHT as u32);

pub const PLATFORM: Bitmap =
    Bitmap::new(&PLATFORM_DATA, PLATFORM_WIDTH as u32, PLATFORM_HEIGHT as u32);

pub const START_PLATFORM: Bitmap =
    Bitmap::new(&START_PLATFORM_DATA, START_PLATFORM_WIDTH as u32, PLATFORM_HEIGHT as u32);

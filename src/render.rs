//! Drawing the game state. Nothing here mutates state.

use core::fmt::Write as _;

use embedded_graphics::{
    mono_font::{
        MonoTextStyle,
        ascii::{
            FONT_6X10,
            FONT_10X20,
        },
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{
        Alignment,
        Baseline,
        Text,
        TextStyleBuilder,
    },
};

use crate::{
    bitmaps::{
        PLATFORM,
        SPRITE,
        START_PLATFORM,
    },
    config::{
        FLOOR_Y,
        SCREEN_WIDTH,
    },
    game::GameState,
    kinematics::Sprite,
};

const SMALL: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
const LARGE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);

/// Where the big score sits on the end screen, just under "OVER".
const END_SCORE_POSITION: Point = Point::new(15, 75);

/// Fixed-capacity text for formatting numbers without an allocator.
/// Writes that do not fit are rejected whole.
pub struct TextBuf<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> Default for TextBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TextBuf<N> {
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        // Only whole `str`s are ever copied in, so this cannot fail.
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }
}

impl<const N: usize> core::fmt::Write for TextBuf<N> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let room = N - self.len;
        if s.len() > room {
            return Err(core::fmt::Error);
        }
        self.bytes[self.len..self.len + s.len()].copy_from_slice(s.as_bytes());
        self.len += s.len();
        Ok(())
    }
}

/// "level.platform", e.g. `3.4`.
pub fn score_text(level: u16, platform: usize) -> TextBuf<16> {
    let mut text = TextBuf::new();
    // u16 + '.' + usize always fits in 16 bytes on a 32-bit target.
    write!(text, "{level}.{platform}").ok();
    text
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSize {
    /// Top-left corner during play.
    Small,
    /// Centre of the end screen.
    Large,
}

pub fn draw_score<D>(target: &mut D, game: &GameState, size: ScoreSize) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let text = score_text(game.level(), game.current_platform());
    let (style, position) = match size {
        ScoreSize::Small => (SMALL, Point::zero()),
        ScoreSize::Large => (LARGE, END_SCORE_POSITION),
    };
    Text::with_baseline(text.as_str(), position, style, Baseline::Top).draw(target)?;
    Ok(())
}

pub fn draw_sprite<D>(target: &mut D, sprite: &Sprite) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    SPRITE.draw(target, Point::new(sprite.x, sprite.top()))
}

/// Shown until the first real platform is reached.
pub fn draw_start_platform<D>(target: &mut D, game: &GameState) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if game.current_platform() == 0 {
        START_PLATFORM.draw(target, Point::new(0, FLOOR_Y))?;
    }
    Ok(())
}

pub fn draw_platforms<D>(target: &mut D, game: &GameState) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    for platform in game.field().active() {
        PLATFORM.draw(target, Point::new(platform.x, platform.y))?;
    }
    Ok(())
}

/// One frame of play: platforms, sprite, small score.
pub fn draw_playing<D>(target: &mut D, game: &GameState) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_platforms(target, game)?;
    draw_start_platform(target, game)?;
    draw_sprite(target, game.sprite())?;
    draw_score(target, game, ScoreSize::Small)
}

fn draw_centered<D>(
    target: &mut D,
    text: &str,
    y: i32,
    style: MonoTextStyle<'static, BinaryColor>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Top)
        .build();
    Text::with_text_style(text, Point::new(SCREEN_WIDTH / 2, y), style, text_style)
        .draw(target)?;
    Ok(())
}

/// Title card with the sprite bouncing on the start platform.
pub fn draw_start_screen<D>(target: &mut D, game: &GameState) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_centered(target, "JUMPR", 16, LARGE)?;
    draw_centered(target, "PRESS", 48, SMALL)?;
    draw_centered(target, "TO PLAY", 60, SMALL)?;
    draw_start_platform(target, game)?;
    draw_sprite(target, game.sprite())
}

pub fn draw_end_screen<D>(target: &mut D, game: &GameState) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_centered(target, "GAME", 16, LARGE)?;
    draw_centered(target, "OVER", 40, LARGE)?;
    draw_score(target, game, ScoreSize::Large)?;
    draw_centered(target, "PRESS TO", 104, SMALL)?;
    draw_centered(target, "RETRY", 116, SMALL)
}

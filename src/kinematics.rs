//! Vertical motion of the sprite.
//!
//! The sprite is always in one of two regimes. While bouncing it oscillates
//! between its baseline and [`MAX_JUMP_HEIGHT`] above it, one gravity step
//! per frame. While falling the bounce is frozen and the baseline itself
//! drops one gravity step per frame.

use crate::{
    config::{
        GRAVITY,
        MAX_JUMP_HEIGHT,
        SCREEN_HEIGHT,
        SPRITE_HEIGHT,
        START_BASELINE,
        START_PLATFORM_THRESHOLD,
    },
    platforms::Platform,
    sound::{
        Tone,
        falling_tone,
        jump_tone,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sprite {
    /// Left column, as sampled from the potentiometer.
    pub x: i32,
    /// Top row of the sprite when it is not jumping.
    pub baseline: i32,
    /// Offset above the baseline, `0..=MAX_JUMP_HEIGHT`.
    pub jump_height: i32,
    /// Ascending half of a bounce.
    pub jumping: bool,
    /// Off-platform freefall.
    pub falling: bool,
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new()
    }
}

impl Sprite {
    pub const fn new() -> Self {
        Self {
            x: 0,
            baseline: START_BASELINE,
            jump_height: 0,
            jumping: true,
            falling: false,
        }
    }

    /// Back onto the start platform, about to jump. The column is kept since
    /// it follows the potentiometer.
    pub fn reset(&mut self) {
        *self = Self { x: self.x, ..Self::new() };
    }

    /// Top row as drawn this frame.
    pub const fn top(&self) -> i32 {
        self.baseline - self.jump_height
    }

    /// Row just below the sprite's feet this frame.
    pub const fn feet(&self) -> i32 {
        self.baseline + SPRITE_HEIGHT - self.jump_height
    }

    /// Feet within a pixel of the top of the screen.
    pub const fn reached_top(&self) -> bool {
        self.feet() <= 1
    }

    /// Advance the bounce by one frame. Returns the chirp for ascending
    /// frames.
    pub fn bounce(&mut self) -> Option<Tone> {
        let tone = if self.jumping {
            self.jump_height = (self.jump_height + GRAVITY).min(MAX_JUMP_HEIGHT);
            Some(jump_tone(self.jump_height))
        } else {
            self.jump_height = (self.jump_height - GRAVITY).max(0);
            None
        };

        if self.jump_height >= MAX_JUMP_HEIGHT {
            self.jumping = false;
        }
        if self.jump_height <= 0 {
            self.jumping = true;
        }
        tone
    }

    /// Drop one gravity step. Returns the whistle and whether the sprite has
    /// left the bottom of the screen.
    pub fn fall(&mut self) -> (Tone, bool) {
        self.baseline += GRAVITY;
        (falling_tone(self.baseline), self.baseline >= SCREEN_HEIGHT)
    }

    /// At the top of a bounce off a real platform: the moment to check
    /// whether there is still something underneath.
    pub const fn can_fall_off(&self) -> bool {
        self.jump_height == MAX_JUMP_HEIGHT && self.baseline <= START_PLATFORM_THRESHOLD
    }

    pub fn start_falling(&mut self) {
        self.falling = true;
        self.jumping = false;
    }

    /// Snap onto `platform` and start a new bounce from it.
    pub fn land_on(&mut self, platform: &Platform) {
        self.baseline = platform.y - SPRITE_HEIGHT;
        self.jump_height = 0;
        self.jumping = true;
        self.falling = false;
    }
}

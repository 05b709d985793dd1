//! One life of play: sprite, platforms, score, and the per-frame update that
//! ties them together.

use crate::{
    collision::{
        horizontally_overlaps,
        lands_on,
    },
    kinematics::Sprite,
    platforms::PlatformField,
    rng::Rng,
    sound::Tone,
};

/// What happened during one frame update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameOutcome {
    /// Tone to start this frame, if any.
    pub tone: Option<Tone>,
    /// Index of the platform landed on.
    pub landed: Option<usize>,
    /// The sprite reached the top and a new level began.
    pub level_complete: bool,
    /// The sprite dropped off the bottom this frame.
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct GameState {
    sprite: Sprite,
    field: PlatformField,
    level: u16,
    current_platform: usize,
    game_over: bool,
    rng: Rng,
}

impl GameState {
    pub fn new(seed: u32) -> Self {
        Self {
            sprite: Sprite::new(),
            field: PlatformField::new(),
            level: 0,
            current_platform: 0,
            game_over: false,
            rng: Rng::new(seed),
        }
    }

    pub const fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub const fn field(&self) -> &PlatformField {
        &self.field
    }

    pub const fn level(&self) -> u16 {
        self.level
    }

    /// Highest platform reached this level; doubles as the score.
    pub const fn current_platform(&self) -> usize {
        self.current_platform
    }

    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Fold outside entropy into the platform generator.
    pub fn reseed(&mut self, entropy: u64) {
        self.rng.mix(entropy);
    }

    /// Put the sprite back on the start platform and schedule a new layout.
    pub fn reset_level(&mut self, level: u16) {
        self.sprite.reset();
        self.level = level;
        self.current_platform = 0;
        self.field.mark_dirty();
        debug!("level {} reset", level);
    }

    /// Start over from level 0 after a game over.
    pub fn reset(&mut self) {
        self.game_over = false;
        self.reset_level(0);
    }

    /// Bounce in place on the start platform, as shown behind the title.
    pub fn idle(&mut self, sprite_x: i32) -> Option<Tone> {
        self.sprite.x = sprite_x;
        if self.sprite.falling {
            return None;
        }
        self.sprite.bounce()
    }

    /// Advance one frame of play with the sprite at column `sprite_x`.
    ///
    /// Stages run in a fixed order: motion first so contact tests see this
    /// frame's position, fall-off last so a sprite that just landed is not
    /// judged off its platform.
    pub fn update(&mut self, sprite_x: i32) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        if self.game_over {
            return outcome;
        }

        self.field.regenerate_if_needed(self.sprite.x, &mut self.rng);
        self.field.retire_passed(self.current_platform);
        self.sprite.x = sprite_x;

        if !self.sprite.falling {
            outcome.tone = self.sprite.bounce();
        }

        if self.sprite.falling {
            let (tone, bottomed) = self.sprite.fall();
            outcome.tone = Some(tone);
            if bottomed {
                self.game_over = true;
                outcome.game_over = true;
                info!("game over at {}.{}", self.level, self.current_platform);
                return outcome;
            }
        }

        if self.sprite.reached_top() {
            let level = self.level.saturating_add(1);
            info!("level {} complete", self.level);
            self.reset_level(level);
            outcome.level_complete = true;
            return outcome;
        }

        // Any matching platform becomes current, including one below the
        // current platform.
        if !self.sprite.jumping {
            let (x, feet) = (self.sprite.x, self.sprite.feet());
            if let Some(platform) = self.field.active().find(|p| lands_on(x, feet, p)).copied() {
                self.sprite.land_on(&platform);
                self.current_platform = platform.index;
                outcome.landed = Some(platform.index);
                debug!("landed on platform {}", platform.index);
            }
        }

        if self.sprite.can_fall_off() {
            let supported = self
                .field
                .get(self.current_platform)
                .is_some_and(|p| horizontally_overlaps(self.sprite.x, p));
            if !supported && !self.sprite.falling {
                self.sprite.start_falling();
                debug!("fell off platform {}", self.current_platform);
            }
        }

        outcome
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut PlatformField {
        &mut self.field
    }

    #[cfg(test)]
    pub(crate) fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

//! Start, play and end screens, and the button presses that move between
//! them.

use embassy_time::Instant;
use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
};

use crate::{
    config::Config,
    game::GameState,
    input::{
        ButtonLatch,
        Debouncer,
        HorizontalSampler,
        PositionSensor,
    },
    render,
    sound::Tone,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    Start,
    Playing,
    End,
}

/// Side effects the caller should carry out after a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tick {
    pub tone: Option<Tone>,
    /// Set on the single tick that enters the end screen.
    pub play_game_over: bool,
}

pub struct Jumpr {
    screen: Screen,
    game: GameState,
    sampler: HorizontalSampler,
    debouncer: Debouncer,
    config: Config,
}

impl Jumpr {
    pub fn new(config: Config, seed: u32) -> Self {
        Self {
            screen: Screen::Start,
            game: GameState::new(seed),
            sampler: HorizontalSampler::new(config.smoothing),
            debouncer: Debouncer::new(config.debounce),
            config,
        }
    }

    pub const fn screen(&self) -> Screen {
        self.screen
    }

    pub const fn game(&self) -> &GameState {
        &self.game
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Run one frame: sample input, consume a pending press and advance
    /// whatever the current screen runs.
    pub fn tick<S>(&mut self, now: Instant, button: &ButtonLatch, sensor: &mut S) -> Tick
    where
        S: PositionSensor + ?Sized,
    {
        let x = self.sampler.sample_horizontal(sensor);
        let pressed = self.debouncer.poll(button, now);

        match self.screen {
            Screen::Start => {
                let tone = self.game.idle(x);
                if pressed {
                    self.game.reseed(now.as_ticks());
                    self.enter(Screen::Playing);
                }
                Tick {
                    tone,
                    play_game_over: false,
                }
            }
            Screen::Playing => {
                let outcome = self.game.update(x);
                if outcome.game_over {
                    self.enter(Screen::End);
                }
                Tick {
                    tone: outcome.tone,
                    play_game_over: outcome.game_over,
                }
            }
            Screen::End => {
                if pressed {
                    self.game.reset();
                    self.enter(Screen::Start);
                }
                Tick::default()
            }
        }
    }

    fn enter(&mut self, screen: Screen) {
        info!(
            "screen {} -> {}, score {}.{}",
            self.screen,
            screen,
            self.game.level(),
            self.game.current_platform()
        );
        self.screen = screen;
    }

    /// Draw the current screen. The target is expected to be cleared.
    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        match self.screen {
            Screen::Start => render::draw_start_screen(target, &self.game),
            Screen::Playing => render::draw_playing(target, &self.game),
            Screen::End => render::draw_end_screen(target, &self.game),
        }
    }
}

#[cfg(test)]
mod tests {
    use embassy_time::Duration;

    use super::*;
    use crate::{
        config::{
            GRAVITY,
            MAX_JUMP_HEIGHT,
            SCREEN_HEIGHT,
        },
        framebuffer::FrameBuffer,
        kinematics::Sprite,
    };

    struct Knob(u16);

    impl PositionSensor for Knob {
        fn read_raw(&mut self) -> u16 {
            self.0
        }
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn playing() -> (Jumpr, ButtonLatch) {
        let mut jumpr = Jumpr::new(Config::default(), 3);
        let latch = ButtonLatch::new();
        latch.trigger();
        jumpr.tick(at(0), &latch, &mut Knob(0));
        assert_eq!(jumpr.screen(), Screen::Playing);
        (jumpr, latch)
    }

    /// Drop the sprite just above the bottom so the next frame ends the game.
    fn about_to_die(jumpr: &mut Jumpr) {
        *jumpr.game.sprite_mut() = Sprite {
            x: 0,
            baseline: SCREEN_HEIGHT - GRAVITY,
            jump_height: MAX_JUMP_HEIGHT,
            jumping: false,
            falling: true,
        };
    }

    #[test]
    fn start_screen_bounces_until_pressed() {
        let mut jumpr = Jumpr::new(Config::default(), 3);
        let latch = ButtonLatch::new();
        for frame in 0..100 {
            jumpr.tick(at(frame * 20), &latch, &mut Knob(512));
            assert_eq!(jumpr.screen(), Screen::Start);
        }
        assert_eq!(jumpr.game().current_platform(), 0);
        assert!(jumpr.game().field().is_dirty());

        latch.trigger();
        jumpr.tick(at(2000), &latch, &mut Knob(512));
        assert_eq!(jumpr.screen(), Screen::Playing);
        assert!(!latch.is_pending());
    }

    #[test]
    fn presses_during_play_are_swallowed() {
        let (mut jumpr, latch) = playing();
        for frame in 1..50 {
            latch.trigger();
            jumpr.tick(at(frame * 100), &latch, &mut Knob(0));
            assert!(!latch.is_pending());
            assert_eq!(jumpr.screen(), Screen::Playing);
        }
    }

    #[test]
    fn game_over_plays_the_jingle_once() {
        let (mut jumpr, latch) = playing();
        about_to_die(&mut jumpr);

        let tick = jumpr.tick(at(100), &latch, &mut Knob(0));
        assert!(tick.play_game_over);
        assert_eq!(jumpr.screen(), Screen::End);

        for frame in 2..20 {
            assert_eq!(jumpr.tick(at(frame * 20), &latch, &mut Knob(0)), Tick::default());
        }
    }

    #[test]
    fn end_screen_press_resets_to_start() {
        let (mut jumpr, latch) = playing();
        about_to_die(&mut jumpr);
        jumpr.tick(at(100), &latch, &mut Knob(0));
        assert!(jumpr.game().is_game_over());

        latch.trigger();
        jumpr.tick(at(1000), &latch, &mut Knob(0));
        assert_eq!(jumpr.screen(), Screen::Start);
        assert!(!jumpr.game().is_game_over());
        assert_eq!(jumpr.game().level(), 0);
        assert_eq!(jumpr.game().current_platform(), 0);
        assert!(jumpr.game().field().is_dirty());
    }

    #[test]
    fn bounced_press_does_not_skip_the_end_screen() {
        let config = Config::default().with_debounce(Duration::from_millis(50));
        let mut jumpr = Jumpr::new(config, 3);
        let latch = ButtonLatch::new();
        latch.trigger();
        jumpr.tick(at(0), &latch, &mut Knob(0));
        about_to_die(&mut jumpr);
        jumpr.tick(at(10), &latch, &mut Knob(0));
        assert_eq!(jumpr.screen(), Screen::End);

        // Contact bounce from the press that started the game.
        latch.trigger();
        jumpr.tick(at(30), &latch, &mut Knob(0));
        assert_eq!(jumpr.screen(), Screen::End);
    }

    #[test]
    fn each_screen_renders_something() {
        let (mut jumpr, latch) = playing();
        let mut fb = FrameBuffer::new();
        jumpr.render(&mut fb).unwrap();
        assert!(fb.lit_pixels() > 0);

        about_to_die(&mut jumpr);
        jumpr.tick(at(100), &latch, &mut Knob(0));
        fb.clear_buffer();
        jumpr.render(&mut fb).unwrap();
        assert!(fb.lit_pixels() > 0);
    }

    #[test]
    fn steering_follows_the_knob() {
        let config = Config::default().with_smoothing(0.0);
        let mut jumpr = Jumpr::new(config, 3);
        let latch = ButtonLatch::new();
        jumpr.tick(at(0), &latch, &mut Knob(1023));
        assert_eq!(jumpr.game().sprite().x, 53);
        jumpr.tick(at(20), &latch, &mut Knob(0));
        assert_eq!(jumpr.game().sprite().x, 0);
    }
}

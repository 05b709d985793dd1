//! Playfield geometry, physics constants and runtime tuning.
//!
//! The playfield is a 64 px wide, 128 px tall portrait strip drawn into the
//! middle of the badge's landscape panel. All coordinates in this crate are
//! playfield coordinates: `x` grows to the right, `y` grows downwards.

use embassy_time::Duration;
use embedded_graphics::prelude::Point;

// ── Playfield ───────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 64;
pub const SCREEN_HEIGHT: i32 = 128;

// ── Sprites ─────────────────────────────────────────────────────────────────

pub const SPRITE_WIDTH: i32 = 10;
pub const SPRITE_HEIGHT: i32 = 12;

pub const PLATFORM_WIDTH: i32 = 16;
pub const PLATFORM_HEIGHT: i32 = 3;

pub const START_PLATFORM_WIDTH: i32 = 64;

// ── Physics ─────────────────────────────────────────────────────────────────

/// Pixels moved per frame, both for the bounce and for freefall.
pub const GRAVITY: i32 = 3;

/// Peak of a bounce, measured upwards from the baseline.
pub const MAX_JUMP_HEIGHT: i32 = 30;

/// Baseline of a sprite resting on the start platform.
pub const START_BASELINE: i32 = SCREEN_HEIGHT - (PLATFORM_HEIGHT + SPRITE_HEIGHT);

/// Baselines above this line are on a real platform; the start platform can
/// never be fallen off.
pub const START_PLATFORM_THRESHOLD: i32 = 110;

/// How far the sprite may hang past either edge of a platform and still land.
pub const OVERLAP_TOLERANCE: i32 = 2;

// ── Platform field ──────────────────────────────────────────────────────────

/// Slot 0 is the start platform, slots `1..PLATFORM_COUNT` are generated.
pub const PLATFORM_COUNT: usize = 6;

/// Discrete horizontal positions a generated platform can occupy.
pub const PLATFORM_SLOTS: usize = (SCREEN_WIDTH / PLATFORM_WIDTH) as usize;

/// Vertical distance between consecutive platforms.
pub const PLATFORM_SPACING: i32 = 21;

/// Top edge of the start platform; generated platforms stack upwards from it.
pub const FLOOR_Y: i32 = SCREEN_HEIGHT - PLATFORM_HEIGHT;

// Landings are detected by exact pixel equality, so every platform must be a
// whole number of gravity steps away from the one below it.
const _: () = assert!(PLATFORM_SPACING % GRAVITY == 0);
const _: () = assert!(MAX_JUMP_HEIGHT % GRAVITY == 0);
const _: () = assert!(PLATFORM_SPACING < MAX_JUMP_HEIGHT);
const _: () = assert!(FLOOR_Y - (PLATFORM_COUNT as i32 - 1) * PLATFORM_SPACING > 0);

// ── Input ───────────────────────────────────────────────────────────────────

/// Exclusive upper bound of a raw potentiometer sample.
pub const ANALOG_RANGE: u16 = 1024;

/// Largest horizontal sprite position that keeps it fully on screen.
pub const MAX_SPRITE_X: i32 = SCREEN_WIDTH - SPRITE_WIDTH;

// ── Runtime tuning ──────────────────────────────────────────────────────────

/// Tuning knobs that do not affect the landing geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Fixed period of one frame update.
    pub frame_period: Duration,
    /// Minimum time between two accepted button presses.
    pub debounce: Duration,
    /// Weight of the previous horizontal position in the moving average.
    pub smoothing: f32,
    /// Where the top-left corner of the playfield lands on the panel.
    pub display_origin: Point,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_period: Duration::from_millis(20),
            debounce: Duration::from_millis(50),
            smoothing: 0.98,
            // Centred on the badge's 320x170 landscape panel.
            display_origin: Point::new((320 - SCREEN_WIDTH) / 2, (170 - SCREEN_HEIGHT) / 2),
        }
    }
}

impl Config {
    #[cfg(test)]
    #[must_use]
    pub(crate) const fn with_frame_period(mut self, frame_period: Duration) -> Self {
        self.frame_period = frame_period;
        self
    }

    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Clamped to `0.0..=1.0`; `0.0` disables smoothing entirely.
    #[must_use]
    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing.clamp(0.0, 1.0);
        self
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) const fn with_display_origin(mut self, display_origin: Point) -> Self {
        self.display_origin = display_origin;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_baseline_rests_on_floor() {
        assert_eq!(START_BASELINE, 113);
        assert_eq!(START_BASELINE + SPRITE_HEIGHT, FLOOR_Y);
        assert!(START_BASELINE > START_PLATFORM_THRESHOLD);
    }

    #[test]
    fn slots_tile_the_screen() {
        assert_eq!(PLATFORM_SLOTS, 4);
        assert_eq!(PLATFORM_SLOTS as i32 * PLATFORM_WIDTH, SCREEN_WIDTH);
    }

    #[test]
    fn smoothing_is_clamped() {
        assert_eq!(Config::default().with_smoothing(1.5).smoothing, 1.0);
        assert_eq!(Config::default().with_smoothing(-0.2).smoothing, 0.0);
    }

    #[test]
    fn builders_override_defaults() {
        let config = Config::default()
            .with_frame_period(Duration::from_millis(16))
            .with_debounce(Duration::from_millis(80))
            .with_display_origin(Point::zero());
        assert_eq!(config.frame_period, Duration::from_millis(16));
        assert_eq!(config.debounce, Duration::from_millis(80));
        assert_eq!(config.display_origin, Point::zero());
        assert_eq!(config.smoothing, 0.98);
    }
}

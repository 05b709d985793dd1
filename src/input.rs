//! Player input: a smoothed potentiometer for steering and a single
//! push-button whose falling edge is latched from interrupt context.

use core::sync::atomic::{
    AtomicBool,
    Ordering,
};

use embassy_time::{
    Duration,
    Instant,
};

use crate::config::{
    ANALOG_RANGE,
    MAX_SPRITE_X,
};

/// Anything that yields a raw analog reading in `0..ANALOG_RANGE`.
pub trait PositionSensor {
    fn read_raw(&mut self) -> u16;
}

/// Turns raw potentiometer readings into a jitter-free sprite column.
#[derive(Debug, Clone)]
pub struct HorizontalSampler {
    smoothing: f32,
    smoothed: Option<f32>,
}

impl HorizontalSampler {
    pub const fn new(smoothing: f32) -> Self {
        Self {
            smoothing,
            smoothed: None,
        }
    }

    /// Linear map of a raw reading onto `0..MAX_SPRITE_X`.
    pub const fn map_raw(raw: u16) -> i32 {
        let raw = if raw >= ANALOG_RANGE { ANALOG_RANGE - 1 } else { raw };
        raw as i32 * MAX_SPRITE_X / ANALOG_RANGE as i32
    }

    /// Read the sensor and fold it into the moving average.
    pub fn sample_horizontal<S: PositionSensor + ?Sized>(&mut self, sensor: &mut S) -> i32 {
        self.feed(sensor.read_raw())
    }

    /// Fold one raw reading into the moving average and return the new
    /// position. The first reading seeds the average directly.
    pub fn feed(&mut self, raw: u16) -> i32 {
        let target = Self::map_raw(raw) as f32;
        let next = match self.smoothed {
            Some(previous) => self.smoothing * previous + (1.0 - self.smoothing) * target,
            None => target,
        };
        self.smoothed = Some(next);
        self.position()
    }

    /// Current smoothed position, rounded to a whole pixel.
    pub fn position(&self) -> i32 {
        let value = self.smoothed.unwrap_or(0.0);
        ((value + 0.5) as i32).clamp(0, MAX_SPRITE_X)
    }

    #[cfg(test)]
    pub(crate) const fn smoothed(&self) -> Option<f32> {
        self.smoothed
    }
}

/// Pending-press flag shared between the edge interrupt and the frame loop.
///
/// This is the only state touched from two execution contexts.
#[derive(Debug, Default)]
pub struct ButtonLatch {
    pending: AtomicBool,
}

impl ButtonLatch {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Producer side: called on every falling edge.
    pub fn trigger(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Consumer side: reads and clears the flag in one step.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

/// Accepts at most one press per debounce window.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Consume a pending press from `latch`.
    ///
    /// The flag is always cleared; the press only counts if the window has
    /// elapsed since the last accepted one.
    pub fn poll(&mut self, latch: &ButtonLatch, now: Instant) -> bool {
        if !latch.take() {
            return false;
        }
        match self.last_accepted {
            Some(last) if now.saturating_duration_since(last) < self.window => {
                trace!("button bounce ignored");
                false
            }
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    struct Fixed(u16);

    impl PositionSensor for Fixed {
        fn read_raw(&mut self) -> u16 {
            self.0
        }
    }

    #[test]
    fn map_covers_the_playable_range() {
        assert_eq!(HorizontalSampler::map_raw(0), 0);
        assert_eq!(HorizontalSampler::map_raw(512), 27);
        assert_eq!(HorizontalSampler::map_raw(1023), 53);
        // Out-of-range hardware readings saturate instead of overflowing.
        assert_eq!(HorizontalSampler::map_raw(u16::MAX), 53);
    }

    #[test]
    fn first_sample_seeds_the_average() {
        let mut sampler = HorizontalSampler::new(0.98);
        assert_eq!(sampler.sample_horizontal(&mut Fixed(1023)), 53);
    }

    #[test]
    fn moving_average_weights_previous_position() {
        let mut sampler = HorizontalSampler::new(0.98);
        sampler.feed(0);
        sampler.feed(1023);
        assert_relative_eq!(sampler.smoothed().unwrap(), 0.02 * 53.0, epsilon = 1e-4);
        assert_eq!(sampler.position(), 1);
    }

    #[test]
    fn average_converges_to_steady_input() {
        let mut sampler = HorizontalSampler::new(0.98);
        let mut pot = Fixed(0);
        sampler.sample_horizontal(&mut pot);
        pot.0 = 1023;
        for _ in 0..600 {
            sampler.sample_horizontal(&mut pot);
        }
        assert_eq!(sampler.position(), 53);
    }

    #[test]
    fn zero_smoothing_tracks_input() {
        let mut sampler = HorizontalSampler::new(0.0);
        sampler.feed(0);
        assert_eq!(sampler.feed(512), 27);
    }

    #[test]
    fn latch_is_consumed_once() {
        let latch = ButtonLatch::new();
        assert!(!latch.take());
        latch.trigger();
        latch.trigger();
        assert!(latch.is_pending());
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn first_press_is_accepted() {
        let latch = ButtonLatch::new();
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        latch.trigger();
        assert!(debouncer.poll(&latch, Instant::from_millis(3)));
    }

    #[test]
    fn press_inside_window_is_dropped_and_cleared() {
        let latch = ButtonLatch::new();
        let mut debouncer = Debouncer::new(Duration::from_millis(50));

        latch.trigger();
        assert!(debouncer.poll(&latch, Instant::from_millis(100)));

        latch.trigger();
        assert!(!debouncer.poll(&latch, Instant::from_millis(149)));
        assert!(!latch.is_pending());

        latch.trigger();
        assert!(debouncer.poll(&latch, Instant::from_millis(150)));
    }

    #[test]
    fn no_press_means_no_edge() {
        let latch = ButtonLatch::new();
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        assert!(!debouncer.poll(&latch, Instant::from_millis(1000)));
    }
}

//! Piezo tones: what the game asks for, and a square-wave driver that plays
//! it on a plain output pin.

use embassy_futures::select::{
    Either,
    select,
};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    signal::Signal,
};
use embassy_time::{
    Duration,
    Instant,
    Timer,
};
use embedded_hal::digital::OutputPin;

use crate::config::{
    GRAVITY,
    SCREEN_HEIGHT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration: Duration,
}

impl Tone {
    pub const fn new(frequency_hz: u32, duration_ms: u64) -> Self {
        Self {
            frequency_hz,
            duration: Duration::from_millis(duration_ms),
        }
    }

    /// Time between two edges of the square wave.
    pub fn half_period(&self) -> Duration {
        Duration::from_hz(u64::from(self.frequency_hz.max(1)) * 2)
    }
}

/// Rising chirp played on every ascending frame of a bounce.
pub fn jump_tone(jump_height: i32) -> Tone {
    let steps = (jump_height / GRAVITY).max(0) as u32;
    Tone::new(steps * 200 + 1000, 40)
}

/// Falling whistle; drops in pitch as the sprite nears the bottom.
pub fn falling_tone(baseline: i32) -> Tone {
    let height_left = (SCREEN_HEIGHT - baseline).max(0) as u32;
    Tone::new(height_left * 30 + 800, 10)
}

/// One note of a blocking sequence. `pause` is the silence between the end
/// of this note and the start of the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub tone: Tone,
    pub pause: Duration,
}

/// Played once when the sprite drops off the bottom of the screen.
pub const GAME_OVER_JINGLE: [Note; 2] = [
    Note {
        tone: Tone::new(500, 200),
        pause: Duration::from_millis(100),
    },
    Note {
        tone: Tone::new(200, 200),
        pause: Duration::from_millis(0),
    },
];

/// Mailbox between the game loop and the speaker task. Only the most recent
/// request is kept.
pub type ToneSignal = Signal<CriticalSectionRawMutex, Tone>;

/// Square-wave piezo driver.
pub struct Speaker<P> {
    pin: P,
}

impl<P: OutputPin> Speaker<P> {
    pub const fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Play tones from `tones` forever. A new request cuts off the tone that
    /// is currently sounding.
    pub async fn run(&mut self, tones: &ToneSignal) -> ! {
        let mut next = tones.wait().await;
        loop {
            next = match select(self.play(next), tones.wait()).await {
                Either::First(()) => tones.wait().await,
                Either::Second(tone) => tone,
            };
        }
    }

    /// Toggle the pin at the tone's frequency until its duration elapses.
    pub async fn play(&mut self, tone: Tone) {
        let half = tone.half_period();
        let end = Instant::now() + tone.duration;
        while Instant::now() < end {
            self.pin.set_high().ok();
            Timer::after(half).await;
            self.pin.set_low().ok();
            Timer::after(half).await;
        }
        self.pin.set_low().ok();
    }
}

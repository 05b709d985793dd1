//! # jumpr
//!
//! A one-button platform-hopping reflex game for the Disobey 2026 badge.
//!
//! The sprite bounces on its own. Steer it with a potentiometer so that it
//! comes down on the next platform up; climb all five to finish the level.
//! Miss one and it falls off the bottom of the screen.
//!
//! Everything except [`board`] is hardware-independent and runs on the host:
//! - **Input**: smoothed analog steering and a latched, debounced button
//! - **Kinematics**: fixed-step bounce and fall
//! - **Platforms**: per-level layout and retirement
//! - **Collision**: landing tests with a small horizontal tolerance
//! - **Rendering**: 1-bit 64×128 playfield drawn with `embedded-graphics`
//! - **Screens**: start, play and end, as a single [`Jumpr`] value
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let mut jumpr = jumpr::Jumpr::new(jumpr::Config::default(), seed);
//! let mut frame = jumpr::FrameBuffer::new();
//! loop {
//!     let tick = jumpr.tick(Instant::now(), &BUTTON, &mut pot);
//!     frame.clear_buffer();
//!     let Ok(()) = jumpr.render(&mut frame);
//!     frame.flush(&mut display, jumpr.config().display_origin)?;
//!     ticker.next().await;
//! }
//! ```

#![cfg_attr(not(test), no_std)]

// This must go first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

pub mod bitmaps;
#[cfg(feature = "badge")]
pub mod board;
pub mod collision;
pub mod config;
pub mod framebuffer;
pub mod game;
pub mod input;
pub mod kinematics;
pub mod platforms;
pub mod render;
pub mod rng;
pub mod screen;
pub mod sound;

pub use config::Config;
pub use framebuffer::FrameBuffer;
pub use game::{
    FrameOutcome,
    GameState,
};
pub use input::{
    ButtonLatch,
    PositionSensor,
};
pub use screen::{
    Jumpr,
    Screen,
    Tick,
};
pub use sound::Tone;

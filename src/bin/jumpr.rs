//! Jumpr firmware for the Disobey 2026 badge.
//!
//! - Turn the potentiometer to steer the sprite left and right
//! - The sprite bounces on its own; land on the next platform up to climb
//! - Reach the top to start the next level, miss a platform and you fall
//! - Press A to start, and again to retry after a game over

#![no_std]
#![no_main]

use defmt::{
    error,
    info,
};
use embassy_executor::Spawner;
use embassy_time::{
    Duration,
    Instant,
    Ticker,
    Timer,
};
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
};
use esp_backtrace as _;
use esp_hal::{
    gpio::Output,
    timer::timg::TimerGroup,
};
use esp_println as _;
#[allow(clippy::wildcard_imports)]
use jumpr::board::*;
use jumpr::{
    Config,
    FrameBuffer,
    Jumpr,
    mk_static,
    split_resources,
    sound::{
        GAME_OVER_JINGLE,
        Speaker,
        ToneSignal,
    },
};

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

static BUTTON: jumpr::ButtonLatch = jumpr::ButtonLatch::new();
static TONES: ToneSignal = ToneSignal::new();

#[embassy_executor::task]
async fn button_task(mut button: Button) {
    loop {
        button.wait_for_press().await;
        BUTTON.trigger();
    }
}

#[embassy_executor::task]
async fn speaker_task(pin: Output<'static>) {
    let mut speaker = Speaker::new(pin);
    speaker.run(&TONES).await
}

/// Block the frame loop for the whole game-over jingle.
async fn play_jingle() {
    for note in GAME_OVER_JINGLE {
        TONES.signal(note.tone);
        Timer::after(note.tone.duration + note.pause).await;
    }
}

#[embassy_executor::task]
async fn game_task(
    mut display: Option<&'static mut Display<'static>>,
    backlight: &'static mut Backlight,
    mut pot: Potentiometer,
) {
    info!("Jumpr game task started");
    backlight.on();

    let config = Config::default();
    let origin = config.display_origin;
    let mut ticker = Ticker::every(config.frame_period);
    let mut jumpr = Jumpr::new(config, Instant::now().as_ticks() as u32);
    let frame = mk_static!(FrameBuffer, FrameBuffer::new());

    if let Some(display) = display.as_deref_mut() {
        if display.clear(Rgb565::BLACK).is_err() {
            error!("Failed to clear display");
        }
    }

    loop {
        let tick = jumpr.tick(Instant::now(), &BUTTON, &mut pot);
        if let Some(tone) = tick.tone {
            TONES.signal(tone);
        }

        frame.clear_buffer();
        // Drawing into the frame buffer cannot fail.
        let Ok(()) = jumpr.render(frame);
        if let Some(display) = display.as_deref_mut() {
            if frame.flush(display, origin).is_err() {
                error!("Display flush failed");
            }
        }

        if tick.play_game_over {
            play_jingle().await;
            ticker.reset();
        }

        ticker.next().await;
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = jumpr::board::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let display = match init_display(resources.display) {
        Ok(display) => Some(mk_static!(Display<'static>, display)),
        Err(e) => {
            error!("Display init failed: {}", e);
            None
        }
    };
    let backlight = mk_static!(Backlight, resources.backlight.into());

    spawner.must_spawn(button_task(resources.button.into()));
    spawner.must_spawn(speaker_task(resources.speaker.into()));
    spawner.must_spawn(game_task(display, backlight, resources.pot.into()));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}

//! Badge hardware: pin assignment, clocks, the ST7789 panel, the steering
//! potentiometer, the action button and the piezo.
//!
//! ```rust,ignore
//! let peripherals = jumpr::board::init();
//! let resources = split_resources!(peripherals);
//!
//! let display = jumpr::board::init_display(resources.display);
//! let pot: Potentiometer = resources.pot.into();
//! ```

use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    Async,
    analog::adc::{
        Adc,
        AdcConfig,
        AdcPin,
        Attenuation,
    },
    assign_resources,
    clock::{
        Clock,
        CpuClock,
    },
    dma::{
        DmaRxBuf,
        DmaTxBuf,
    },
    dma_buffers,
    gpio::{
        Input,
        InputConfig,
        Level,
        Output,
        OutputConfig,
        Pull,
    },
    peripherals::{
        ADC1,
        GPIO9,
    },
    rom,
    spi::master::Spi,
    time::Rate,
};

use crate::input::PositionSensor;

/// Moves a value into a `static` exactly once, via `StaticCell`.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            dc: GPIO15,
            rst: GPIO7,
            sck: GPIO4,
            cs: GPIO6,
            miso: GPIO16,
            mosi: GPIO5,
            spi: SPI2,
            dma: DMA_CH0,
        },
        backlight: BacklightResources<'d> {
            led: GPIO19,
        },
        // The badge's A button.
        button: ButtonResources<'d> {
            pin: GPIO13,
        },
        // ADC1 channel 8, broken out on the expansion header.
        pot: PotResources<'d> {
            pin: GPIO9,
            adc: ADC1,
        },
        speaker: SpeakerResources<'d> {
            pin: GPIO40,
        },
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// Minimal CPU clock switcher for ESP32-S3.
///
/// Steps through an intermediate frequency before reaching the target,
/// which is required by the hardware.
fn set_cpu_clock(cpu_clock_speed: CpuClock) {
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .sysclk_conf()
        .modify(|_, w| unsafe { w.soc_clk_sel().bits(1) });
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .cpu_per_conf()
        .modify(|_, w| unsafe {
            let _ = w.pll_freq_sel().set_bit();
            w.cpuperiod_sel().bits(match cpu_clock_speed {
                CpuClock::_80MHz => 0,
                CpuClock::_160MHz => 1,
                CpuClock::_240MHz => 2,
                _ => panic!("Unsupported CPU clock speed"),
            })
        });

    rom::ets_update_cpu_frequency_rom(cpu_clock_speed.frequency().as_mhz());
}

/// Bring up clocks and return the raw peripheral set. Call once, first
/// thing in `main`, then break it up with [`split_resources!`].
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    set_cpu_clock(CpuClock::_160MHz);
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

// ── Display ─────────────────────────────────────────────────────────────────

type SpiInterface<'a> = mipidsi::interface::SpiInterface<
    'a,
    ExclusiveDevice<esp_hal::spi::master::SpiDmaBus<'a, Async>, Output<'a>, esp_hal::delay::Delay>,
    Output<'a>,
>;

/// The badge's 320x170 ST7789, landscape.
pub type Display<'a> = mipidsi::Display<SpiInterface<'a>, mipidsi::models::ST7789, Output<'a>>;

/// Which stage of panel bring-up failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    Dma,
    Spi,
    Panel,
}

/// Wire up SPI with DMA and run the ST7789 init sequence.
pub fn init_display(res: DisplayResources<'static>) -> Result<Display<'static>, DisplayError> {
    let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = dma_buffers!(32000);
    let dma_rx_buf = DmaRxBuf::new(rx_descriptors, rx_buffer).map_err(|_| DisplayError::Dma)?;
    let dma_tx_buf = DmaTxBuf::new(tx_descriptors, tx_buffer).map_err(|_| DisplayError::Dma)?;

    let mut delay = esp_hal::delay::Delay::new();

    let dc = Output::new(res.dc, Level::Low, OutputConfig::default());
    let mut rst = Output::new(res.rst, Level::Low, OutputConfig::default());
    rst.set_high();

    let spi = Spi::new(
        res.spi,
        esp_hal::spi::master::Config::default().with_frequency(Rate::from_mhz(80)),
    )
    .map_err(|_| DisplayError::Spi)?
    .with_sck(res.sck)
    .with_mosi(res.mosi)
    .with_miso(res.miso)
    .with_dma(res.dma)
    .with_buffers(dma_rx_buf, dma_tx_buf)
    .into_async();

    let cs = Output::new(res.cs, Level::High, OutputConfig::default());
    let spi_device = ExclusiveDevice::new(spi, cs, delay).map_err(|_| DisplayError::Spi)?;

    let buffer = mk_static!([u8; 32000], [0_u8; 32000]);
    let di = mipidsi::interface::SpiInterface::new(spi_device, dc, buffer);

    mipidsi::Builder::new(mipidsi::models::ST7789, di)
        .reset_pin(rst)
        .display_size(170, 320)
        .invert_colors(mipidsi::options::ColorInversion::Inverted)
        .orientation(mipidsi::options::Orientation::new().rotate(mipidsi::options::Rotation::Deg90))
        .display_offset(35, 0)
        .init(&mut delay)
        .map_err(|_| DisplayError::Panel)
}

/// Panel backlight, switched on at construction.
pub struct Backlight {
    pin: Output<'static>,
}

impl From<BacklightResources<'static>> for Backlight {
    fn from(res: BacklightResources<'static>) -> Self {
        Self {
            pin: Output::new(res.led, Level::High, OutputConfig::default()),
        }
    }
}

impl Backlight {
    pub fn on(&mut self) {
        self.pin.set_high();
    }
}

// ── Inputs ──────────────────────────────────────────────────────────────────

/// Active-low push-button with the internal pull-up enabled.
pub struct Button {
    pin: Input<'static>,
}

impl From<ButtonResources<'static>> for Button {
    fn from(res: ButtonResources<'static>) -> Self {
        Self {
            pin: Input::new(res.pin, InputConfig::default().with_pull(Pull::Up)),
        }
    }
}

impl Button {
    /// Resolves on the next press (falling edge). No debouncing here; that
    /// is left to whoever consumes the edges.
    pub async fn wait_for_press(&mut self) {
        self.pin.wait_for_falling_edge().await;
    }
}

/// Steering knob on ADC1, read one-shot.
pub struct Potentiometer {
    adc: Adc<'static, ADC1<'static>, esp_hal::Blocking>,
    pin: AdcPin<GPIO9<'static>, ADC1<'static>>,
}

impl From<PotResources<'static>> for Potentiometer {
    fn from(res: PotResources<'static>) -> Self {
        let mut config = AdcConfig::new();
        let pin = config.enable_pin(res.pin, Attenuation::_11dB);
        Self {
            adc: Adc::new(res.adc, config),
            pin,
        }
    }
}

impl PositionSensor for Potentiometer {
    /// 12-bit conversion scaled down to `0..1024`.
    fn read_raw(&mut self) -> u16 {
        loop {
            if let Ok(value) = self.adc.read_oneshot(&mut self.pin) {
                return value >> 2;
            }
            core::hint::spin_loop();
        }
    }
}

// ── Outputs ─────────────────────────────────────────────────────────────────

/// Piezo drive pin, idle low.
impl From<SpeakerResources<'static>> for Output<'static> {
    fn from(res: SpeakerResources<'static>) -> Self {
        Output::new(res.pin, Level::Low, OutputConfig::default())
    }
}

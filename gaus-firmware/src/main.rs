//! Gaus - climate station firmware
//!
//! Brings up the DHT sensor and the mini TFT wing on an RP2040 feather and
//! polls both, logging readings and button presses over RTT.
//!
//! Wiring (Feather RP2040):
//! - DHT data: GPIO4
//! - STEMMA QT I2C1: SDA GPIO2, SCL GPIO3

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::Flex;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::{Delay, Duration, Ticker, Timer};
use {defmt_rtt as _, panic_probe as _};

use gaus_core::config::BoardConfig;
use gaus_core::traits::{ClimateSensor, TemperatureScale};
use gaus_drivers::expander::Buttons;
use gaus_drivers::{Dht, MiniTftWing, SeesawError};
use gaus_hal::{HalI2c, I2cConfig};
use gaus_hal_rp2040::{EmbassyClock, RpFlexPin, RpI2c};

/// GPIO the DHT data line is soldered to
const DHT_GPIO: u8 = 4;

type Wing = MiniTftWing<RpI2c<'static, I2C1>, Delay>;

/// Hold time for the display reset pulse
const TFT_RESET_MS: u64 = 10;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Gaus firmware starting...");

    let p = embassy_rp::init(Default::default());
    let board = BoardConfig::default();
    if let Err(field) = board.validate() {
        error!("Invalid board config: {}", field);
        return;
    }
    if board.dht_pin != DHT_GPIO {
        warn!(
            "Board config expects DHT on GPIO{}, firmware is wired for GPIO{}",
            board.dht_pin, DHT_GPIO
        );
    }

    // DHT sensor
    let dht_pin = RpFlexPin::new(Flex::new(p.PIN_4));
    let mut dht = Dht::new(dht_pin, EmbassyClock, Delay, board.dht);
    info!("DHT initialized ({})", board.dht.kind);

    // Mini TFT wing on the STEMMA QT port
    let i2c_settings = I2cConfig {
        frequency: board.i2c_frequency_hz,
    };
    let i2c_bus = I2c::new_blocking(
        p.I2C1,
        p.PIN_3,
        p.PIN_2,
        gaus_hal_rp2040::i2c::config(&i2c_settings),
    );
    let mut wing: Wing = MiniTftWing::new(HalI2c::new(i2c_bus), Delay, board.seesaw);

    let wing_ready = match wing.begin() {
        Ok(()) => true,
        Err(e) => {
            error!("Mini TFT wing init failed: {}", e);
            false
        }
    };

    if wing_ready {
        if let Err(e) = bring_up_display(&mut wing).await {
            warn!("Display bring-up failed: {}", e);
        }
    }

    let mut ticker = Ticker::every(Duration::from_millis(board.poll_interval_ms as u64));
    loop {
        let reading = dht.reading(false);
        if reading.valid {
            info!(
                "Temperature {} C / {} F, humidity {} %",
                reading.temperature(TemperatureScale::Celsius),
                reading.temperature(TemperatureScale::Fahrenheit),
                reading.humidity()
            );
        } else {
            warn!("DHT read failed: {}", dht.last_error());
        }

        if wing_ready {
            match wing.read_buttons() {
                Ok(buttons) if !buttons.is_idle() => log_buttons(buttons),
                Ok(_) => {}
                Err(e) => warn!("Button read failed: {}", e),
            }
        }

        ticker.next().await;
    }
}

/// Pulse the display reset line, then light the backlight
async fn bring_up_display(wing: &mut Wing) -> Result<(), SeesawError<i2c::Error>> {
    wing.tft_reset(false)?;
    Timer::after_millis(TFT_RESET_MS).await;
    wing.tft_reset(true)?;
    wing.set_backlight(u16::MAX)
}

fn log_buttons(buttons: Buttons) {
    const NAMES: [(u32, &str); 7] = [
        (Buttons::UP, "up"),
        (Buttons::DOWN, "down"),
        (Buttons::LEFT, "left"),
        (Buttons::RIGHT, "right"),
        (Buttons::A, "A"),
        (Buttons::B, "B"),
        (Buttons::SELECT, "select"),
    ];
    for (mask, name) in NAMES {
        if buttons.is_pressed(mask) {
            info!("Button {} pressed", name);
        }
    }
}

//! Nunchuk - accessory polling firmware
//!
//! Main firmware binary for RP2040 boards with a Nunchuk-style accessory
//! on I2C0 (SCL = GPIO5, SDA = GPIO4) behind a level shifter enabled by
//! GPIO6.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use {defmt_rtt as _, panic_probe as _};

use nunchuk_drivers::LevelShifter;
use nunchuk_hal::I2cConfig;

mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Nunchuk firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let session_config = config::SESSION_CONFIG;
    if let Err(e) = session_config.validate() {
        // build.rs rejects these, so this only trips on a stale build
        defmt::panic!("Invalid session configuration: {}", e);
    }

    let shifter = match LevelShifter::enable(Output::new(p.PIN_6, Level::Low)) {
        Ok(shifter) => shifter,
        Err(e) => match e {},
    };

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::from(session_config.clock).frequency;
    info!(
        "I2C0 at {} Hz, accessory at {=u8:#04x}",
        i2c_config.frequency, session_config.address
    );
    let bus = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    spawner
        .spawn(tasks::poll_task(bus, shifter, session_config))
        .unwrap();

    info!("All tasks spawned");
}

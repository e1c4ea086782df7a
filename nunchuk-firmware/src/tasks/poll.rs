//! Accessory polling task
//!
//! Polls the accessory once per cycle interval, smooths the acceleration
//! with a running mean and logs button edges and periodic readings.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Duration, Instant, Ticker};

use nunchuk_core::{ErrorKind, Reading, RunningMean, SessionConfig};
use nunchuk_drivers::diag::DefmtDiagnostics;
use nunchuk_drivers::{DeviceSession, EmbeddedHalWire, LevelShifter, ReadOutcome};
use nunchuk_hal::Clock;

/// Samples in the acceleration smoothing window
pub const SMOOTHING_WINDOW: usize = 8;

/// Updated readings between two log lines
const REPORT_EVERY: u32 = 32;

type Bus = EmbeddedHalWire<I2c<'static, I2C0, Blocking>>;
type Session = DeviceSession<Bus, EmbassyClock, Delay, DefmtDiagnostics>;

/// Millisecond clock backed by the embassy time driver
#[derive(Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Wraps after ~49 days
        Instant::now().as_millis() as u32
    }
}

/// Running means of the three acceleration axes
#[derive(Default)]
struct Smoothing {
    x: RunningMean<i16, SMOOTHING_WINDOW>,
    y: RunningMean<i16, SMOOTHING_WINDOW>,
    z: RunningMean<i16, SMOOTHING_WINDOW>,
}

impl Smoothing {
    fn shift(&mut self, reading: &Reading) {
        self.x.shift(reading.accel_x);
        self.y.shift(reading.accel_y);
        self.z.shift(reading.accel_z);
    }

    fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
        self.z.reset();
    }
}

/// Poll task - owns the bus and the level shifter
#[embassy_executor::task]
pub async fn poll_task(
    i2c: I2c<'static, I2C0, Blocking>,
    shifter: LevelShifter<Output<'static>>,
    config: SessionConfig,
) {
    info!("Poll task started");

    // Shifter stays enabled while the task runs
    let _shifter = shifter;

    let mut session = DeviceSession::with_diagnostics(
        EmbeddedHalWire::new(i2c),
        EmbassyClock,
        Delay,
        config,
        DefmtDiagnostics,
    );

    session.on_pressed_c(Some(c_pressed));
    session.on_released_c(Some(c_released));
    session.on_pressed_z(Some(z_pressed));
    session.on_released_z(Some(z_released));

    match session.connect() {
        Ok(()) => setup(&mut session),
        Err(kind) => warn!("Initial connect failed: {}", kind),
    }

    let mut ticker = Ticker::every(Duration::from_millis(config.cycle_interval_ms as u64));
    let mut smoothing = Smoothing::default();
    let mut was_connected = session.is_connected();
    let mut updates: u32 = 0;

    loop {
        ticker.next().await;

        match session.read() {
            Ok(ReadOutcome::Updated) => {
                if !was_connected {
                    info!("Accessory connected");
                    setup(&mut session);
                    smoothing.reset();
                }
                // A failed identify or calibration fetch drops the session
                was_connected = session.is_connected();

                if let Ok(reading) = session.reading() {
                    smoothing.shift(&reading);
                    updates = updates.wrapping_add(1);
                    if updates % REPORT_EVERY == 0 {
                        report(&reading, &smoothing);
                    }
                }
            }
            Ok(ReadOutcome::Throttled) => {}
            Err(kind) => {
                if was_connected {
                    warn!("Accessory lost: {}", kind);
                }
                was_connected = false;
            }
        }
    }
}

/// Identify the accessory and load its factory calibration
///
/// Falls back to the configured neutral points if the block is unreadable.
fn setup(session: &mut Session) {
    match session.identify() {
        Ok(id) if id.is_nunchuk() => info!("Nunchuk identified: {:02x}", id.0),
        Ok(id) => warn!("Unexpected device id: {:02x}", id.0),
        Err(kind) => warn!("Identify failed: {}", kind),
    }

    match session.read_calibration() {
        Ok(calibration) => {
            info!("Factory calibration: {}", calibration);
            session.set_calibration(calibration);
        }
        Err(ErrorKind::BadValue) => warn!("Calibration checksum mismatch, keeping configured values"),
        Err(kind) => warn!("Calibration read failed: {}", kind),
    }
}

fn c_pressed() {
    info!("Button C pressed");
}

fn c_released() {
    info!("Button C released");
}

fn z_pressed() {
    info!("Button Z pressed");
}

fn z_released() {
    info!("Button Z released");
}

fn report(reading: &Reading, smoothing: &Smoothing) {
    info!(
        "joy=({}, {}) acc=({}, {}, {}) avg=({}, {}, {}) c={} z={}",
        reading.joystick_x,
        reading.joystick_y,
        reading.accel_x,
        reading.accel_y,
        reading.accel_z,
        smoothing.x.mean(),
        smoothing.y.mean(),
        smoothing.z.mean(),
        reading.button_c,
        reading.button_z,
    );
}

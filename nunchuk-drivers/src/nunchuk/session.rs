//! Device session
//!
//! Owns the bus, the last raw register image and both button debouncers.
//! Transaction failures are absorbed and classified here; callers get the
//! resulting [`ErrorKind`] back and never see a panic.
//!
//! The cached image is only handed out while the session is `Connected` and
//! at least one full read has completed since the last (re)connect. A failed
//! or short read never touches it.

use embedded_hal::delay::DelayNs;
use nunchuk_core::config::{Calibration, SessionConfig};
use nunchuk_core::diag::{Diagnostic, Diagnostics, NoDiagnostics};
use nunchuk_core::input::DebounceSwitch;
use nunchuk_core::registers::{
    self, init, reg, DeviceId, RawRegisterImage, Reading, CAL_DATA_LEN, ID_LEN, RAW_DATA_LEN,
};
use nunchuk_core::state::{ErrorKind, Event, SessionState};
use nunchuk_hal::{Clock, CompletionCode, WireBus};

/// Pause before and between the initialization writes
pub const INIT_DELAY_MS: u32 = 1;

/// Pause between setting the register pointer and reading
pub const CONVERSION_DELAY_US: u32 = 200;

/// Result of a successful [`DeviceSession::read`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadOutcome {
    /// A new image was fetched and the buttons were polled
    Updated,
    /// Cycle interval not elapsed; nothing was sent
    Throttled,
}

/// Map a completion code onto the error taxonomy
pub fn classify(code: CompletionCode) -> Result<(), ErrorKind> {
    match code {
        CompletionCode::Success => Ok(()),
        CompletionCode::DataTooLong
        | CompletionCode::NackOnAddress
        | CompletionCode::NackOnData => Err(ErrorKind::BadValue),
        CompletionCode::Other => Err(ErrorKind::BusFault),
        CompletionCode::Timeout => Err(ErrorKind::Timeout),
    }
}

/// One accessory on one bus
pub struct DeviceSession<B, C, D, L = NoDiagnostics> {
    bus: B,
    clock: C,
    delay: D,
    diagnostics: L,
    config: SessionConfig,
    state: SessionState,
    raw: RawRegisterImage,
    /// A full image arrived since the last transition into `Connected`
    fresh: bool,
    /// Start of the last read that reached the bus
    last_poll_ms: Option<u32>,
    button_c: DebounceSwitch,
    button_z: DebounceSwitch,
}

impl<B, C, D> DeviceSession<B, C, D, NoDiagnostics>
where
    B: WireBus,
    C: Clock,
    D: DelayNs,
{
    /// Create a disconnected session without diagnostics
    ///
    /// Nothing is sent until [`connect`](Self::connect) or
    /// [`read`](Self::read) is called.
    pub fn new(bus: B, clock: C, delay: D, config: SessionConfig) -> Self {
        Self::with_diagnostics(bus, clock, delay, config, NoDiagnostics)
    }
}

impl<B, C, D, L> DeviceSession<B, C, D, L>
where
    B: WireBus,
    C: Clock,
    D: DelayNs,
    L: Diagnostics,
{
    /// Create a disconnected session reporting to `diagnostics`
    pub fn with_diagnostics(
        bus: B,
        clock: C,
        delay: D,
        config: SessionConfig,
        diagnostics: L,
    ) -> Self {
        Self {
            bus,
            clock,
            delay,
            diagnostics,
            config,
            state: SessionState::Disconnected,
            raw: RawRegisterImage::ZERO,
            fresh: false,
            last_poll_ms: None,
            button_c: DebounceSwitch::new(config.button_c_window_ms),
            button_z: DebounceSwitch::new(config.button_z_window_ms),
        }
    }

    /// Run the initialization sequence
    ///
    /// Disables the output encryption of the accessory. On success the
    /// session is `Connected` and any previous error is cleared; on failure
    /// it moves to the matching error state and the cached image is left
    /// as it was.
    pub fn connect(&mut self) -> Result<(), ErrorKind> {
        self.report(Diagnostic::ConnectStarted);

        let steps = [
            (1, [reg::INIT_1, init::INIT_1_VALUE]),
            (2, [reg::INIT_2, init::INIT_2_VALUE]),
        ];

        for (step, bytes) in steps {
            self.delay.delay_ms(INIT_DELAY_MS);

            let code = self.bus.transmit(self.config.address, &bytes);
            if let Err(kind) = classify(code) {
                self.report(Diagnostic::InitFailed { step, code });
                self.apply(Event::TransactionFailed(kind));
                return Err(kind);
            }
        }

        self.apply(Event::InitAcknowledged);
        self.fresh = false;
        self.report(Diagnostic::Connected);
        Ok(())
    }

    /// Poll the accessory
    ///
    /// Does nothing if less than the cycle interval has passed since the
    /// last read that reached the bus. Otherwise reconnects if needed (up
    /// to `connect_attempts` times), fetches a full image and feeds both
    /// button bits to the debouncers.
    ///
    /// A throttled call reports the current state: `Ok(Throttled)` while
    /// connected, the current error otherwise.
    pub fn read(&mut self) -> Result<ReadOutcome, ErrorKind> {
        let now = self.clock.now_ms();

        if let Some(last) = self.last_poll_ms {
            if now.wrapping_sub(last) < self.config.cycle_interval_ms {
                return self.state.as_result().map(|()| ReadOutcome::Throttled);
            }
        }
        self.last_poll_ms = Some(now);

        if !self.state.is_connected() {
            self.reconnect()?;
        }

        let bytes = self.fetch::<RAW_DATA_LEN>(reg::RAW_DATA)?;

        // Single assignment: the decoder never sees a partial image
        self.raw = RawRegisterImage(bytes);
        self.fresh = true;
        self.apply(Event::DataReceived);
        self.report(Diagnostic::RawData(self.raw));

        self.button_c.poll(registers::button_c(&self.raw), now);
        self.button_z.poll(registers::button_z(&self.raw), now);

        Ok(ReadOutcome::Updated)
    }

    /// Read the identification block
    ///
    /// Requires a live session.
    pub fn identify(&mut self) -> Result<DeviceId, ErrorKind> {
        if !self.state.is_connected() {
            return Err(ErrorKind::NotConnected);
        }

        let id = DeviceId(self.fetch::<ID_LEN>(reg::ID)?);
        self.report(Diagnostic::Identified(id));
        Ok(id)
    }

    /// Read and parse the factory calibration block
    ///
    /// The result is not applied; pass it to
    /// [`set_calibration`](Self::set_calibration) to use it.
    pub fn read_calibration(&mut self) -> Result<Calibration, ErrorKind> {
        if !self.state.is_connected() {
            return Err(ErrorKind::NotConnected);
        }

        let block = self.fetch::<CAL_DATA_LEN>(reg::CAL_DATA)?;
        Calibration::from_block(&block).inspect_err(|_| {
            self.report(Diagnostic::CalibrationRejected);
        })
    }

    /// Replace the neutral points used by [`reading`](Self::reading)
    pub fn set_calibration(&mut self, calibration: Calibration) {
        self.config.calibration = calibration;
    }

    /// Neutral points in use
    pub fn calibration(&self) -> &Calibration {
        &self.config.calibration
    }

    /// Mark the session as disconnected
    ///
    /// The next read reconnects.
    pub fn disconnect(&mut self) {
        self.apply(Event::Disconnect);
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if the session is `Connected`
    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// The cached image, if it can be trusted
    ///
    /// Returns `NoDataAvailable` while disconnected, in an error state, or
    /// before the first full read after connecting.
    pub fn raw(&self) -> Result<&RawRegisterImage, ErrorKind> {
        if self.state.is_connected() && self.fresh {
            Ok(&self.raw)
        } else {
            Err(ErrorKind::NoDataAvailable)
        }
    }

    /// The last good image regardless of session state (may be stale)
    pub fn last_raw(&self) -> &RawRegisterImage {
        &self.raw
    }

    /// Decode the cached image with the configured calibration
    pub fn reading(&self) -> Result<Reading, ErrorKind> {
        self.raw()
            .map(|raw| Reading::decode(raw, &self.config.calibration))
    }

    /// Debounced state of button C
    pub fn pressed_c(&self) -> bool {
        self.button_c.is_pressed()
    }

    /// Debounced state of button Z
    pub fn pressed_z(&self) -> bool {
        self.button_z.is_pressed()
    }

    /// Debouncer of button C
    pub fn button_c(&self) -> &DebounceSwitch {
        &self.button_c
    }

    /// Debouncer of button Z
    pub fn button_z(&self) -> &DebounceSwitch {
        &self.button_z
    }

    /// Callback on confirmed press of C; `None` deregisters
    pub fn on_pressed_c(&mut self, callback: Option<fn()>) {
        self.button_c.on_pressed(callback);
    }

    /// Callback on confirmed press of Z; `None` deregisters
    pub fn on_pressed_z(&mut self, callback: Option<fn()>) {
        self.button_z.on_pressed(callback);
    }

    /// Callback on confirmed release of C; `None` deregisters
    pub fn on_released_c(&mut self, callback: Option<fn()>) {
        self.button_c.on_released(callback);
    }

    /// Callback on confirmed release of Z; `None` deregisters
    pub fn on_released_z(&mut self, callback: Option<fn()>) {
        self.button_z.on_released(callback);
    }

    /// Active configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Give back the bus
    pub fn release(self) -> B {
        self.bus
    }

    /// Try to connect up to `connect_attempts` times
    fn reconnect(&mut self) -> Result<(), ErrorKind> {
        let attempts = self.config.connect_attempts.max(1);

        for attempt in 1..=attempts {
            self.report(Diagnostic::ReconnectAttempt {
                attempt,
                of: attempts,
            });
            if self.connect().is_ok() {
                return Ok(());
            }
        }

        self.report(Diagnostic::ReconnectFailed { attempts });
        self.apply(Event::RetriesExhausted);
        Err(ErrorKind::NotConnected)
    }

    /// Point the device at `register` and read `N` bytes
    ///
    /// Anything short of `N` bytes is a transport failure.
    fn fetch<const N: usize>(&mut self, register: u8) -> Result<[u8; N], ErrorKind> {
        let address = self.config.address;

        let code = self.bus.transmit(address, &[register]);
        if let Err(kind) = classify(code) {
            self.report(Diagnostic::RequestFailed { register, code });
            self.apply(Event::TransactionFailed(kind));
            return Err(kind);
        }

        self.delay.delay_us(CONVERSION_DELAY_US);

        let received = self.bus.request_from(address, N);
        let mut buf = [0u8; N];
        let mut filled = 0;

        if received >= N {
            for slot in buf.iter_mut() {
                match self.bus.read() {
                    Some(byte) => {
                        *slot = byte;
                        filled += 1;
                    }
                    None => break,
                }
            }
        }

        // Drop leftovers so the next request starts clean
        for _ in 0..self.bus.available() {
            let _ = self.bus.read();
        }

        if filled < N {
            self.report(Diagnostic::ShortRead {
                register,
                expected: N as u8,
                received: received.min(u8::MAX as usize) as u8,
            });
            self.apply(Event::ShortRead);
            return Err(ErrorKind::NotConnected);
        }

        Ok(buf)
    }

    fn apply(&mut self, event: Event) {
        self.state = self.state.transition(event);
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        let severity = diagnostic.severity();
        if self.config.verbosity.allows(severity) {
            self.diagnostics.emit(severity, &diagnostic);
        }
    }
}

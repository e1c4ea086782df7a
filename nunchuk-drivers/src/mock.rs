//! Scripted bus, clock and diagnostics doubles for driver tests

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use nunchuk_core::diag::{Diagnostic, Diagnostics, Severity};
use nunchuk_hal::{Clock, CompletionCode, WireBus};

/// Everything the fake bus saw, plus its script
#[derive(Default)]
pub struct BusScript {
    /// Completed write transmissions (address, bytes)
    pub transmissions: Vec<(u8, Vec<u8>)>,
    /// Requests (address, count)
    pub requests: Vec<(u8, usize)>,
    /// Codes returned by successive `end_transmission` calls (default Success)
    pub codes: VecDeque<CompletionCode>,
    /// Bytes returned by successive requests (default: nothing)
    pub responses: VecDeque<Vec<u8>>,
    open: Option<(u8, Vec<u8>)>,
    rx: VecDeque<u8>,
}

/// Fake bus sharing its script with the test
#[derive(Clone, Default)]
pub struct MockBus(pub Rc<RefCell<BusScript>>);

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_code(&self, code: CompletionCode) {
        self.0.borrow_mut().codes.push_back(code);
    }

    pub fn push_response(&self, bytes: &[u8]) {
        self.0.borrow_mut().responses.push_back(bytes.to_vec());
    }

    pub fn transmissions(&self) -> Vec<(u8, Vec<u8>)> {
        self.0.borrow().transmissions.clone()
    }

    pub fn request_count(&self) -> usize {
        self.0.borrow().requests.len()
    }
}

impl WireBus for MockBus {
    fn begin_transmission(&mut self, address: u8) {
        self.0.borrow_mut().open = Some((address, Vec::new()));
    }

    fn write(&mut self, byte: u8) -> bool {
        match self.0.borrow_mut().open.as_mut() {
            Some((_, bytes)) => {
                bytes.push(byte);
                true
            }
            None => false,
        }
    }

    fn end_transmission(&mut self, _send_stop: bool) -> CompletionCode {
        let mut script = self.0.borrow_mut();
        if let Some(done) = script.open.take() {
            script.transmissions.push(done);
        }
        script.codes.pop_front().unwrap_or(CompletionCode::Success)
    }

    fn request_from(&mut self, address: u8, count: usize) -> usize {
        let mut script = self.0.borrow_mut();
        script.requests.push((address, count));
        let mut bytes = script.responses.pop_front().unwrap_or_default();
        bytes.truncate(count);
        script.rx = bytes.into_iter().collect();
        script.rx.len()
    }

    fn available(&self) -> usize {
        self.0.borrow().rx.len()
    }

    fn read(&mut self) -> Option<u8> {
        self.0.borrow_mut().rx.pop_front()
    }
}

/// Manually advanced millisecond clock
#[derive(Clone, Default)]
pub struct ManualClock(pub Rc<Cell<u32>>);

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

/// Delay that returns immediately
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Sink that keeps every message
#[derive(Clone, Default)]
pub struct Recorder(pub Rc<RefCell<Vec<(Severity, Diagnostic)>>>);

impl Recorder {
    pub fn messages(&self) -> Vec<Diagnostic> {
        self.0.borrow().iter().map(|(_, d)| *d).collect()
    }
}

impl Diagnostics for Recorder {
    fn emit(&mut self, severity: Severity, diagnostic: &Diagnostic) {
        self.0.borrow_mut().push((severity, *diagnostic));
    }
}

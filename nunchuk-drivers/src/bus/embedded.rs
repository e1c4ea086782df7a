//! `WireBus` over an `embedded-hal` I2C master
//!
//! Buffers queued writes until the transmission is closed and stores the
//! bytes of the last request for byte-wise draining. A write closed without
//! a stop condition is held back and sent together with the next request as
//! one write-read (repeated start).

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};
use heapless::Vec;
use nunchuk_hal::{CompletionCode, WireBus};

/// Transmit and receive buffer size in bytes
pub const BUFFER_LEN: usize = 32;

/// Adapter from `embedded_hal::i2c::I2c` to [`WireBus`]
pub struct EmbeddedHalWire<I2C> {
    i2c: I2C,
    /// Target of the open transmission
    address: u8,
    tx: Vec<u8, BUFFER_LEN>,
    /// A byte did not fit the transmit buffer
    overflow: bool,
    /// Address of a write held back for a repeated start
    pending: Option<u8>,
    rx: Vec<u8, BUFFER_LEN>,
    /// Next unread position in `rx`
    cursor: usize,
}

impl<I2C: I2c> EmbeddedHalWire<I2C> {
    /// Wrap an I2C master
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: 0,
            tx: Vec::new(),
            overflow: false,
            pending: None,
            rx: Vec::new(),
            cursor: 0,
        }
    }

    /// Give back the I2C master
    pub fn release(self) -> I2C {
        self.i2c
    }
}

/// Map an `embedded-hal` error kind onto a completion code
pub fn completion_code(kind: ErrorKind) -> CompletionCode {
    match kind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => CompletionCode::NackOnAddress,
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => CompletionCode::NackOnData,
        _ => CompletionCode::Other,
    }
}

impl<I2C: I2c> WireBus for EmbeddedHalWire<I2C> {
    fn begin_transmission(&mut self, address: u8) {
        self.address = address;
        self.tx.clear();
        self.overflow = false;
        self.pending = None;
    }

    fn write(&mut self, byte: u8) -> bool {
        if self.tx.push(byte).is_err() {
            self.overflow = true;
            return false;
        }
        true
    }

    fn end_transmission(&mut self, send_stop: bool) -> CompletionCode {
        if self.overflow {
            return CompletionCode::DataTooLong;
        }

        if !send_stop {
            self.pending = Some(self.address);
            return CompletionCode::Success;
        }

        match self.i2c.write(self.address, &self.tx) {
            Ok(()) => CompletionCode::Success,
            Err(e) => completion_code(e.kind()),
        }
    }

    fn request_from(&mut self, address: u8, count: usize) -> usize {
        let count = count.min(BUFFER_LEN);
        self.rx.clear();
        self.cursor = 0;
        if self.rx.resize(count, 0).is_err() {
            return 0;
        }

        let result = match self.pending.take() {
            Some(held) if held == address => {
                self.i2c.write_read(address, &self.tx, &mut self.rx[..])
            }
            _ => self.i2c.read(address, &mut self.rx[..]),
        };

        match result {
            Ok(()) => count,
            Err(_) => {
                self.rx.clear();
                0
            }
        }
    }

    fn available(&self) -> usize {
        self.rx.len() - self.cursor
    }

    fn read(&mut self) -> Option<u8> {
        let byte = self.rx.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = 0x52;

    #[test]
    fn test_transmit_writes_once() {
        let expectations = [I2cTransaction::write(ADDR, vec![0xF0, 0x55])];
        let mut wire = EmbeddedHalWire::new(I2cMock::new(&expectations));

        assert_eq!(wire.transmit(ADDR, &[0xF0, 0x55]), CompletionCode::Success);

        wire.release().done();
    }

    #[test]
    fn test_nack_mapping() {
        let expectations = [
            I2cTransaction::write(ADDR, vec![0xFB, 0x00])
                .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
            I2cTransaction::write(ADDR, vec![0xFB, 0x00])
                .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)),
            I2cTransaction::write(ADDR, vec![0xFB, 0x00]).with_error(ErrorKind::Bus),
        ];
        let mut wire = EmbeddedHalWire::new(I2cMock::new(&expectations));

        assert_eq!(wire.transmit(ADDR, &[0xFB, 0x00]), CompletionCode::NackOnAddress);
        assert_eq!(wire.transmit(ADDR, &[0xFB, 0x00]), CompletionCode::NackOnData);
        assert_eq!(wire.transmit(ADDR, &[0xFB, 0x00]), CompletionCode::Other);

        wire.release().done();
    }

    #[test]
    fn test_overflow_is_data_too_long() {
        let expectations: [I2cTransaction; 0] = [];
        let mut wire = EmbeddedHalWire::new(I2cMock::new(&expectations));

        wire.begin_transmission(ADDR);
        for _ in 0..BUFFER_LEN {
            assert!(wire.write(0xAA));
        }
        assert!(!wire.write(0xAA));
        assert_eq!(wire.end_transmission(true), CompletionCode::DataTooLong);

        wire.release().done();
    }

    #[test]
    fn test_request_and_drain() {
        let expectations = [I2cTransaction::read(ADDR, vec![1, 2, 3])];
        let mut wire = EmbeddedHalWire::new(I2cMock::new(&expectations));

        assert_eq!(wire.request_from(ADDR, 3), 3);
        assert_eq!(wire.available(), 3);
        assert_eq!(wire.read(), Some(1));
        assert_eq!(wire.read(), Some(2));
        assert_eq!(wire.available(), 1);
        assert_eq!(wire.read(), Some(3));
        assert_eq!(wire.read(), None);

        wire.release().done();
    }

    #[test]
    fn test_failed_request_reports_zero() {
        let expectations = [I2cTransaction::read(ADDR, vec![0; 6]).with_error(ErrorKind::Other)];
        let mut wire = EmbeddedHalWire::new(I2cMock::new(&expectations));

        assert_eq!(wire.request_from(ADDR, 6), 0);
        assert_eq!(wire.available(), 0);
        assert_eq!(wire.read(), None);

        wire.release().done();
    }

    #[test]
    fn test_repeated_start_uses_write_read() {
        let expectations = [I2cTransaction::write_read(ADDR, vec![0xFA], vec![0, 0, 0xA4, 0x20, 0, 0])];
        let mut wire = EmbeddedHalWire::new(I2cMock::new(&expectations));

        wire.begin_transmission(ADDR);
        wire.write(0xFA);
        assert_eq!(wire.end_transmission(false), CompletionCode::Success);
        assert_eq!(wire.request_from(ADDR, 6), 6);
        assert_eq!(wire.available(), 6);

        wire.release().done();
    }
}

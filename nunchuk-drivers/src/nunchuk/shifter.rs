//! Bus level shifter enable line
//!
//! Boards that run the accessory at a different voltage put a level shifter
//! between it and the controller. The shifter is enabled for as long as the
//! handle lives and disabled again on drop.

use embedded_hal::digital::OutputPin;

/// Owned enable line of a bus level shifter
pub struct LevelShifter<P: OutputPin> {
    pin: P,
    enabled: bool,
}

impl<P: OutputPin> LevelShifter<P> {
    /// Take the pin and drive it high
    pub fn enable(mut pin: P) -> Result<Self, P::Error> {
        pin.set_high()?;
        Ok(Self { pin, enabled: true })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Drive the enable line low, keeping ownership
    pub fn disable(&mut self) -> Result<(), P::Error> {
        if self.enabled {
            self.pin.set_low()?;
            self.enabled = false;
        }
        Ok(())
    }
}

impl<P: OutputPin> Drop for LevelShifter<P> {
    fn drop(&mut self) {
        let _ = self.disable();
    }
}

use core::fmt::Debug;
use core::ops::Not;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Logic level of a digital pin.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

/// Any positive value is high, everything else is low.
impl From<i32> for Level {
    fn from(level: i32) -> Self {
        Level::from(level > 0)
    }
}

/// Direction of a digital pin.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

/// Pin-numbered GPIO capability supplied by the host platform.
///
/// Timing comes separately from a [`DelayNs`](embedded_hal::delay::DelayNs)
/// provider, so implementations only deal with pin state.
pub trait Gpio {
    /// Associated error type for platform or pin faults.
    type Error: Debug;

    /// One-time platform setup. Must succeed before any other call.
    fn setup(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Switches `pin` between input and output.
    fn set_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error>;

    /// Drives `pin` to `level`.
    fn write(&mut self, pin: u8, level: Level) -> Result<(), Self::Error>;

    /// Samples the current level of `pin`.
    fn read(&mut self, pin: u8) -> Result<Level, Self::Error>;
}

/// Errors from a [`PinBank`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BankError<E> {
    /// No pin with this number is registered in the bank.
    #[error("unknown pin {0}")]
    UnknownPin(u8),
    /// Error from the underlying pin.
    #[error("pin error: {0:?}")]
    Pin(E),
}

impl<E> From<E> for BankError<E> {
    fn from(value: E) -> Self {
        Self::Pin(value)
    }
}

/// Maps pin numbers onto a fixed set of `embedded-hal` pins.
///
/// The pins are expected to be open-drain with a pull-up, so a single pin
/// object can both drive and sense the line. Such a pin has no separate input
/// mode: driving it high releases the line, and `set_mode` only checks that the
/// pin number exists.
pub struct PinBank<P, const N: usize> {
    pins: [(u8, P); N],
}

impl<P, const N: usize> PinBank<P, N>
where
    P: InputPin + OutputPin,
{
    /// Creates a bank from `(pin number, pin)` pairs.
    pub fn new(pins: [(u8, P); N]) -> Self {
        PinBank { pins }
    }

    /// Gives back the pins.
    pub fn release(self) -> [(u8, P); N] {
        self.pins
    }

    /// Looks up the pin registered under `pin`.
    fn pin_mut(&mut self, pin: u8) -> Result<&mut P, BankError<<P as ErrorType>::Error>> {
        self.pins
            .iter_mut()
            .find(|(number, _)| *number == pin)
            .map(|(_, p)| p)
            .ok_or(BankError::UnknownPin(pin))
    }
}

impl<P, const N: usize> Gpio for PinBank<P, N>
where
    P: InputPin + OutputPin,
{
    type Error = BankError<<P as ErrorType>::Error>;

    fn set_mode(&mut self, pin: u8, _mode: PinMode) -> Result<(), Self::Error> {
        self.pin_mut(pin).map(|_| ())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), Self::Error> {
        let p = self.pin_mut(pin)?;
        match level {
            Level::High => p.set_high()?,
            Level::Low => p.set_low()?,
        }
        Ok(())
    }

    fn read(&mut self, pin: u8) -> Result<Level, Self::Error> {
        let p = self.pin_mut(pin)?;
        Ok(Level::from(p.is_high()?))
    }
}

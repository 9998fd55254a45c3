#![no_std]
#![doc = include_str!("../README.md")]

use embedded_hal::digital::{ErrorType, InputPin};
use embedded_hal::i2c::I2c;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<E> {
    I2cError(E),
    ArgumentError,
    UnexpectedDevice,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::I2cError(error)
    }
}

pub trait WhoAmI<I2C: I2c, T: core::cmp::Eq> {
    const EXPECTED_WHOAMI: T;

    fn whoami(&mut self) -> Result<T, I2C::Error>;
}

/// Placeholder for the interrupt line on handles constructed without one.
/// Reads as never asserted.  The real line is active low, so [`InputPin::is_low`]
/// is the asserted state.
pub struct NoInterruptPin;

impl ErrorType for NoInterruptPin {
    type Error = core::convert::Infallible;
}

impl InputPin for NoInterruptPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

pub mod field;
pub mod vcnl4040;

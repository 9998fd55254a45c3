//! # Unofficial Rust Driver for VCNL4040 Proximity and Ambient Light Sensor
//!
//! ## External Links
//!
//! - [Official Hardware Repository]
//! - [Official CircuitPython Repository]
//! - [Official Product Site]
//! - [Datasheet]
//!
//! [Official Hardware Repository]: https://github.com/adafruit/Adafruit-VCNL4040-PCB
//! [Official CircuitPython Repository]: https://github.com/adafruit/Adafruit_CircuitPython_VCNL4040
//! [Official Product Site]: https://www.adafruit.com/product/4161
//! [Datasheet]: https://www.vishay.com/docs/84274/vcnl4040.pdf

use crate::field::{ByteOrder, Field};
use crate::{Error, NoInterruptPin, WhoAmI};
use embedded_hal::digital::InputPin;
use embedded_hal::i2c::I2c;
use num_enum::{IntoPrimitive, TryFromPrimitive};

pub const ADDRESS_DEFAULT: u8 = 0x60;

const REG_ALS_CONF: u8 = 0x00;
const REG_ALS_THDH: u8 = 0x01;
const REG_ALS_THDL: u8 = 0x02;
const REG_PS_CONF1: u8 = 0x03;
const REG_PS_MS: u8 = 0x04;
const REG_PS_THDL: u8 = 0x06;
const REG_PS_THDH: u8 = 0x07;
const REG_PS_DATA: u8 = 0x08;
const REG_ALS_DATA: u8 = 0x09;
const REG_WHITE_DATA: u8 = 0x0A;
const REG_INT_FLAG: u8 = 0x0B;
const REG_ID: u8 = 0x0C;

// Every register is 16 bits wide, low byte first on the wire.
const fn word(register: u8) -> Field {
    Field::whole(register, 2, ByteOrder::LittleEndian)
}

const fn word_bits(register: u8, offset: u8, width: u8) -> Field {
    Field::bits(register, 2, ByteOrder::LittleEndian, offset, width)
}

const fn word_bit(register: u8, offset: u8) -> Field {
    Field::bit(register, 2, ByteOrder::LittleEndian, offset)
}

const ALS_SHUTDOWN: Field = word_bit(REG_ALS_CONF, 0);
const ALS_INTERRUPT_ENABLE: Field = word_bit(REG_ALS_CONF, 1);
const ALS_INTEGRATION_TIME: Field = word_bits(REG_ALS_CONF, 6, 2);
const ALS_THRESHOLD_HIGH: Field = word(REG_ALS_THDH);
const ALS_THRESHOLD_LOW: Field = word(REG_ALS_THDL);
const PS_SHUTDOWN: Field = word_bit(REG_PS_CONF1, 0);
const PS_INTEGRATION_TIME: Field = word_bits(REG_PS_CONF1, 1, 3);
const LED_DUTY_CYCLE: Field = word_bits(REG_PS_CONF1, 6, 2);
const PS_INTERRUPT_MODE: Field = word_bits(REG_PS_CONF1, 8, 2);
const PS_RESOLUTION: Field = word_bit(REG_PS_CONF1, 11);
const LED_CURRENT: Field = word_bits(REG_PS_MS, 8, 3);
const WHITE_ENABLE: Field = word_bit(REG_PS_MS, 15);
const PS_THRESHOLD_LOW: Field = word(REG_PS_THDL);
const PS_THRESHOLD_HIGH: Field = word(REG_PS_THDH);
const PS_DATA: Field = word(REG_PS_DATA);
const ALS_DATA: Field = word(REG_ALS_DATA);
const WHITE_DATA: Field = word(REG_WHITE_DATA);
const PS_INTERRUPT_LOW: Field = word_bit(REG_INT_FLAG, 8);
const PS_INTERRUPT_HIGH: Field = word_bit(REG_INT_FLAG, 9);
const ALS_INTERRUPT_HIGH: Field = word_bit(REG_INT_FLAG, 12);
const ALS_INTERRUPT_LOW: Field = word_bit(REG_INT_FLAG, 13);
const DEVICE_ID: Field = word(REG_ID);

/// Ambient light sensor integration time.  Longer times give higher
/// sensitivity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum LightIntegrationTime {
    Ms80 = 0,
    Ms160 = 1,
    Ms320 = 2,
    Ms640 = 3,
}

/// Proximity sensor integration time, in multiples of T.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ProximityIntegrationTime {
    T1 = 0,
    T1_5 = 1,
    T2 = 2,
    T2_5 = 3,
    T3 = 4,
    T3_5 = 5,
    T4 = 6,
    T8 = 7,
}

/// Current driven through the infrared LED.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum LedCurrent {
    Ma50 = 0,
    Ma75 = 1,
    Ma100 = 2,
    Ma120 = 3,
    Ma140 = 4,
    Ma160 = 5,
    Ma180 = 6,
    Ma200 = 7,
}

/// Duty ratio of the infrared LED while measuring proximity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum LedDutyCycle {
    Duty1_40 = 0,
    Duty1_80 = 1,
    Duty1_160 = 2,
    Duty1_320 = 3,
}

/// Which proximity threshold crossings drive the interrupt line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ProximityInterrupt {
    Disabled = 0,
    Close = 1,
    Away = 2,
    CloseAndAway = 3,
}

/// Resolution of the proximity reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ProximityResolution {
    Bits12 = 0,
    Bits16 = 1,
}

pub struct Vcnl4040<I2C, PIN = NoInterruptPin> {
    i2c: I2C,
    address: u8,
    interrupt_pin: Option<PIN>,
}

impl<I2C: I2c> Vcnl4040<I2C> {
    /// The entry point for handles without an interrupt line.  Expects
    /// [`I2c`] (obtainable from the target platform HAL) and the device
    /// address, [`ADDRESS_DEFAULT`] unless the bus holds a translator.
    /// Checks the identification register, then wakes both measurement
    /// channels and enables the white channel.
    ///
    /// # Errors
    ///
    /// [`Error::UnexpectedDevice`]: the identification register did not read
    /// back as a VCNL4040.  No configuration is touched in that case.
    ///
    /// [`Error::I2cError`]: any bus error, unchanged.
    pub fn new(i2c: I2C, address: u8) -> Result<Self, Error<I2C::Error>> {
        Self::start(i2c, address, None)
    }
}

impl<I2C: I2c, PIN: InputPin> Vcnl4040<I2C, PIN> {
    /// As [`Vcnl4040::new`], with the sensor's INT line attached.  The pin
    /// must already be configured as a pulled-up input; the line is open
    /// drain and active low.
    ///
    /// # Errors
    ///
    /// As for [`Vcnl4040::new`].
    pub fn new_with_interrupt_pin(
        i2c: I2C,
        address: u8,
        interrupt_pin: PIN,
    ) -> Result<Self, Error<I2C::Error>> {
        Self::start(i2c, address, Some(interrupt_pin))
    }

    fn start(i2c: I2C, address: u8, interrupt_pin: Option<PIN>) -> Result<Self, Error<I2C::Error>> {
        let mut res = Self {
            i2c,
            address,
            interrupt_pin,
        };
        if res.whoami()? != Self::EXPECTED_WHOAMI {
            return Err(Error::UnexpectedDevice);
        }
        res.set_proximity_shutdown(false)?;
        res.set_light_shutdown(false)?;
        res.set_white_enable(true)?;
        Ok(res)
    }

    fn get(&mut self, field: Field) -> Result<u16, I2C::Error> {
        field.read(&mut self.i2c, self.address)
    }

    fn get_bit(&mut self, field: Field) -> Result<bool, I2C::Error> {
        if self.get(field)? == 0 {
            Ok(false)
        } else {
            Ok(true)
        }
    }

    fn set(&mut self, field: Field, value: u16) -> Result<(), Error<I2C::Error>> {
        field.write(&mut self.i2c, self.address, value)
    }

    fn set_bit(&mut self, field: Field, value: bool) -> Result<(), Error<I2C::Error>> {
        self.set(field, u16::from(value))
    }

    /// Proximity data.  Raw counts; the range depends on integration time,
    /// LED current and resolution.
    pub fn proximity(&mut self) -> Result<u16, I2C::Error> {
        self.get(PS_DATA)
    }

    /// Ambient light data, raw counts.
    pub fn light(&mut self) -> Result<u16, I2C::Error> {
        self.get(ALS_DATA)
    }

    /// White light data, raw counts.
    pub fn white(&mut self) -> Result<u16, I2C::Error> {
        self.get(WHITE_DATA)
    }

    /// When `true`, the proximity channel is powered down and its data
    /// stops updating.  Reads still succeed.
    pub fn get_proximity_shutdown(&mut self) -> Result<bool, I2C::Error> {
        self.get_bit(PS_SHUTDOWN)
    }

    pub fn set_proximity_shutdown(&mut self, shutdown: bool) -> Result<(), Error<I2C::Error>> {
        self.set_bit(PS_SHUTDOWN, shutdown)
    }

    pub fn get_proximity_integration_time(
        &mut self,
    ) -> Result<ProximityIntegrationTime, Error<I2C::Error>> {
        let code = self.get(PS_INTEGRATION_TIME)?;
        ProximityIntegrationTime::try_from(code as u8).map_err(|_| Error::ArgumentError)
    }

    pub fn set_proximity_integration_time(
        &mut self,
        integration_time: ProximityIntegrationTime,
    ) -> Result<(), Error<I2C::Error>> {
        self.set(PS_INTEGRATION_TIME, u16::from(u8::from(integration_time)))
    }

    pub fn get_proximity_resolution(&mut self) -> Result<ProximityResolution, Error<I2C::Error>> {
        let code = self.get(PS_RESOLUTION)?;
        ProximityResolution::try_from(code as u8).map_err(|_| Error::ArgumentError)
    }

    pub fn set_proximity_resolution(
        &mut self,
        resolution: ProximityResolution,
    ) -> Result<(), Error<I2C::Error>> {
        self.set(PS_RESOLUTION, u16::from(u8::from(resolution)))
    }

    pub fn get_proximity_interrupt(&mut self) -> Result<ProximityInterrupt, Error<I2C::Error>> {
        let code = self.get(PS_INTERRUPT_MODE)?;
        ProximityInterrupt::try_from(code as u8).map_err(|_| Error::ArgumentError)
    }

    pub fn set_proximity_interrupt(
        &mut self,
        interrupt: ProximityInterrupt,
    ) -> Result<(), Error<I2C::Error>> {
        self.set(PS_INTERRUPT_MODE, u16::from(u8::from(interrupt)))
    }

    pub fn get_proximity_low_threshold(&mut self) -> Result<u16, I2C::Error> {
        self.get(PS_THRESHOLD_LOW)
    }

    pub fn set_proximity_low_threshold(&mut self, threshold: u16) -> Result<(), Error<I2C::Error>> {
        self.set(PS_THRESHOLD_LOW, threshold)
    }

    pub fn get_proximity_high_threshold(&mut self) -> Result<u16, I2C::Error> {
        self.get(PS_THRESHOLD_HIGH)
    }

    pub fn set_proximity_high_threshold(
        &mut self,
        threshold: u16,
    ) -> Result<(), Error<I2C::Error>> {
        self.set(PS_THRESHOLD_HIGH, threshold)
    }

    /// Set while proximity has dropped below the low threshold, for the
    /// [`ProximityInterrupt::Away`] and [`ProximityInterrupt::CloseAndAway`]
    /// modes.
    pub fn proximity_low_interrupt(&mut self) -> Result<bool, I2C::Error> {
        self.get_bit(PS_INTERRUPT_LOW)
    }

    /// Set while proximity has risen above the high threshold, for the
    /// [`ProximityInterrupt::Close`] and [`ProximityInterrupt::CloseAndAway`]
    /// modes.
    pub fn proximity_high_interrupt(&mut self) -> Result<bool, I2C::Error> {
        self.get_bit(PS_INTERRUPT_HIGH)
    }

    pub fn get_led_current(&mut self) -> Result<LedCurrent, Error<I2C::Error>> {
        let code = self.get(LED_CURRENT)?;
        LedCurrent::try_from(code as u8).map_err(|_| Error::ArgumentError)
    }

    pub fn set_led_current(&mut self, current: LedCurrent) -> Result<(), Error<I2C::Error>> {
        self.set(LED_CURRENT, u16::from(u8::from(current)))
    }

    pub fn get_led_duty_cycle(&mut self) -> Result<LedDutyCycle, Error<I2C::Error>> {
        let code = self.get(LED_DUTY_CYCLE)?;
        LedDutyCycle::try_from(code as u8).map_err(|_| Error::ArgumentError)
    }

    pub fn set_led_duty_cycle(&mut self, duty_cycle: LedDutyCycle) -> Result<(), Error<I2C::Error>> {
        self.set(LED_DUTY_CYCLE, u16::from(u8::from(duty_cycle)))
    }

    /// When `true`, the ambient light channel is powered down and its data
    /// stops updating.  Reads still succeed.
    pub fn get_light_shutdown(&mut self) -> Result<bool, I2C::Error> {
        self.get_bit(ALS_SHUTDOWN)
    }

    pub fn set_light_shutdown(&mut self, shutdown: bool) -> Result<(), Error<I2C::Error>> {
        self.set_bit(ALS_SHUTDOWN, shutdown)
    }

    pub fn get_light_integration_time(
        &mut self,
    ) -> Result<LightIntegrationTime, Error<I2C::Error>> {
        let code = self.get(ALS_INTEGRATION_TIME)?;
        LightIntegrationTime::try_from(code as u8).map_err(|_| Error::ArgumentError)
    }

    pub fn set_light_integration_time(
        &mut self,
        integration_time: LightIntegrationTime,
    ) -> Result<(), Error<I2C::Error>> {
        self.set(ALS_INTEGRATION_TIME, u16::from(u8::from(integration_time)))
    }

    pub fn get_light_interrupt(&mut self) -> Result<bool, I2C::Error> {
        self.get_bit(ALS_INTERRUPT_ENABLE)
    }

    /// Enables the ambient light threshold interrupt.
    pub fn set_light_interrupt(&mut self, enable: bool) -> Result<(), Error<I2C::Error>> {
        self.set_bit(ALS_INTERRUPT_ENABLE, enable)
    }

    pub fn get_light_low_threshold(&mut self) -> Result<u16, I2C::Error> {
        self.get(ALS_THRESHOLD_LOW)
    }

    pub fn set_light_low_threshold(&mut self, threshold: u16) -> Result<(), Error<I2C::Error>> {
        self.set(ALS_THRESHOLD_LOW, threshold)
    }

    pub fn get_light_high_threshold(&mut self) -> Result<u16, I2C::Error> {
        self.get(ALS_THRESHOLD_HIGH)
    }

    pub fn set_light_high_threshold(&mut self, threshold: u16) -> Result<(), Error<I2C::Error>> {
        self.set(ALS_THRESHOLD_HIGH, threshold)
    }

    /// Set while the ambient light value has risen above the high threshold.
    pub fn light_high_interrupt(&mut self) -> Result<bool, I2C::Error> {
        self.get_bit(ALS_INTERRUPT_HIGH)
    }

    /// Set while the ambient light value has dropped below the low threshold.
    pub fn light_low_interrupt(&mut self) -> Result<bool, I2C::Error> {
        self.get_bit(ALS_INTERRUPT_LOW)
    }

    pub fn get_white_enable(&mut self) -> Result<bool, I2C::Error> {
        self.get_bit(WHITE_ENABLE)
    }

    pub fn set_white_enable(&mut self, enable: bool) -> Result<(), Error<I2C::Error>> {
        self.set_bit(WHITE_ENABLE, enable)
    }

    /// Reports whether the INT line is asserted.  The line is active low.
    /// Handles built without a pin always report `false`.
    ///
    /// # Errors
    ///
    /// The pin's own error type, unchanged.
    pub fn interrupt_asserted(&mut self) -> Result<bool, PIN::Error> {
        match self.interrupt_pin.as_mut() {
            Some(pin) => pin.is_low(),
            None => Ok(false),
        }
    }
}


pub mod whoami;

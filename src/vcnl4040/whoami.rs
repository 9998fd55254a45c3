use crate::vcnl4040::{Vcnl4040, DEVICE_ID};
use crate::WhoAmI;
use embedded_hal::digital::InputPin;
use embedded_hal::i2c::I2c;

impl<I2C: I2c, PIN: InputPin> WhoAmI<I2C, u16> for Vcnl4040<I2C, PIN> {
    const EXPECTED_WHOAMI: u16 = 0x0186;

    fn whoami(&mut self) -> Result<u16, I2C::Error> {
        DEVICE_ID.read_register(&mut self.i2c, self.address)
    }
}

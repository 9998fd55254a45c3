//! Bit-field access to the registers of an I2C device.
//!
//! A [`Field`] names a register, the register's length and byte order on the
//! wire, and the bit range a setting occupies inside it.  The accessors turn
//! field reads and writes into bus transactions for any [`I2c`]
//! implementation, so the same table-of-fields approach works for devices
//! other than the one in this crate.

use crate::Error;
use embedded_hal::i2c::I2c;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

/// Describes one setting inside a 1- or 2-byte register.
///
/// Construction checks that the bit range lies inside the register, so a
/// table of `const` fields is verified at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    register: u8,
    length: u8,
    order: ByteOrder,
    offset: u8,
    width: u8,
}

impl Field {
    /// A field of `width` bits starting `offset` bits above the register's
    /// least significant bit.
    ///
    /// # Panics
    ///
    /// When `length` is not 1 or 2 bytes, or the bit range does not fit the
    /// register.
    pub const fn bits(register: u8, length: u8, order: ByteOrder, offset: u8, width: u8) -> Self {
        assert!(length == 1 || length == 2, "register length must be 1 or 2 bytes");
        assert!(width >= 1, "field must be at least one bit wide");
        assert!(offset + width <= 8 * length, "field must lie within its register");
        Self {
            register,
            length,
            order,
            offset,
            width,
        }
    }

    /// A single-bit field.
    ///
    /// # Panics
    ///
    /// As for [`Field::bits`].
    pub const fn bit(register: u8, length: u8, order: ByteOrder, offset: u8) -> Self {
        Self::bits(register, length, order, offset, 1)
    }

    /// A field covering every bit of its register.
    ///
    /// # Panics
    ///
    /// As for [`Field::bits`].
    pub const fn whole(register: u8, length: u8, order: ByteOrder) -> Self {
        Self::bits(register, length, order, 0, 8 * length)
    }

    /// The largest value the field can hold.
    pub const fn max_value(&self) -> u16 {
        if self.width == 16 {
            u16::MAX
        } else {
            (1 << self.width) - 1
        }
    }

    const fn capacity(&self) -> u16 {
        if self.length == 1 {
            0x00FF
        } else {
            0xFFFF
        }
    }

    const fn mask(&self) -> u16 {
        self.max_value() << self.offset
    }

    const fn spans_register(&self) -> bool {
        self.offset == 0 && self.width == 8 * self.length
    }

    /// Reads the whole register holding this field, decoded in the declared
    /// byte order.
    ///
    /// # Errors
    ///
    /// Any bus error, unchanged.
    pub fn read_register<I2C: I2c>(&self, i2c: &mut I2C, address: u8) -> Result<u16, I2C::Error> {
        if self.length == 1 {
            let mut data: [u8; 1] = [0; 1];
            i2c.write_read(address, &[self.register], &mut data)?;
            Ok(u16::from(data[0]))
        } else {
            let mut data: [u8; 2] = [0; 2];
            i2c.write_read(address, &[self.register], &mut data)?;
            Ok(match self.order {
                ByteOrder::LittleEndian => u16::from_le_bytes(data),
                ByteOrder::BigEndian => u16::from_be_bytes(data),
            })
        }
    }

    /// Writes the whole register holding this field, encoded in the declared
    /// byte order.
    ///
    /// # Errors
    ///
    /// [`Error::ArgumentError`]: `value` does not fit the register.  Checked
    /// before any bus traffic.
    ///
    /// [`Error::I2cError`]: any bus error, unchanged.
    pub fn write_register<I2C: I2c>(
        &self,
        i2c: &mut I2C,
        address: u8,
        value: u16,
    ) -> Result<(), Error<I2C::Error>> {
        if value > self.capacity() {
            return Err(Error::ArgumentError);
        }
        if self.length == 1 {
            let [low, _] = value.to_le_bytes();
            i2c.write(address, &[self.register, low])?;
        } else {
            let data = match self.order {
                ByteOrder::LittleEndian => value.to_le_bytes(),
                ByteOrder::BigEndian => value.to_be_bytes(),
            };
            i2c.write(address, &[self.register, data[0], data[1]])?;
        }
        Ok(())
    }

    /// Reads the field: the register value shifted down to the field's
    /// offset and masked to its width.
    ///
    /// # Errors
    ///
    /// Any bus error, unchanged.
    pub fn read<I2C: I2c>(&self, i2c: &mut I2C, address: u8) -> Result<u16, I2C::Error> {
        let raw = self.read_register(i2c, address)?;
        Ok((raw >> self.offset) & self.max_value())
    }

    /// Writes the field, preserving the other bits of the register through a
    /// read followed by a write.  The `&mut` borrow of the bus keeps the
    /// pair exclusive for this caller; nothing else serializes two handles
    /// driving the same register.  A field spanning its whole register is
    /// written directly, without the read.
    ///
    /// # Errors
    ///
    /// [`Error::ArgumentError`]: `value` does not fit in the field's width.
    /// Checked before any bus traffic.
    ///
    /// [`Error::I2cError`]: any bus error, unchanged.
    pub fn write<I2C: I2c>(
        &self,
        i2c: &mut I2C,
        address: u8,
        value: u16,
    ) -> Result<(), Error<I2C::Error>> {
        if value > self.max_value() {
            return Err(Error::ArgumentError);
        }
        if self.spans_register() {
            return self.write_register(i2c, address, value);
        }
        let raw = self.read_register(i2c, address)?;
        self.write_register(i2c, address, (raw & !self.mask()) | (value << self.offset))
    }
}

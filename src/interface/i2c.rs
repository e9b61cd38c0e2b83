//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::I2c;

use super::Ads1x15Interface;

/// Bus address with the ADDR pin tied to ground.
pub const DEFAULT_ADDRESS: u8 = 0x48;

/// Bus address selected by the ADDR pin connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlaveAddr {
    /// ADDR tied to GND (default).
    #[default]
    Gnd,
    /// ADDR tied to VDD.
    Vdd,
    /// ADDR tied to SDA.
    Sda,
    /// ADDR tied to SCL.
    Scl,
}

impl From<SlaveAddr> for u8 {
    fn from(addr: SlaveAddr) -> Self {
        match addr {
            SlaveAddr::Gnd => DEFAULT_ADDRESS,
            SlaveAddr::Vdd => 0x49,
            SlaveAddr::Sda => 0x4A,
            SlaveAddr::Scl => 0x4B,
        }
    }
}

/// I2C-based interface implementation for the ADS1x15 driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface talking to the device at `address`.
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Returns the 7-bit device address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Ads1x15Interface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_register(&mut self, register: u8, value: u16) -> core::result::Result<(), Self::Error> {
        let [high, low] = value.to_be_bytes();
        self.i2c.write(self.address, &[register, high, low])
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u16, Self::Error> {
        let mut buf = [0u8; 2];
        self.i2c.write_read(self.address, &[register], &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    fn read_current(&mut self) -> core::result::Result<u16, Self::Error> {
        let mut buf = [0u8; 2];
        self.i2c.read(self.address, &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }
}

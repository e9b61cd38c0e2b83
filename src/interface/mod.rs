//! Register transport abstraction for the ADS1x15 driver.

pub mod i2c;

/// Abstraction over the pointer-addressed register access required by the driver.
///
/// Every register is 16 bits wide and travels MSB first. Implementations must
/// perform each call as a single bus transaction.
pub trait Ads1x15Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Sends the pointer byte followed by `value`.
    fn write_register(&mut self, register: u8, value: u16) -> core::result::Result<(), Self::Error>;

    /// Sends the pointer byte, then reads the register back.
    fn read_register(&mut self, register: u8) -> core::result::Result<u16, Self::Error>;

    /// Reads two bytes without sending a pointer byte, returning the register
    /// the device pointer was last left on.
    fn read_current(&mut self) -> core::result::Result<u16, Self::Error>;
}

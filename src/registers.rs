//! Register map definitions for the ADS1x15 converters.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{ComparatorLatch, ComparatorMode, ComparatorPolarity, Mode};

/// Pointer of the read-only `CONVERSION` register.
pub const REG_CONVERSION: u8 = 0x00;
/// Pointer of the `CONFIG` register.
pub const REG_CONFIG: u8 = 0x01;
/// Pointer of the `LO_THRESH` comparator register.
pub const REG_LO_THRESH: u8 = 0x02;
/// Pointer of the `HI_THRESH` comparator register.
pub const REG_HI_THRESH: u8 = 0x03;

/// Mask of the `MUX[2:0]` field within the config register word.
pub const MUX_MASK: u16 = 0x7000;
/// Bit offset of the `MUX[2:0]` field.
pub const MUX_OFFSET: u16 = 12;
/// `OS` bit: start a single conversion when written, conversion done when read.
pub const OS_BIT: u16 = 0x8000;

/// Bitfield representation of the `CONFIG` register (pointer `0x01`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigRegister {
    // Comparator queue and disable (bits 1:0).
    pub comp_queue: B2,
    // Latching comparator (bit 2).
    pub comp_latch: ComparatorLatch,
    // Comparator polarity (bit 3).
    pub comp_polarity: ComparatorPolarity,
    // Comparator mode (bit 4).
    pub comp_mode: ComparatorMode,
    // Data rate (bits 7:5).
    pub data_rate: B3,
    // Operating mode (bit 8).
    pub mode: Mode,
    // Programmable gain amplifier (bits 11:9).
    pub gain: B3,
    // Input multiplexer (bits 14:12).
    pub mux: B3,
    // Operational status / single-shot start (bit 15).
    pub os: bool,
}

impl From<u16> for ConfigRegister {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<ConfigRegister> for u16 {
    fn from(value: ConfigRegister) -> Self {
        u16::from_le_bytes(value.into_bytes())
    }
}

impl ConfigRegister {
    /// Pointer byte of the register.
    pub const ADDRESS: u8 = REG_CONFIG;
    /// Power-on value defined by the datasheet.
    pub const RESET_VALUE: u16 = 0x8583;
}

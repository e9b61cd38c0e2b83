//! Device sub-model capabilities.
//!
//! The ADS1015 and ADS1115 share the register map and config layout but differ
//! in their sample-rate tables and in how the conversion register is laid out.
//! Everything variant-specific goes through [`Variant`]; the codec and the
//! conversion controller never name a concrete chip.

use crate::codec::LookupTable;

/// Per-variant hooks used by the codec and the conversion controller.
pub trait Variant {
    /// Human-readable part number.
    const NAME: &'static str;
    /// Sample rate applied when a configuration does not pick one.
    const DEFAULT_DATA_RATE: u16;
    /// Largest positive code [`Variant::interpret`] can return.
    const FULL_SCALE_CODE: i32;

    /// Sample rates in samples per second, keyed to their `DR[2:0]` encodings.
    fn data_rate_table() -> &'static LookupTable<u16>;

    /// Converts the raw conversion register into a signed device-scale code.
    fn interpret(raw: u16) -> i32;
}

/// 12-bit ADS1015.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ads1015;

/// 16-bit ADS1115.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ads1115;

static ADS1015_RATES: LookupTable<u16> = LookupTable::new(&[
    (128, 0b000),
    (250, 0b001),
    (490, 0b010),
    (920, 0b011),
    (1_600, 0b100),
    (2_400, 0b101),
    (3_300, 0b110),
]);

static ADS1115_RATES: LookupTable<u16> = LookupTable::new(&[
    (8, 0b000),
    (16, 0b001),
    (32, 0b010),
    (64, 0b011),
    (128, 0b100),
    (250, 0b101),
    (475, 0b110),
    (860, 0b111),
]);

impl Variant for Ads1015 {
    const NAME: &'static str = "ADS1015";
    const DEFAULT_DATA_RATE: u16 = 1_600;
    const FULL_SCALE_CODE: i32 = 2_047;

    fn data_rate_table() -> &'static LookupTable<u16> {
        &ADS1015_RATES
    }

    fn interpret(raw: u16) -> i32 {
        // 12-bit result left-justified in the 16-bit register.
        i32::from((raw as i16) >> 4)
    }
}

impl Variant for Ads1115 {
    const NAME: &'static str = "ADS1115";
    const DEFAULT_DATA_RATE: u16 = 128;
    const FULL_SCALE_CODE: i32 = 32_767;

    fn data_rate_table() -> &'static LookupTable<u16> {
        &ADS1115_RATES
    }

    fn interpret(raw: u16) -> i32 {
        i32::from(raw as i16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ads1115_interprets_full_16_bit_twos_complement() {
        assert_eq!(Ads1115::interpret(0xFFFF), -1);
        assert_eq!(Ads1115::interpret(0x7FFF), 32_767);
        assert_eq!(Ads1115::interpret(0x8000), -32_768);
        assert_eq!(Ads1115::interpret(0x0000), 0);
    }

    #[test]
    fn ads1015_drops_the_low_nibble_and_sign_extends() {
        assert_eq!(Ads1015::interpret(0x7FF0), 2_047);
        assert_eq!(Ads1015::interpret(0x8000), -2_048);
        assert_eq!(Ads1015::interpret(0xFFF0), -1);
        assert_eq!(Ads1015::interpret(0x001F), 1);
    }

    #[test]
    fn rate_tables_differ_between_variants() {
        assert_eq!(Ads1115::data_rate_table().bits_for(860), Some(0b111));
        assert_eq!(Ads1015::data_rate_table().bits_for(860), None);
        assert_eq!(Ads1015::data_rate_table().key_for(0b111), None);
        assert_eq!(Ads1015::data_rate_table().bits_for(Ads1015::DEFAULT_DATA_RATE), Some(0b100));
        assert_eq!(Ads1115::data_rate_table().bits_for(Ads1115::DEFAULT_DATA_RATE), Some(0b100));
    }
}

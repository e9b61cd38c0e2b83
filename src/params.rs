//! Strongly typed parameter enumerations for the ADS1x15 driver.
//!
//! The single-bit fields map directly onto their config-register encodings and
//! are used as bitfield specifiers by [`ConfigRegister`](crate::registers::ConfigRegister).
//! Multi-bit fields whose encodings are sparse or inverted ([`Gain`],
//! [`ComparatorQueue`], the variant data rates) are translated through the
//! lookup tables in [`codec`](crate::codec).
//!
//! # Examples
//!
//! ```rust
//! use ads1x15::params::{ComparatorQueue, Gain, Mode};
//!
//! let gain = Gain::try_from(2.0_f32).unwrap();
//! let queue = ComparatorQueue::try_from(4).unwrap();
//! assert_eq!(gain, Gain::Two);
//! assert_eq!(queue.length(), 4);
//! let _ = Mode::SingleShot;
//! ```

use modular_bitfield::prelude::Specifier;

use crate::error::ConfigError;

/// Programmable gain amplifier selections (`PGA[2:0]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    /// Gain 2/3, ±6.144 V full scale.
    TwoThirds,
    /// Gain 1, ±4.096 V full scale.
    One,
    /// Gain 2, ±2.048 V full scale.
    Two,
    /// Gain 4, ±1.024 V full scale.
    Four,
    /// Gain 8, ±0.512 V full scale.
    Eight,
    /// Gain 16, ±0.256 V full scale.
    Sixteen,
}

impl Gain {
    /// All gain settings in register order.
    pub const ALL: [Gain; 6] = [
        Self::TwoThirds,
        Self::One,
        Self::Two,
        Self::Four,
        Self::Eight,
        Self::Sixteen,
    ];

    /// Returns the amplifier multiplier.
    pub const fn multiplier(self) -> f32 {
        match self {
            Self::TwoThirds => 2.0 / 3.0,
            Self::One => 1.0,
            Self::Two => 2.0,
            Self::Four => 4.0,
            Self::Eight => 8.0,
            Self::Sixteen => 16.0,
        }
    }

    /// Returns the positive full-scale input range in volts.
    pub const fn full_scale_volts(self) -> f32 {
        match self {
            Self::TwoThirds => 6.144,
            Self::One => 4.096,
            Self::Two => 2.048,
            Self::Four => 1.024,
            Self::Eight => 0.512,
            Self::Sixteen => 0.256,
        }
    }
}

impl TryFrom<f32> for Gain {
    type Error = ConfigError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|gain| {
                let delta = gain.multiplier() - value;
                delta > -1e-3 && delta < 1e-3
            })
            .ok_or(ConfigError::UnknownGain)
    }
}

/// Device operating mode (`MODE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Mode {
    /// Conversions free-run at the configured data rate.
    Continuous = 0,
    /// Each trigger performs one conversion then powers down.
    SingleShot = 1,
}

/// Comparator operating mode (`COMP_MODE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum ComparatorMode {
    /// Hysteresis comparator.
    Traditional = 0,
    /// Window comparator.
    Window = 1,
}

/// ALERT/RDY pin polarity (`COMP_POL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum ComparatorPolarity {
    /// Pin is driven low when asserted.
    ActiveLow = 0,
    /// Pin is driven high when asserted.
    ActiveHigh = 1,
}

/// Comparator latching behaviour (`COMP_LAT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum ComparatorLatch {
    /// Alert clears once the signal is back within bounds.
    NonLatching = 0,
    /// Alert stays asserted until the conversion register is read.
    Latching = 1,
}

/// Consecutive threshold crossings required before the alert asserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComparatorQueue {
    /// Comparator disabled, ALERT/RDY left high-impedance.
    Disabled,
    /// Assert after one conversion.
    One,
    /// Assert after two conversions.
    Two,
    /// Assert after four conversions.
    Four,
}

impl ComparatorQueue {
    /// All queue settings.
    pub const ALL: [ComparatorQueue; 4] = [Self::Disabled, Self::One, Self::Two, Self::Four];

    /// Returns the logical queue length, `0` meaning disabled.
    pub const fn length(self) -> u8 {
        match self {
            Self::Disabled => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }
}

impl TryFrom<u8> for ComparatorQueue {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Disabled),
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            other => Err(ConfigError::UnknownQueueLength(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_accepts_only_listed_multipliers() {
        assert_eq!(Gain::try_from(2.0_f32 / 3.0), Ok(Gain::TwoThirds));
        assert_eq!(Gain::try_from(16.0_f32), Ok(Gain::Sixteen));
        assert_eq!(Gain::try_from(3.0_f32), Err(ConfigError::UnknownGain));
        assert_eq!(Gain::try_from(0.5_f32), Err(ConfigError::UnknownGain));
    }

    #[test]
    fn queue_length_rejects_three() {
        assert_eq!(ComparatorQueue::try_from(0), Ok(ComparatorQueue::Disabled));
        assert_eq!(ComparatorQueue::try_from(4), Ok(ComparatorQueue::Four));
        assert_eq!(
            ComparatorQueue::try_from(3),
            Err(ConfigError::UnknownQueueLength(3))
        );
    }
}

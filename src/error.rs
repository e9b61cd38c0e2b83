//! Error handling primitives for the ADS1x15 driver.

use core::fmt;

use embedded_hal::digital::ErrorKind as PinErrorKind;

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The register transport failed while addressing `register`.
    Interface {
        /// Pointer byte of the register being accessed.
        register: u8,
        /// Error reported by the underlying bus.
        error: E,
    },
    /// The provided configuration cannot be represented by the device.
    InvalidConfig(ConfigError),
    /// An alert wait was requested on a handle constructed without an alert line.
    NoAlertPin,
    /// A readiness wait exceeded its bound.
    Timeout(TimeoutSource),
    /// The alert line could not be sampled.
    AlertPin(PinErrorKind),
    /// Continuous non-latching ready pulses are too short for an alert line
    /// that is only sampled.
    AlertNotLatched,
}

impl<E> Error<E> {
    pub(crate) fn interface(register: u8, error: E) -> Self {
        Self::Interface { register, error }
    }
}

impl<E> From<ConfigError> for Error<E> {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfig(err)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interface { register, error } => {
                write!(f, "bus error on register {register:#04x}: {error:?}")
            }
            Self::InvalidConfig(err) => write!(f, "invalid configuration: {err}"),
            Self::NoAlertPin => f.write_str("no alert line bound"),
            Self::Timeout(source) => write!(f, "timed out waiting for {source}"),
            Self::AlertPin(kind) => write!(f, "alert line error: {kind:?}"),
            Self::AlertNotLatched => f.write_str("sampled alert line would miss ready pulses"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Interface { register, error } => {
                defmt::write!(f, "Interface {{ register: {=u8:#x}, error: {} }}", register, error)
            }
            Self::InvalidConfig(err) => defmt::write!(f, "InvalidConfig({})", err),
            Self::NoAlertPin => defmt::write!(f, "NoAlertPin"),
            Self::Timeout(source) => defmt::write!(f, "Timeout({})", source),
            Self::AlertPin(kind) => defmt::write!(f, "AlertPin({})", defmt::Debug2Format(kind)),
            Self::AlertNotLatched => defmt::write!(f, "AlertNotLatched"),
        }
    }
}

/// Register field a [`ConfigError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// `PGA[2:0]`.
    Gain,
    /// `DR[2:0]`.
    DataRate,
    /// `COMP_QUE[1:0]`.
    ComparatorQueue,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gain => "gain",
            Self::DataRate => "data rate",
            Self::ComparatorQueue => "comparator queue",
        })
    }
}

/// Configuration values rejected while encoding or decoding the config register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Gain is not one of 2/3, 1, 2, 4, 8 or 16.
    UnknownGain,
    /// Sample rate is not offered by the active device variant.
    UnknownDataRate(u16),
    /// Comparator queue length is not one of 0, 1, 2 or 4.
    UnknownQueueLength(u8),
    /// Channel is outside the single-ended inputs 0..=3.
    InvalidChannel(u8),
    /// A field read back from the device matches no known encoding.
    UnknownBits {
        /// Field holding the unexpected pattern.
        field: Field,
        /// Raw (unshifted) field bits.
        bits: u8,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGain => f.write_str("unknown gain"),
            Self::UnknownDataRate(rate) => write!(f, "unsupported data rate {rate} SPS"),
            Self::UnknownQueueLength(len) => write!(f, "unsupported comparator queue length {len}"),
            Self::InvalidChannel(channel) => write!(f, "channel {channel} is not in 0..=3"),
            Self::UnknownBits { field, bits } => {
                write!(f, "unknown {field} bit pattern {bits:#05b}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Which readiness wait expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeoutSource {
    /// Polling the `OS` bit of the config register.
    ReadyBit,
    /// Waiting for an edge on the ALERT/RDY line.
    AlertLine,
}

impl fmt::Display for TimeoutSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ReadyBit => "the conversion ready bit",
            Self::AlertLine => "the alert line",
        })
    }
}

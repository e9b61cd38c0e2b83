//! Config register packing and unpacking.
//!
//! [`encode`] turns a [`Config`] plus an input channel into the 16-bit word
//! written to the config register, and [`decode`] performs the inverse. Gain,
//! data rate and comparator queue go through [`LookupTable`]s so that an
//! unknown value is rejected instead of silently mapped to some default.

use crate::config::Config;
use crate::error::{ConfigError, Field};
use crate::params::{ComparatorQueue, Gain, Mode};
use crate::registers::{ConfigRegister, MUX_MASK, MUX_OFFSET};
use crate::variant::Variant;

/// Highest single-ended input channel.
pub const MAX_CHANNEL: u8 = 3;

/// Immutable bidirectional mapping between setting values and field bits.
#[derive(Debug)]
pub struct LookupTable<K: 'static> {
    entries: &'static [(K, u8)],
}

impl<K> LookupTable<K>
where
    K: Copy + PartialEq,
{
    /// Wraps a static list of `(value, bits)` pairs.
    pub const fn new(entries: &'static [(K, u8)]) -> Self {
        Self { entries }
    }

    /// Returns the field bits for `key`.
    pub fn bits_for(&self, key: K) -> Option<u8> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|&(_, bits)| bits)
    }

    /// Returns the value encoded by `bits`.
    pub fn key_for(&self, bits: u8) -> Option<K> {
        self.entries
            .iter()
            .find(|(_, candidate)| *candidate == bits)
            .map(|&(key, _)| key)
    }

    /// Iterates over every known value.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|&(key, _)| key)
    }
}

/// `PGA[2:0]` encodings; patterns `0b110` and `0b111` are not listed.
pub static GAIN_TABLE: LookupTable<Gain> = LookupTable::new(&[
    (Gain::TwoThirds, 0b000),
    (Gain::One, 0b001),
    (Gain::Two, 0b010),
    (Gain::Four, 0b011),
    (Gain::Eight, 0b100),
    (Gain::Sixteen, 0b101),
]);

/// `COMP_QUE[1:0]` encodings. Disabling the comparator is pattern `0b11`.
pub static COMP_QUEUE_TABLE: LookupTable<ComparatorQueue> = LookupTable::new(&[
    (ComparatorQueue::Disabled, 0b11),
    (ComparatorQueue::One, 0b00),
    (ComparatorQueue::Two, 0b01),
    (ComparatorQueue::Four, 0b10),
]);

/// Builds the config register word selecting single-ended input `channel`.
///
/// The `OS` bit is set only in single-shot mode, so writing the word starts a
/// conversion.
pub fn encode<V: Variant>(config: &Config, channel: u8) -> Result<u16, ConfigError> {
    if channel > MAX_CHANNEL {
        return Err(ConfigError::InvalidChannel(channel));
    }

    encode_with_mux::<V>(config, channel)
}

/// Same as [`encode`] but takes the raw `MUX[2:0]` pattern, as read back from a
/// live device that may have a differential input selected.
pub(crate) fn encode_with_mux<V: Variant>(config: &Config, mux: u8) -> Result<u16, ConfigError> {
    let gain = GAIN_TABLE
        .bits_for(config.gain)
        .ok_or(ConfigError::UnknownGain)?;
    let data_rate = V::data_rate_table()
        .bits_for(config.data_rate)
        .ok_or(ConfigError::UnknownDataRate(config.data_rate))?;
    let queue = COMP_QUEUE_TABLE
        .bits_for(config.comparator_queue)
        .ok_or(ConfigError::UnknownQueueLength(config.comparator_queue.length()))?;

    let register = ConfigRegister::new()
        .with_os(config.mode == Mode::SingleShot)
        .with_mux(mux & 0x07)
        .with_gain(gain)
        .with_mode(config.mode)
        .with_data_rate(data_rate)
        .with_comp_mode(config.comparator_mode)
        .with_comp_polarity(config.comparator_polarity)
        .with_comp_latch(config.comparator_latch)
        .with_comp_queue(queue);

    Ok(register.into())
}

/// Recovers the settings held in a config register word.
///
/// The threshold registers are not part of the word; the returned thresholds
/// are the power-on values and must be filled in separately when known.
pub fn decode<V: Variant>(word: u16) -> Result<Config, ConfigError> {
    let register = ConfigRegister::from(word);

    let gain = GAIN_TABLE
        .key_for(register.gain())
        .ok_or(ConfigError::UnknownBits {
            field: Field::Gain,
            bits: register.gain(),
        })?;
    let data_rate = V::data_rate_table()
        .key_for(register.data_rate())
        .ok_or(ConfigError::UnknownBits {
            field: Field::DataRate,
            bits: register.data_rate(),
        })?;
    let comparator_queue = COMP_QUEUE_TABLE
        .key_for(register.comp_queue())
        .ok_or(ConfigError::UnknownBits {
            field: Field::ComparatorQueue,
            bits: register.comp_queue(),
        })?;

    Ok(Config {
        gain,
        data_rate,
        mode: register.mode(),
        comparator_queue,
        comparator_mode: register.comp_mode(),
        comparator_polarity: register.comp_polarity(),
        comparator_latch: register.comp_latch(),
        ..Config::for_variant::<V>()
    })
}

/// Extracts the raw `MUX[2:0]` pattern from a config register word.
pub fn channel_of(word: u16) -> u8 {
    ((word & MUX_MASK) >> MUX_OFFSET) as u8
}

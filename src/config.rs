//! Configuration primitives for the ADS1x15 driver.

use core::time::Duration;

use crate::codec;
use crate::error::ConfigError;
use crate::params::{
    ComparatorLatch,
    ComparatorMode,
    ComparatorPolarity,
    ComparatorQueue,
    Gain,
    Mode,
};
use crate::variant::Variant;

/// User-facing configuration for an ADS1x15 converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Programmable gain amplifier setting.
    pub gain: Gain,
    /// Sample rate in samples per second; must be listed by the device variant.
    pub data_rate: u16,
    /// Single-shot or continuous conversions.
    pub mode: Mode,
    /// Crossings required before ALERT/RDY asserts, or disabled.
    pub comparator_queue: ComparatorQueue,
    /// Raw value written to `LO_THRESH`.
    pub comparator_low_threshold: i16,
    /// Raw value written to `HI_THRESH`.
    pub comparator_high_threshold: i16,
    /// Traditional or window comparator.
    pub comparator_mode: ComparatorMode,
    /// ALERT/RDY active level.
    pub comparator_polarity: ComparatorPolarity,
    /// Latching behaviour of ALERT/RDY.
    pub comparator_latch: ComparatorLatch,
}

impl Config {
    /// Begins building a [`Config`] seeded with the defaults of variant `V`.
    pub fn new<V: Variant>() -> ConfigBuilder {
        ConfigBuilder::new::<V>()
    }

    /// Power-on style defaults using the default sample rate of variant `V`.
    pub fn for_variant<V: Variant>() -> Self {
        Self {
            gain: Gain::One,
            data_rate: V::DEFAULT_DATA_RATE,
            mode: Mode::SingleShot,
            comparator_queue: ComparatorQueue::Disabled,
            comparator_low_threshold: i16::MIN,
            comparator_high_threshold: i16::MAX,
            comparator_mode: ComparatorMode::Traditional,
            comparator_polarity: ComparatorPolarity::ActiveLow,
            comparator_latch: ComparatorLatch::NonLatching,
        }
    }

    /// Checks that every field has a register encoding on variant `V`.
    pub fn validate<V: Variant>(&self) -> core::result::Result<(), ConfigError> {
        codec::encode::<V>(self, 0).map(|_| ())
    }

    /// Time for at least two conversions at the configured rate, in microseconds.
    pub(crate) fn settle_us(&self) -> u32 {
        2_000_000 / u32::from(self.data_rate.max(1))
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::for_variant`].
    pub fn new<V: Variant>() -> Self {
        Self {
            config: Config::for_variant::<V>(),
        }
    }

    /// Overrides the amplifier gain.
    pub fn gain(mut self, gain: Gain) -> Self {
        self.config.gain = gain;
        self
    }

    /// Overrides the sample rate.
    pub fn data_rate(mut self, data_rate: u16) -> Self {
        self.config.data_rate = data_rate;
        self
    }

    /// Selects single-shot or continuous operation.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Sets the comparator queue length.
    pub fn comparator_queue(mut self, queue: ComparatorQueue) -> Self {
        self.config.comparator_queue = queue;
        self
    }

    /// Sets the low and high comparator thresholds.
    pub fn comparator_thresholds(mut self, low: i16, high: i16) -> Self {
        self.config.comparator_low_threshold = low;
        self.config.comparator_high_threshold = high;
        self
    }

    /// Sets the comparator mode.
    pub fn comparator_mode(mut self, mode: ComparatorMode) -> Self {
        self.config.comparator_mode = mode;
        self
    }

    /// Sets the ALERT/RDY polarity.
    pub fn comparator_polarity(mut self, polarity: ComparatorPolarity) -> Self {
        self.config.comparator_polarity = polarity;
        self
    }

    /// Sets the comparator latching behaviour.
    pub fn comparator_latch(mut self, latch: ComparatorLatch) -> Self {
        self.config.comparator_latch = latch;
        self
    }

    /// Turns ALERT/RDY into a conversion-ready pulse.
    ///
    /// Requires `HI_THRESH` MSB set, `LO_THRESH` MSB clear and an enabled queue.
    pub fn conversion_ready_alert(mut self) -> Self {
        self.config.comparator_high_threshold = i16::MIN;
        self.config.comparator_low_threshold = 0;
        if self.config.comparator_queue == ComparatorQueue::Disabled {
            self.config.comparator_queue = ComparatorQueue::One;
        }
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

/// Bounds for the busy-poll and alert waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Pause between two samples of the ready bit or alert line.
    pub interval: Duration,
    /// Total time budget before giving up.
    pub timeout: Duration,
}

impl PollPolicy {
    /// Creates a policy polling every `interval` for at most `timeout`.
    pub const fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Returns a copy with a different timeout and the same interval.
    pub const fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    /// Number of samples that fit in the budget, at least one.
    pub fn max_polls(&self) -> u32 {
        let interval = self.interval.as_micros().max(1);
        let polls = self.timeout.as_micros() / interval;
        u32::try_from(polls).unwrap_or(u32::MAX).max(1)
    }

    /// Poll interval in microseconds, saturated to `u32`.
    pub fn interval_us(&self) -> u32 {
        u32::try_from(self.interval.as_micros()).unwrap_or(u32::MAX)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_micros(200),
            timeout: Duration::from_millis(500),
        }
    }
}

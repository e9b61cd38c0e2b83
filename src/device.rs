//! High-level ADS1x15 device driver implementation.

use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::Error as _;
use embedded_hal::i2c::I2c;

use crate::alert::{AlertLine, NoAlertPin};
use crate::codec;
use crate::config::{Config, PollPolicy};
use crate::error::{Error, Result, TimeoutSource};
use crate::interface::Ads1x15Interface;
use crate::interface::i2c::I2cInterface;
use crate::params::{ComparatorLatch, Mode};
use crate::registers::{ConfigRegister, REG_CONVERSION, REG_HI_THRESH, REG_LO_THRESH};
use crate::variant::Variant;

/// High-level synchronous driver for one ADS1015/ADS1115 on the bus.
///
/// `V` selects the device variant, `D` provides the blocking waits and `A` is
/// the optional ALERT/RDY [`AlertLine`].
pub struct Ads1x15<IFACE, V, D, A = NoAlertPin> {
    interface: IFACE,
    delay: D,
    alert: Option<A>,
    config: Config,
    poll: PollPolicy,
    // Channel of the last trigger write. In continuous mode a repeated read of
    // this channel skips the trigger and only fetches the conversion register.
    last_channel: Option<u8>,
    // Register the device pointer was last left on, `None` after a bus fault.
    pointer: Option<u8>,
    _variant: PhantomData<V>,
}

impl<IFACE, V, D, A> Ads1x15<IFACE, V, D, A> {
    // ==================================================================
    // == Ownership ======================================================
    // ==================================================================
    /// Consumes the driver and returns the owned transport and delay.
    pub fn release(self) -> (IFACE, D) {
        (self.interface, self.delay)
    }

    /// Consumes the driver and returns every owned resource.
    pub fn release_all(self) -> (IFACE, D, Option<A>, Config) {
        (self.interface, self.delay, self.alert, self.config)
    }

    /// Provides mutable access to the underlying interface.
    ///
    /// Any transaction issued through it invalidates the fast-path pointer and
    /// the last triggered channel.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        self.pointer = None;
        self.last_channel = None;
        &mut self.interface
    }

    /// Returns a shared reference to the cached configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the channel of the last trigger write, if any.
    pub fn last_channel(&self) -> Option<u8> {
        self.last_channel
    }

    /// Returns whether an alert line was bound at construction.
    pub fn has_alert_pin(&self) -> bool {
        self.alert.is_some()
    }

    /// Returns the active poll policy.
    pub fn poll_policy(&self) -> PollPolicy {
        self.poll
    }

    /// Replaces the bounds used by ready-bit polling and alert waits.
    pub fn set_poll_policy(&mut self, poll: PollPolicy) {
        self.poll = poll;
    }
}

impl<I2C, V, D> Ads1x15<I2cInterface<I2C>, V, D, NoAlertPin>
where
    I2C: I2c,
    V: Variant,
    D: DelayNs,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I2C transports.
    pub fn new_i2c(i2c: I2C, address: u8, delay: D, config: Config) -> Result<Self, I2C::Error> {
        Self::new(I2cInterface::new(i2c, address), delay, config)
    }
}

impl<I2C, V, D, A> Ads1x15<I2cInterface<I2C>, V, D, A> {
    /// Releases the driver, returning the I2C bus and delay.
    pub fn release_i2c(self) -> (I2C, D) {
        let (iface, delay) = self.release();
        (iface.release(), delay)
    }
}

impl<IFACE, V, D, CommE> Ads1x15<IFACE, V, D, NoAlertPin>
where
    IFACE: Ads1x15Interface<Error = CommE>,
    V: Variant,
    D: DelayNs,
{
    /// Creates the driver and writes `config` to the device.
    ///
    /// The configuration is validated before any bus traffic. The currently
    /// selected input is read back and preserved.
    pub fn new(interface: IFACE, delay: D, config: Config) -> Result<Self, CommE> {
        Self::build(interface, delay, None, config)
    }
}

impl<IFACE, V, D, A, CommE> Ads1x15<IFACE, V, D, A>
where
    IFACE: Ads1x15Interface<Error = CommE>,
    V: Variant,
    D: DelayNs,
{
    // ==================================================================
    // == Construction & Fault Recovery =================================
    // ==================================================================
    /// Creates the driver with an ALERT/RDY input bound to `alert`.
    pub fn new_with_alert(interface: IFACE, delay: D, alert: A, config: Config) -> Result<Self, CommE> {
        Self::build(interface, delay, Some(alert), config)
    }

    fn build(interface: IFACE, delay: D, alert: Option<A>, config: Config) -> Result<Self, CommE> {
        config.validate::<V>()?;

        let mut device = Self {
            interface,
            delay,
            alert,
            config,
            poll: PollPolicy::default(),
            last_channel: None,
            pointer: None,
            _variant: PhantomData,
        };
        device.apply(config)?;
        debug!("{} configured", V::NAME);
        Ok(device)
    }

    /// Rewrites the whole device state from `config` after a bus fault.
    ///
    /// Controller state is reset first so nothing derived from the failed
    /// transport survives. The cached configuration is replaced only after
    /// every register write succeeded, so the call can simply be repeated.
    pub fn reinitialize(&mut self, config: Config) -> Result<(), CommE> {
        config.validate::<V>()?;

        self.last_channel = None;
        self.pointer = None;
        self.apply(config)?;
        debug!("{} reinitialized", V::NAME);
        Ok(())
    }

    /// Applies a new configuration, keeping the live input selection.
    pub fn configure(&mut self, config: Config) -> Result<(), CommE> {
        config.validate::<V>()?;
        self.apply(config)
    }

    /// Reads the configuration back from the device instead of the cache.
    ///
    /// On success the cache is replaced by what the device reports. A device
    /// found converting continuously keeps sampling its live input, so that
    /// input becomes the last triggered channel.
    pub fn read_live_config(&mut self) -> Result<Config, CommE> {
        let word = self.read_register(ConfigRegister::ADDRESS)?;
        let mut live = codec::decode::<V>(word)?;
        live.comparator_low_threshold = self.read_register(REG_LO_THRESH)? as i16;
        live.comparator_high_threshold = self.read_register(REG_HI_THRESH)? as i16;

        self.config = live;
        self.last_channel = (live.mode == Mode::Continuous)
            .then(|| codec::channel_of(word))
            .filter(|channel| *channel <= codec::MAX_CHANNEL);
        Ok(live)
    }

    // ==================================================================
    // == Conversions ===================================================
    // ==================================================================
    /// Samples single-ended input `channel` and returns the signed device code.
    pub fn read(&mut self, channel: u8) -> Result<i32, CommE> {
        if self.is_continuous_hit(channel) {
            return self.last_result();
        }

        self.trigger(channel)?;
        match self.config.mode {
            Mode::SingleShot => self.wait_until_ready()?,
            Mode::Continuous => self.delay.delay_us(self.config.settle_us()),
        }

        self.last_result()
    }

    /// Samples `channel` and scales the code to volts using the active gain.
    pub fn read_voltage(&mut self, channel: u8) -> Result<f32, CommE> {
        let code = self.read(channel)?;
        Ok(code as f32 * self.config.gain.full_scale_volts() / V::FULL_SCALE_CODE as f32)
    }

    /// Fetches the conversion register without starting a conversion.
    pub fn last_result(&mut self) -> Result<i32, CommE> {
        let raw = if self.pointer == Some(REG_CONVERSION) {
            self.interface.read_current().map_err(|err| {
                self.pointer = None;
                Error::interface(REG_CONVERSION, err)
            })?
        } else {
            self.read_register(REG_CONVERSION)?
        };

        Ok(V::interpret(raw))
    }

    // ==================================================================
    // == Internal Helpers ==============================================
    // ==================================================================
    fn is_continuous_hit(&self, channel: u8) -> bool {
        self.config.mode == Mode::Continuous && self.last_channel == Some(channel)
    }

    fn trigger(&mut self, channel: u8) -> Result<(), CommE> {
        let word = codec::encode::<V>(&self.config, channel)?;

        self.last_channel = None;
        self.write_register(ConfigRegister::ADDRESS, word)?;
        self.last_channel = Some(channel);
        Ok(())
    }

    fn wait_until_ready(&mut self) -> Result<(), CommE> {
        let polls = self.poll.max_polls();

        for attempt in 0..polls {
            let word = self.read_register(ConfigRegister::ADDRESS)?;
            if ConfigRegister::from(word).os() {
                return Ok(());
            }
            if attempt + 1 < polls {
                self.delay.delay_us(self.poll.interval_us());
            }
        }

        Err(Error::Timeout(TimeoutSource::ReadyBit))
    }

    fn apply(&mut self, config: Config) -> Result<(), CommE> {
        let live = self.read_register(ConfigRegister::ADDRESS)?;
        let word = codec::encode_with_mux::<V>(&config, codec::channel_of(live))?;

        self.write_register(REG_LO_THRESH, config.comparator_low_threshold as u16)?;
        self.write_register(REG_HI_THRESH, config.comparator_high_threshold as u16)?;
        self.write_register(ConfigRegister::ADDRESS, word)?;

        self.config = config;
        self.last_channel = None;
        Ok(())
    }

    fn write_register(&mut self, register: u8, value: u16) -> Result<(), CommE> {
        trace!("write {=u8:#x} <- {=u16:#x}", register, value);
        match self.interface.write_register(register, value) {
            Ok(()) => {
                self.pointer = Some(register);
                Ok(())
            }
            Err(err) => {
                self.pointer = None;
                Err(Error::interface(register, err))
            }
        }
    }

    fn read_register(&mut self, register: u8) -> Result<u16, CommE> {
        match self.interface.read_register(register) {
            Ok(value) => {
                self.pointer = Some(register);
                Ok(value)
            }
            Err(err) => {
                self.pointer = None;
                Err(Error::interface(register, err))
            }
        }
    }
}

impl<IFACE, V, D, A, CommE> Ads1x15<IFACE, V, D, A>
where
    IFACE: Ads1x15Interface<Error = CommE>,
    V: Variant,
    D: DelayNs,
    A: AlertLine,
{
    // ==================================================================
    // == Readiness Signal ==============================================
    // ==================================================================
    /// Blocks until an edge on the alert line or until `timeout` elapses.
    ///
    /// Returns whether an edge was seen. Fails with [`Error::NoAlertPin`] when
    /// the handle was built without an alert line.
    pub fn wait_for_alert(&mut self, timeout: core::time::Duration) -> Result<bool, CommE> {
        let policy = self.poll.with_timeout(timeout);
        let polarity = self.config.comparator_polarity;
        let line = self.alert.as_mut().ok_or(Error::NoAlertPin)?;

        line.wait_for_edge(&mut self.delay, polarity, &policy)
            .map_err(|err| Error::AlertPin(err.kind()))
    }

    /// Samples `channel`, using the alert line instead of the ready bit to
    /// detect completion.
    ///
    /// The device should be configured with
    /// [`ConfigBuilder::conversion_ready_alert`](crate::config::ConfigBuilder::conversion_ready_alert).
    /// In continuous mode a non-latching device only pulses ALERT/RDY for
    /// about 8 µs per conversion, so this fails with
    /// [`Error::AlertNotLatched`] unless the line latches edges.
    pub fn read_on_alert(&mut self, channel: u8, timeout: core::time::Duration) -> Result<i32, CommE> {
        let line = self.alert.as_mut().ok_or(Error::NoAlertPin)?;
        if !A::LATCHED
            && self.config.mode == Mode::Continuous
            && self.config.comparator_latch == ComparatorLatch::NonLatching
        {
            return Err(Error::AlertNotLatched);
        }

        line.arm().map_err(|err| Error::AlertPin(err.kind()))?;
        if !self.is_continuous_hit(channel) {
            self.trigger(channel)?;
        }
        if !self.wait_for_alert(timeout)? {
            return Err(Error::Timeout(TimeoutSource::AlertLine));
        }

        self.last_result()
    }
}

//! ALERT/RDY line handling.
//!
//! The comparator output can be wired to a GPIO and used as an edge-triggered
//! readiness signal instead of polling the `OS` bit. How the edge is observed
//! depends on the platform, so the driver only talks to an [`AlertLine`]:
//!
//! - [`SampledPin`] reads any `embedded-hal` [`InputPin`] at the
//!   [`PollPolicy`] interval and reports a transition from the idle level to
//!   the level selected by [`ComparatorPolarity`]. It can miss pulses shorter
//!   than the interval.
//! - [`LatchedEdge`] consumes a flag set by an edge interrupt handler and
//!   cannot miss a pulse.

use core::convert::Infallible;
use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin};

use crate::config::PollPolicy;
use crate::params::ComparatorPolarity;

/// Source of ALERT/RDY edges.
pub trait AlertLine {
    /// Error raised while observing the line.
    type Error: digital::Error;

    /// Whether edges are captured between calls, so that a pulse shorter than
    /// the poll interval is still reported.
    const LATCHED: bool;

    /// Discards edges seen so far. Called right before a conversion is started.
    fn arm(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Waits for the line to assert.
    ///
    /// Returns `Ok(false)` once `policy.timeout` has elapsed without an edge.
    fn wait_for_edge<D: DelayNs>(
        &mut self,
        delay: &mut D,
        polarity: ComparatorPolarity,
        policy: &PollPolicy,
    ) -> Result<bool, Self::Error>;
}

/// Placeholder line for handles constructed without an alert input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoAlertPin;

impl AlertLine for NoAlertPin {
    type Error = Infallible;
    const LATCHED: bool = false;

    fn wait_for_edge<D: DelayNs>(
        &mut self,
        _delay: &mut D,
        _polarity: ComparatorPolarity,
        _policy: &PollPolicy,
    ) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

/// Alert line observed by sampling a GPIO level.
#[derive(Debug)]
pub struct SampledPin<P> {
    pin: P,
}

impl<P: InputPin> SampledPin<P> {
    /// Wraps an input pin.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Returns the wrapped pin.
    pub fn release(self) -> P {
        self.pin
    }

    fn is_asserted(&mut self, polarity: ComparatorPolarity) -> Result<bool, P::Error> {
        match polarity {
            ComparatorPolarity::ActiveLow => self.pin.is_low(),
            ComparatorPolarity::ActiveHigh => self.pin.is_high(),
        }
    }
}

impl<P: InputPin> AlertLine for SampledPin<P> {
    type Error = P::Error;
    const LATCHED: bool = false;

    /// A line that is already asserted on entry has to return to idle first.
    fn wait_for_edge<D: DelayNs>(
        &mut self,
        delay: &mut D,
        polarity: ComparatorPolarity,
        policy: &PollPolicy,
    ) -> Result<bool, Self::Error> {
        let mut previous = self.is_asserted(polarity)?;

        for _ in 0..policy.max_polls() {
            delay.delay_us(policy.interval_us());
            let current = self.is_asserted(polarity)?;
            if current && !previous {
                return Ok(true);
            }
            previous = current;
        }

        Ok(false)
    }
}

/// Alert line backed by a flag that an edge interrupt handler sets.
///
/// The handler only has to store `true`; polarity is taken care of by the
/// edge the interrupt is configured for.
#[derive(Debug, Clone, Copy)]
pub struct LatchedEdge<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LatchedEdge<'a> {
    /// Binds to the flag written by the interrupt handler.
    pub const fn new(flag: &'a AtomicBool) -> Self {
        Self { flag }
    }

    // Edges landing between the load and the store coalesce with the one
    // being reported.
    fn take(&self) -> bool {
        if self.flag.load(Ordering::Acquire) {
            self.flag.store(false, Ordering::Release);
            true
        } else {
            false
        }
    }
}

impl AlertLine for LatchedEdge<'_> {
    type Error = Infallible;
    const LATCHED: bool = true;

    fn arm(&mut self) -> Result<(), Self::Error> {
        self.flag.store(false, Ordering::Release);
        Ok(())
    }

    fn wait_for_edge<D: DelayNs>(
        &mut self,
        delay: &mut D,
        _polarity: ComparatorPolarity,
        policy: &PollPolicy,
    ) -> Result<bool, Self::Error> {
        if self.take() {
            return Ok(true);
        }

        for _ in 0..policy.max_polls() {
            delay.delay_us(policy.interval_us());
            if self.take() {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

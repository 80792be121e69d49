//! Switch debouncing by consecutive-sample counting.
//!
//! A level is accepted once it has been read the same way `threshold` times in
//! a row. Every read of the opposite level restarts the other count, so a line
//! that flips on every sample never settles. That is a liveness hazard, not an
//! error: the caller simply keeps sampling.

use crate::config::DimmerConfig;
use crate::switch::SwitchLine;
use embedded_hal::delay::DelayNs;

/// Settled level of a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchState {
    Pressed,
    Released,
}

/// Debounce state machine, advanced one sample at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    pressed_streak: u8,
    released_streak: u8,
    threshold: u8,
}

impl Debouncer {
    /// Creates a debouncer settling after `threshold` identical samples.
    ///
    /// A threshold of zero is treated as one.
    pub const fn new(threshold: u8) -> Self {
        Self {
            pressed_streak: 0,
            released_streak: 0,
            threshold: if threshold == 0 { 1 } else { threshold },
        }
    }

    /// Feeds one raw sample.
    ///
    /// Returns `None` while neither streak has reached the threshold. Once one
    /// does, returns the settled state and starts over from zero.
    pub fn sample(&mut self, down: bool) -> Option<SwitchState> {
        if down {
            self.pressed_streak = self.pressed_streak.saturating_add(1);
            self.released_streak = 0;
        } else {
            self.released_streak = self.released_streak.saturating_add(1);
            self.pressed_streak = 0;
        }

        let settled = if self.pressed_streak >= self.threshold {
            SwitchState::Pressed
        } else if self.released_streak >= self.threshold {
            SwitchState::Released
        } else {
            return None;
        };

        self.reset();
        Some(settled)
    }

    /// Drops any partial streak.
    pub fn reset(&mut self) {
        self.pressed_streak = 0;
        self.released_streak = 0;
    }

    pub fn pressed_streak(&self) -> u8 {
        self.pressed_streak
    }

    pub fn released_streak(&self) -> u8 {
        self.released_streak
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(crate::config::DEBOUNCE_SAMPLES)
    }
}

/// Blocks until `line` settles and reports whether it settled pressed.
///
/// Samples every `config.sample_interval_ms`, sleeping after each sample
/// including the last, so the call takes at least
/// `debounce_samples * sample_interval_ms`. Does not return while the line
/// keeps alternating.
pub fn is_pressed<S, D>(line: &mut S, delay: &mut D, config: &DimmerConfig) -> bool
where
    S: SwitchLine + ?Sized,
    D: DelayNs,
{
    let mut debouncer = Debouncer::new(config.debounce_samples);
    let interval_ms = config.sample_interval_ms.min(u32::MAX as u64) as u32;

    loop {
        let settled = debouncer.sample(line.is_down());
        delay.delay_ms(interval_ms);
        if let Some(state) = settled {
            return state == SwitchState::Pressed;
        }
    }
}

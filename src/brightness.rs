//! Brightness state and its transitions.

use crate::config::{ConfigError, MAX_DUTY};

/// Current output level and the level to come back to after switching off.
///
/// Both values are percentages. `duty` stays within `0..=100`; once
/// `previous_duty` holds a non-zero level it never returns to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BrightnessState {
    duty: u8,
    previous_duty: u8,
}

impl BrightnessState {
    /// Light off, no remembered level.
    pub const fn new() -> Self {
        Self {
            duty: 0,
            previous_duty: 0,
        }
    }

    /// Builds a state from explicit levels.
    pub fn from_levels(duty: u8, previous_duty: u8) -> Result<Self, ConfigError> {
        if duty > MAX_DUTY {
            return Err(ConfigError::DutyOutOfRange(duty));
        }
        if previous_duty > MAX_DUTY {
            return Err(ConfigError::DutyOutOfRange(previous_duty));
        }
        Ok(Self {
            duty,
            previous_duty,
        })
    }

    pub fn duty(&self) -> u8 {
        self.duty
    }

    pub fn previous_duty(&self) -> u8 {
        self.previous_duty
    }

    pub fn is_on(&self) -> bool {
        self.duty != 0
    }

    /// Switches off, remembering the level, or back on.
    ///
    /// Switching on restores the remembered level, or `default_on` when
    /// nothing has been remembered yet. Always changes `duty`.
    pub fn toggle(&mut self, default_on: u8) {
        if self.duty != 0 {
            self.previous_duty = self.duty;
            self.duty = 0;
        } else if self.previous_duty != 0 {
            self.duty = self.previous_duty;
        } else {
            let level = default_on.clamp(1, MAX_DUTY);
            self.duty = level;
            self.previous_duty = level;
        }
    }

    /// One percent up, saturating at 100. Returns whether `duty` changed.
    pub fn increase(&mut self) -> bool {
        if self.duty >= MAX_DUTY {
            return false;
        }
        self.duty += 1;
        self.previous_duty = self.duty;
        true
    }

    /// One percent down, stopping at 0. Returns whether `duty` changed.
    ///
    /// Reaching zero keeps the last non-zero level as `previous_duty`.
    pub fn decrease(&mut self) -> bool {
        if self.duty == 0 {
            return false;
        }
        self.duty -= 1;
        if self.duty != 0 {
            self.previous_duty = self.duty;
        }
        true
    }
}

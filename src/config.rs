//! Compile-time defaults and start-up validation.

/// PWM counter wrap value. The counter runs `0..=PERIOD`, i.e. 1000 ticks.
pub const DEFAULT_PERIOD: u16 = 999;

/// Integer clock divider: 125 MHz system clock / 125 = 1 MHz counter tick.
pub const DEFAULT_DIVIDER: u8 = 125;

/// Level used the first time the light is toggled on.
pub const DEFAULT_ON_DUTY: u8 = 50;

/// Pause between two auto-repeat steps of a held increase/decrease button.
pub const REPEAT_INTERVAL_MS: u64 = 100;

/// Consecutive identical samples needed to accept a switch level.
pub const DEBOUNCE_SAMPLES: u8 = 3;

/// Time between two debounce samples.
pub const SAMPLE_INTERVAL_MS: u64 = 10;

/// Highest duty cycle, in percent.
pub const MAX_DUTY: u8 = 100;

/// Configuration errors detected before the control loop starts.
///
/// Any of these means the hardware cannot be set up as requested. The
/// firmware has no recovery path, so callers treat them as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// PWM period of zero ticks.
    ZeroPeriod,

    /// `period + 1` does not fit the 16-bit compare register.
    PeriodOverflow(u16),

    /// Clock divider of zero.
    ZeroDivider,

    /// Duty level outside the accepted range.
    DutyOutOfRange(u8),

    /// Debounce threshold of zero samples.
    ZeroDebounceSamples,

    /// Sample interval of zero milliseconds.
    ZeroSampleInterval,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroPeriod => write!(f, "PWM period must be at least one tick"),
            ConfigError::PeriodOverflow(period) => {
                write!(f, "PWM period {} leaves no room for a 100% compare level", period)
            }
            ConfigError::ZeroDivider => write!(f, "PWM clock divider must be non-zero"),
            ConfigError::DutyOutOfRange(duty) => {
                write!(f, "duty {}% is outside the accepted range", duty)
            }
            ConfigError::ZeroDebounceSamples => {
                write!(f, "debounce threshold must be at least one sample")
            }
            ConfigError::ZeroSampleInterval => {
                write!(f, "debounce sample interval must be non-zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Settings shared by every PWM slice driving an LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmConfig {
    /// Counter wrap value (TOP).
    pub period: u16,

    /// Integer clock divider.
    pub divider: u8,
}

impl PwmConfig {
    /// Firmware defaults: 1 kHz output from a 125 MHz system clock.
    pub const DEFAULT: Self = Self {
        period: DEFAULT_PERIOD,
        divider: DEFAULT_DIVIDER,
    };

    /// Checks that the period and divider can be programmed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.period == u16::MAX {
            return Err(ConfigError::PeriodOverflow(self.period));
        }
        if self.divider == 0 {
            return Err(ConfigError::ZeroDivider);
        }
        Ok(())
    }

    /// Converts a duty percentage into a raw compare level.
    ///
    /// `(period + 1) * duty / 100`, truncating. Duty above 100 is clamped.
    #[inline]
    pub fn compare_level(&self, duty: u8) -> u16 {
        let duty = duty.min(MAX_DUTY) as u32;
        ((self.period as u32 + 1) * duty / MAX_DUTY as u32) as u16
    }

    /// Output frequency for a given system clock.
    pub fn output_frequency_hz(&self, system_clock_hz: u32) -> u32 {
        let ticks_per_period = self.divider as u32 * (self.period as u32 + 1);
        if ticks_per_period == 0 {
            return 0;
        }
        system_clock_hz / ticks_per_period
    }
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete dimmer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DimmerConfig {
    pub pwm: PwmConfig,

    /// Level restored by the first toggle-on (1..=100).
    pub default_on_duty: u8,

    /// Pause between auto-repeat steps, in milliseconds.
    pub repeat_interval_ms: u64,

    /// Consecutive samples needed to settle a switch level.
    pub debounce_samples: u8,

    /// Time between debounce samples, in milliseconds.
    pub sample_interval_ms: u64,
}

impl DimmerConfig {
    pub const DEFAULT: Self = Self {
        pwm: PwmConfig::DEFAULT,
        default_on_duty: DEFAULT_ON_DUTY,
        repeat_interval_ms: REPEAT_INTERVAL_MS,
        debounce_samples: DEBOUNCE_SAMPLES,
        sample_interval_ms: SAMPLE_INTERVAL_MS,
    };

    /// Validates every field. Called by the controller before touching hardware.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pwm.validate()?;
        if self.default_on_duty == 0 || self.default_on_duty > MAX_DUTY {
            return Err(ConfigError::DutyOutOfRange(self.default_on_duty));
        }
        if self.debounce_samples == 0 {
            return Err(ConfigError::ZeroDebounceSamples);
        }
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        Ok(())
    }
}

impl Default for DimmerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_duty_maps_to_half_period() {
        assert_eq!(PwmConfig::DEFAULT.compare_level(50), 500);
    }

    #[test]
    fn compare_level_covers_full_range() {
        let pwm = PwmConfig::DEFAULT;
        assert_eq!(pwm.compare_level(0), 0);
        assert_eq!(pwm.compare_level(1), 10);
        assert_eq!(pwm.compare_level(100), 1000);
        // clamped
        assert_eq!(pwm.compare_level(200), 1000);
    }

    #[test]
    fn compare_level_truncates() {
        let pwm = PwmConfig {
            period: 254,
            divider: 1,
        };
        // 255 * 33 / 100 = 84.15
        assert_eq!(pwm.compare_level(33), 84);
    }

    #[test]
    fn default_pwm_runs_at_one_kilohertz() {
        assert_eq!(PwmConfig::DEFAULT.output_frequency_hz(125_000_000), 1_000);
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(DimmerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn invalid_pwm_settings_are_rejected() {
        let zero_period = PwmConfig {
            period: 0,
            divider: 125,
        };
        assert_eq!(zero_period.validate(), Err(ConfigError::ZeroPeriod));

        let overflow = PwmConfig {
            period: u16::MAX,
            divider: 125,
        };
        assert_eq!(
            overflow.validate(),
            Err(ConfigError::PeriodOverflow(u16::MAX))
        );

        let zero_divider = PwmConfig {
            period: 999,
            divider: 0,
        };
        assert_eq!(zero_divider.validate(), Err(ConfigError::ZeroDivider));
    }

    #[test]
    fn invalid_dimmer_settings_are_rejected() {
        let config = DimmerConfig {
            default_on_duty: 0,
            ..DimmerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::DutyOutOfRange(0)));

        let config = DimmerConfig {
            default_on_duty: 101,
            ..DimmerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::DutyOutOfRange(101)));

        let config = DimmerConfig {
            debounce_samples: 0,
            ..DimmerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDebounceSamples));

        let config = DimmerConfig {
            sample_interval_ms: 0,
            ..DimmerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSampleInterval));
    }
}

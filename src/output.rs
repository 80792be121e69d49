//! PWM output channels driven in lockstep.

use embedded_hal::pwm::SetDutyCycle;

/// One LED output path with a programmable compare level.
///
/// The level is a raw counter value in `0..=period + 1`; see
/// [`crate::PwmConfig::compare_level`]. Handle hardware errors internally,
/// this method cannot fail.
pub trait PwmChannel {
    fn set_compare_level(&mut self, level: u16);
}

impl<C: PwmChannel + ?Sized> PwmChannel for &mut C {
    fn set_compare_level(&mut self, level: u16) {
        (**self).set_compare_level(level)
    }
}

/// Adapter for any `embedded-hal` PWM channel.
///
/// The compare level is passed through unchanged, so the channel's counter
/// must be configured with the same period the dimmer uses.
pub struct DutyCycleChannel<P: SetDutyCycle> {
    pwm: P,
}

impl<P: SetDutyCycle> DutyCycleChannel<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }

    pub fn into_inner(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> PwmChannel for DutyCycleChannel<P> {
    fn set_compare_level(&mut self, level: u16) {
        let _ = self.pwm.set_duty_cycle(level);
    }
}

/// A fixed set of channels which always carry the same compare level.
///
/// There is no way to address a single channel: every write goes to all of
/// them, so the outputs cannot drift apart.
pub struct ChannelBank<C: PwmChannel, const N: usize> {
    channels: [C; N],
    level: u16,
}

impl<C: PwmChannel, const N: usize> ChannelBank<C, N> {
    /// Wraps the channels. Nothing is written until [`Self::write`].
    pub fn new(channels: [C; N]) -> Self {
        Self { channels, level: 0 }
    }

    /// Writes `level` to every channel.
    pub fn write(&mut self, level: u16) {
        for channel in self.channels.iter_mut() {
            channel.set_compare_level(level);
        }
        self.level = level;
    }

    /// Last level written.
    pub fn level(&self) -> u16 {
        self.level
    }

    pub fn channels(&self) -> &[C; N] {
        &self.channels
    }

    pub fn into_channels(self) -> [C; N] {
        self.channels
    }
}

//! Three-button brightness controller.
//!
//! Provides [`BrightnessController`], which polls the toggle, increase and
//! decrease switches, debounces them, updates the [`BrightnessState`] and
//! writes the resulting compare level to every channel of a [`ChannelBank`].
//!
//! The controller is a polled state machine. Each [`BrightnessController::service`]
//! call takes at most one switch sample and returns how long to wait before the
//! next call: one sample interval while debouncing or idle, the remaining
//! repeat interval while a held button waits for its next step.
//!
//! A button that is being debounced or auto-repeats owns the loop. The other
//! two are not polled until it settles released, so holding "increase" makes
//! toggle and decrease unresponsive for as long as it is held.

use crate::brightness::BrightnessState;
use crate::command::{Button, DutyChange};
use crate::config::{ConfigError, DimmerConfig};
use crate::debounce::{Debouncer, SwitchState};
use crate::output::{ChannelBank, PwmChannel};
use crate::switch::SwitchLine;
use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// The switch lines of the three buttons.
pub struct Switches<S: SwitchLine> {
    pub toggle: S,
    pub increase: S,
    pub decrease: S,
}

impl<S: SwitchLine> Switches<S> {
    pub fn new(toggle: S, increase: S, decrease: S) -> Self {
        Self {
            toggle,
            increase,
            decrease,
        }
    }

    fn line(&mut self, button: Button) -> &mut S {
        match button {
            Button::Toggle => &mut self.toggle,
            Button::Increase => &mut self.increase,
            Button::Decrease => &mut self.decrease,
        }
    }
}

/// Result of one service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServiceReport<D> {
    /// Brightness change made during this call, if any.
    pub change: Option<DutyChange>,

    /// Wait this long before calling `service` again.
    pub next_service: D,
}

impl<D> ServiceReport<D> {
    fn wait(next_service: D) -> Self {
        Self {
            change: None,
            next_service,
        }
    }
}

/// What the busy button is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase<I> {
    /// Collecting samples until the debouncer settles.
    Debouncing,
    /// A held button stepped at `since` and waits for the repeat interval.
    Repeating { since: I },
}

/// Polled brightness controller for three buttons and N slaved PWM channels.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `S` - Switch line type, shared by all three buttons
/// * `C` - PWM channel type
/// * `N` - Number of channels driven in lockstep
pub struct BrightnessController<
    't,
    I: TimeInstant,
    T: TimeSource<I>,
    S: SwitchLine,
    C: PwmChannel,
    const N: usize,
> {
    config: DimmerConfig,
    time_source: &'t T,
    switches: Switches<S>,
    outputs: ChannelBank<C, N>,
    state: BrightnessState,
    debouncer: Debouncer,
    toggle_held: bool,
    busy: Option<(Button, Phase<I>)>,
}

impl<'t, I, T, S, C, const N: usize> BrightnessController<'t, I, T, S, C, N>
where
    I: TimeInstant,
    T: TimeSource<I>,
    S: SwitchLine,
    C: PwmChannel,
{
    /// Validates `config` and writes the initial level (light off) to every
    /// channel.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found in `config`. Nothing is written
    /// to the outputs in that case.
    pub fn new(
        config: DimmerConfig,
        time_source: &'t T,
        switches: Switches<S>,
        mut outputs: ChannelBank<C, N>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let state = BrightnessState::new();
        outputs.write(config.pwm.compare_level(state.duty()));

        Ok(Self {
            config,
            time_source,
            switches,
            outputs,
            state,
            debouncer: Debouncer::new(config.debounce_samples),
            toggle_held: false,
            busy: None,
        })
    }

    /// Advances the control loop by one step.
    ///
    /// Never fails: out-of-range levels are prevented by the state transitions.
    pub fn service(&mut self) -> ServiceReport<I::Duration> {
        let now = self.time_source.now();

        let (button, phase) = match self.busy {
            Some(busy) => busy,
            None => match self.scan() {
                Some(button) => (button, Phase::Debouncing),
                None => return ServiceReport::wait(self.sample_interval()),
            },
        };

        if let Phase::Repeating { since } = phase {
            let repeat = I::Duration::from_millis(self.config.repeat_interval_ms);
            let elapsed = now.duration_since(since);
            if elapsed.as_millis() < repeat.as_millis() {
                return ServiceReport::wait(repeat.saturating_sub(elapsed));
            }
        }

        self.busy = Some((button, Phase::Debouncing));
        self.sample(button, now)
    }

    /// Applies one confirmed press of `button` and updates the outputs.
    ///
    /// This bypasses the switches and the debouncer. Returns the change, or
    /// `None` when the level is already at its limit.
    pub fn press(&mut self, button: Button) -> Option<DutyChange> {
        let from = self.state.duty();
        let changed = match button {
            Button::Toggle => {
                self.state.toggle(self.config.default_on_duty);
                true
            }
            Button::Increase => self.state.increase(),
            Button::Decrease => self.state.decrease(),
        };

        if !changed {
            return None;
        }

        let to = self.state.duty();
        let level = self.config.pwm.compare_level(to);
        self.outputs.write(level);

        #[cfg(feature = "defmt")]
        defmt::debug!("{}: duty {}% -> {}% (level {})", button, from, to, level);

        Some(DutyChange {
            button,
            from,
            to,
            level,
        })
    }

    /// Looks for a button to serve, in toggle, increase, decrease order.
    ///
    /// The toggle latch is released here from the raw read, not from a
    /// debounced one.
    fn scan(&mut self) -> Option<Button> {
        let toggle_down = self.switches.toggle.is_down();
        let button = if toggle_down && !self.toggle_held {
            Button::Toggle
        } else {
            if !toggle_down {
                self.toggle_held = false;
            }
            if self.switches.increase.is_down() {
                Button::Increase
            } else if self.switches.decrease.is_down() {
                Button::Decrease
            } else {
                return None;
            }
        };

        self.debouncer.reset();
        Some(button)
    }

    fn sample(&mut self, button: Button, now: I) -> ServiceReport<I::Duration> {
        let down = self.switches.line(button).is_down();

        match self.debouncer.sample(down) {
            None => ServiceReport::wait(self.sample_interval()),
            Some(SwitchState::Released) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("{}: settled released", button);

                self.busy = None;
                ServiceReport::wait(self.sample_interval())
            }
            Some(SwitchState::Pressed) => self.confirm(button, now),
        }
    }

    fn confirm(&mut self, button: Button, now: I) -> ServiceReport<I::Duration> {
        let change = self.press(button);

        let next_service = if button.auto_repeats() {
            if change.is_some() {
                self.busy = Some((button, Phase::Repeating { since: now }));
                I::Duration::from_millis(self.config.repeat_interval_ms)
            } else {
                // at the limit: keep confirming the hold without stepping
                self.sample_interval()
            }
        } else {
            self.toggle_held = true;
            self.busy = None;
            self.sample_interval()
        };

        ServiceReport {
            change,
            next_service,
        }
    }

    fn sample_interval(&self) -> I::Duration {
        I::Duration::from_millis(self.config.sample_interval_ms)
    }

    /// Current brightness state.
    pub fn state(&self) -> BrightnessState {
        self.state
    }

    /// Current duty, in percent.
    pub fn duty(&self) -> u8 {
        self.state.duty()
    }

    /// Compare level currently on every channel.
    pub fn level(&self) -> u16 {
        self.outputs.level()
    }

    /// The button that currently owns the loop, if any.
    pub fn busy_button(&self) -> Option<Button> {
        self.busy.map(|(button, _)| button)
    }

    /// True while the toggle button waits to be released.
    pub fn is_toggle_latched(&self) -> bool {
        self.toggle_held
    }

    pub fn config(&self) -> &DimmerConfig {
        &self.config
    }

    pub fn outputs(&self) -> &ChannelBank<C, N> {
        &self.outputs
    }

    /// Gives back the switches and the channel bank.
    pub fn into_parts(self) -> (Switches<S>, ChannelBank<C, N>) {
        (self.switches, self.outputs)
    }
}

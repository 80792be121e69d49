#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Debouncer`**: Counts consecutive identical samples of a switch until one level wins
//! - **`is_pressed`**: Blocking debounce of a single line, built on `Debouncer`
//! - **`BrightnessState`**: Current duty plus the level to restore after switching off
//! - **`BrightnessController`**: Polls the three buttons and keeps every channel at the current duty
//! - **`ChannelBank`**: A fixed set of PWM channels that only ever receive the same level
//! - **`SwitchLine`**: Trait to implement for your button inputs
//! - **`PwmChannel`**: Trait to implement for your PWM outputs
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`DimmerConfig`**: Period, divider, default level and timing constants
//!
//! Duty is an integer percentage (0-100). It is turned into a raw compare
//! level with `(period + 1) * duty / 100` before it reaches the hardware.

pub mod brightness;
pub mod command;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod output;
pub mod switch;
pub mod time;

pub use brightness::BrightnessState;
pub use command::{Button, DutyChange};
pub use config::{ConfigError, DimmerConfig, PwmConfig};
pub use controller::{BrightnessController, ServiceReport, Switches};
pub use debounce::{Debouncer, SwitchState, is_pressed};
pub use output::{ChannelBank, DutyCycleChannel, PwmChannel};
pub use switch::{PullUpSwitch, SwitchLine};
pub use time::{TimeDuration, TimeInstant, TimeSource};

/// Number of LEDs on the reference board.
pub const LED_COUNT: usize = 3;

/// Controller driving [`LED_COUNT`] channels.
pub type BrightnessController3<'t, I, T, S, C> = BrightnessController<'t, I, T, S, C, LED_COUNT>;

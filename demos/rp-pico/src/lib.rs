#![no_std]

//! Board support for running pwm-dimmer on a Raspberry Pi Pico.

pub mod time;

/// Brightens while held (GPIO 9).
pub const INCREASE_SWITCH_GPIO: u8 = 9;
/// Switches off and back on (GPIO 8).
pub const TOGGLE_SWITCH_GPIO: u8 = 8;
/// Dims while held (GPIO 7).
pub const DECREASE_SWITCH_GPIO: u8 = 7;

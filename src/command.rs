//! Logical buttons and the changes they cause.

/// The three logical buttons of the dimmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Switch off, or back on at the remembered level.
    Toggle,
    /// Hold to brighten.
    Increase,
    /// Hold to dim.
    Decrease,
}

impl Button {
    /// True for buttons that keep stepping while held.
    pub fn auto_repeats(&self) -> bool {
        matches!(self, Button::Increase | Button::Decrease)
    }
}

/// One brightness change, as written to the outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyChange {
    pub button: Button,
    /// Duty before the press, in percent.
    pub from: u8,
    /// Duty after the press, in percent.
    pub to: u8,
    /// Raw compare level written to every channel.
    pub level: u16,
}

//! Switch input abstraction.

use embedded_hal::digital::InputPin;

/// A push-button line which is either down (pressed) or up (released).
///
/// Implement this for whatever reads your buttons. `is_down` is a raw read,
/// no filtering is expected; debouncing happens in [`crate::Debouncer`].
pub trait SwitchLine {
    /// Returns true while the button is held down.
    fn is_down(&mut self) -> bool;
}

impl<S: SwitchLine + ?Sized> SwitchLine for &mut S {
    fn is_down(&mut self) -> bool {
        (**self).is_down()
    }
}

/// Button wired between the pin and ground, with the pin pulled up.
///
/// Pressed reads electrically low. A failed read counts as released.
pub struct PullUpSwitch<P: InputPin> {
    pin: P,
}

impl<P: InputPin> PullUpSwitch<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Returns the wrapped pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> SwitchLine for PullUpSwitch<P> {
    fn is_down(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }
}

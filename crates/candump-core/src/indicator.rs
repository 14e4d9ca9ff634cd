//! Receive indicator (typically an LED).

use embedded_hal::digital::{OutputPin, PinState};

/// Which pin level lights the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorState {
    Off,
    On,
}

impl Polarity {
    /// Pin level that realises `state`.
    pub const fn level(self, state: IndicatorState) -> PinState {
        match (self, state) {
            (Polarity::ActiveHigh, IndicatorState::On)
            | (Polarity::ActiveLow, IndicatorState::Off) => PinState::High,
            (Polarity::ActiveHigh, IndicatorState::Off)
            | (Polarity::ActiveLow, IndicatorState::On) => PinState::Low,
        }
    }
}

/// Drives an output pin from a logical on/off state.
///
/// The pin is only written when the logical state changes.
pub struct Indicator<P: OutputPin> {
    pin: P,
    polarity: Polarity,
    state: IndicatorState,
}

impl<P: OutputPin> Indicator<P> {
    /// Takes ownership of `pin` and switches it off.
    pub fn configure(mut pin: P, polarity: Polarity) -> Result<Self, P::Error> {
        pin.set_state(polarity.level(IndicatorState::Off))?;
        Ok(Self { pin, polarity, state: IndicatorState::Off })
    }

    pub fn set(&mut self, state: IndicatorState) -> Result<(), P::Error> {
        if state != self.state {
            self.pin.set_state(self.polarity.level(state))?;
            self.state = state;
        }
        Ok(())
    }

    pub fn state(&self) -> IndicatorState {
        self.state
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Releases the pin.
    pub fn free(self) -> P {
        self.pin
    }
}

//! ESP32-C3 pin map.
//!
//! Pins arrive as plain numbers from the build configuration, so they are
//! checked against the chip's GPIO matrix here before anything is stolen.

use candump_core::{Config, ConfigError, IndicatorState, Polarity};
use embedded_hal::digital::PinState;
use esp_hal::gpio::{AnyPin, Level, Output, OutputConfig};

/// Highest GPIO number on the ESP32-C3.
pub const MAX_GPIO: u8 = 21;

/// Wired to the in-package SPI flash.
const FLASH_PINS: core::ops::RangeInclusive<u8> = 12..=17;

/// USB-Serial-JTAG D-/D+, which carry the console.
const USB_PINS: [u8; 2] = [18, 19];

/// Rejects a GPIO that does not exist or is claimed by the board.
pub fn check_pin(pin: u8) -> Result<u8, ConfigError> {
    if pin > MAX_GPIO || FLASH_PINS.contains(&pin) || USB_PINS.contains(&pin)
    {
        return Err(ConfigError::InvalidPin(pin));
    }
    Ok(pin)
}

/// Checks every pin the configuration names.
pub fn check_config(config: &Config) -> Result<(), ConfigError> {
    check_pin(config.bus.pins.tx)?;
    check_pin(config.bus.pins.rx)?;
    if let Some(indicator) = &config.indicator {
        check_pin(indicator.pin)?;
    }
    Ok(())
}

/// Takes a GPIO by number.
///
/// # Safety
///
/// `pin` must have passed [`check_pin`] and must not be in use anywhere else.
pub unsafe fn take_pin(pin: u8) -> AnyPin<'static> {
    AnyPin::steal(pin)
}

/// Indicator output, parked at its inactive level.
///
/// # Safety
///
/// As for [`take_pin`].
pub unsafe fn indicator_output(pin: u8, polarity: Polarity) -> Output<'static> {
    let level = match polarity.level(IndicatorState::Off) {
        PinState::High => Level::High,
        PinState::Low => Level::Low,
    };
    Output::new(take_pin(pin), level, OutputConfig::default())
}

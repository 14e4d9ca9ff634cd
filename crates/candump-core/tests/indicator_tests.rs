mod common;

use candump_core::{Indicator, IndicatorState, Polarity};
use common::MockPin;
use embedded_hal::digital::PinState;

#[test]
fn configure_switches_off() {
    let pin = MockPin::default();
    let led = Indicator::configure(pin.clone(), Polarity::ActiveHigh).unwrap();
    assert_eq!(led.state(), IndicatorState::Off);
    assert_eq!(pin.history(), vec![PinState::Low]);

    let pin = MockPin::default();
    let _led = Indicator::configure(pin.clone(), Polarity::ActiveLow).unwrap();
    assert_eq!(pin.history(), vec![PinState::High]);
}

#[test]
fn polarity_maps_levels() {
    assert_eq!(Polarity::ActiveHigh.level(IndicatorState::On), PinState::High);
    assert_eq!(Polarity::ActiveHigh.level(IndicatorState::Off), PinState::Low);
    assert_eq!(Polarity::ActiveLow.level(IndicatorState::On), PinState::Low);
    assert_eq!(Polarity::ActiveLow.level(IndicatorState::Off), PinState::High);
}

#[test]
fn set_drives_active_level() {
    for polarity in [Polarity::ActiveHigh, Polarity::ActiveLow] {
        let pin = MockPin::default();
        let mut led = Indicator::configure(pin.clone(), polarity).unwrap();

        led.set(IndicatorState::On).unwrap();
        assert_eq!(pin.level(), Some(polarity.level(IndicatorState::On)));
        assert_eq!(led.state(), IndicatorState::On);

        led.set(IndicatorState::Off).unwrap();
        assert_eq!(pin.level(), Some(polarity.level(IndicatorState::Off)));
        assert_eq!(led.state(), IndicatorState::Off);
    }
}

#[test]
fn repeated_set_is_a_no_op() {
    let pin = MockPin::default();
    let mut led = Indicator::configure(pin.clone(), Polarity::ActiveLow).unwrap();

    led.set(IndicatorState::Off).unwrap();
    led.set(IndicatorState::Off).unwrap();
    assert_eq!(pin.history(), vec![PinState::High]);

    led.set(IndicatorState::On).unwrap();
    led.set(IndicatorState::On).unwrap();
    assert_eq!(pin.history(), vec![PinState::High, PinState::Low]);
}

#[test]
fn free_returns_pin() {
    let pin = MockPin::default();
    let led = Indicator::configure(pin.clone(), Polarity::ActiveHigh).unwrap();
    assert_eq!(led.polarity(), Polarity::ActiveHigh);
    let released = led.free();
    assert_eq!(released.history(), pin.history());
}

//! Bus and indicator configuration.
//!
//! Values are parsed from the strings the firmware build script exports, then
//! passed by value into the session and the indicator. Nothing here is global.

use core::fmt;
use core::str::FromStr;

use crate::error::ConfigError;
use crate::indicator::Polarity;

/// Standard bus bit-rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitRate {
    Mbit1,
    Kbit800,
    Kbit500,
    Kbit250,
    Kbit125,
    Kbit100,
    Kbit50,
    Kbit25,
}

/// Controller bit-timing, in time quanta, for an 80 MHz APB clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitTiming {
    pub prescaler: u16,
    pub tseg_1: u8,
    pub tseg_2: u8,
    pub sjw: u8,
    pub triple_sample: bool,
}

impl BitTiming {
    /// Bit length in time quanta, including the sync segment.
    pub const fn quanta_per_bit(&self) -> u32 {
        1 + self.tseg_1 as u32 + self.tseg_2 as u32
    }
}

pub const APB_CLOCK_HZ: u32 = 80_000_000;

impl BitRate {
    pub const ALL: [BitRate; 8] = [
        BitRate::Mbit1,
        BitRate::Kbit800,
        BitRate::Kbit500,
        BitRate::Kbit250,
        BitRate::Kbit125,
        BitRate::Kbit100,
        BitRate::Kbit50,
        BitRate::Kbit25,
    ];

    pub const fn bits_per_second(self) -> u32 {
        match self {
            BitRate::Mbit1 => 1_000_000,
            BitRate::Kbit800 => 800_000,
            BitRate::Kbit500 => 500_000,
            BitRate::Kbit250 => 250_000,
            BitRate::Kbit125 => 125_000,
            BitRate::Kbit100 => 100_000,
            BitRate::Kbit50 => 50_000,
            BitRate::Kbit25 => 25_000,
        }
    }

    pub const fn timing(self) -> BitTiming {
        const fn t(prescaler: u16, tseg_1: u8, tseg_2: u8) -> BitTiming {
            BitTiming { prescaler, tseg_1, tseg_2, sjw: 3, triple_sample: false }
        }
        match self {
            BitRate::Mbit1 => t(4, 15, 4),
            BitRate::Kbit800 => t(4, 16, 8),
            BitRate::Kbit500 => t(8, 15, 4),
            BitRate::Kbit250 => t(16, 15, 4),
            BitRate::Kbit125 => t(32, 15, 4),
            BitRate::Kbit100 => t(40, 15, 4),
            BitRate::Kbit50 => t(80, 15, 4),
            BitRate::Kbit25 => t(128, 16, 8),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BitRate::Mbit1 => "1 Mbit/s",
            BitRate::Kbit800 => "800 kbit/s",
            BitRate::Kbit500 => "500 kbit/s",
            BitRate::Kbit250 => "250 kbit/s",
            BitRate::Kbit125 => "125 kbit/s",
            BitRate::Kbit100 => "100 kbit/s",
            BitRate::Kbit50 => "50 kbit/s",
            BitRate::Kbit25 => "25 kbit/s",
        }
    }
}

impl fmt::Display for BitRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BitRate {
    type Err = ConfigError;

    /// Accepts `1M`, `800k` ... `25k`, or the plain rate in bit/s.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let rate = match s {
            "1M" | "1m" | "1000k" | "1000K" => BitRate::Mbit1,
            "800k" | "800K" => BitRate::Kbit800,
            "500k" | "500K" => BitRate::Kbit500,
            "250k" | "250K" => BitRate::Kbit250,
            "125k" | "125K" => BitRate::Kbit125,
            "100k" | "100K" => BitRate::Kbit100,
            "50k" | "50K" => BitRate::Kbit50,
            "25k" | "25K" => BitRate::Kbit25,
            _ => {
                let bps: u32 =
                    s.parse().map_err(|_| ConfigError::InvalidBitRate)?;
                Self::ALL
                    .into_iter()
                    .find(|rate| rate.bits_per_second() == bps)
                    .ok_or(ConfigError::InvalidBitRate)?
            }
        };
        Ok(rate)
    }
}

impl FromStr for Polarity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active-high" | "high" => Ok(Polarity::ActiveHigh),
            "active-low" | "low" => Ok(Polarity::ActiveLow),
            _ => Err(ConfigError::InvalidPolarity),
        }
    }
}

/// Parses a GPIO number.
pub fn parse_gpio(s: &str) -> Result<u8, ConfigError> {
    s.trim().parse().map_err(|_| ConfigError::InvalidPinNumber)
}

/// Parses a `y`/`n` style flag.
pub fn parse_flag(s: &str) -> Result<bool, ConfigError> {
    match s.trim() {
        "y" | "yes" | "1" | "true" | "on" => Ok(true),
        "n" | "no" | "0" | "false" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag),
    }
}

/// Transceiver pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusPins {
    pub tx: u8,
    pub rx: u8,
}

/// Everything the bus controller needs at install time.
///
/// The acceptance filter is always accept-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    pub bit_rate: BitRate,
    pub pins: BusPins,
}

impl BusConfig {
    pub const fn new(bit_rate: BitRate, tx: u8, rx: u8) -> Self {
        Self { bit_rate, pins: BusPins { tx, rx } }
    }

    /// Rejects a configuration that routes TX and RX to the same pin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pins.tx == self.pins.rx {
            return Err(ConfigError::PinConflict(self.pins.tx));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorConfig {
    pub pin: u8,
    pub polarity: Polarity,
}

/// Complete firmware configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub bus: BusConfig,
    pub indicator: Option<IndicatorConfig>,
}

/// Raw configuration strings as exported by the build script.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawConfig<'a> {
    pub bit_rate: &'a str,
    pub tx_gpio: &'a str,
    pub rx_gpio: &'a str,
    pub led_enabled: &'a str,
    pub led_gpio: &'a str,
    pub led_polarity: &'a str,
}

impl Config {
    pub fn parse(raw: &RawConfig<'_>) -> Result<Self, ConfigError> {
        let bus = BusConfig::new(
            raw.bit_rate.parse()?,
            parse_gpio(raw.tx_gpio)?,
            parse_gpio(raw.rx_gpio)?,
        );
        bus.validate()?;

        let indicator = if parse_flag(raw.led_enabled)? {
            let pin = parse_gpio(raw.led_gpio)?;
            if pin == bus.pins.tx || pin == bus.pins.rx {
                return Err(ConfigError::PinConflict(pin));
            }
            Some(IndicatorConfig { pin, polarity: raw.led_polarity.parse()? })
        } else {
            None
        };

        Ok(Self { bus, indicator })
    }
}

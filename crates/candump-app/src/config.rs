//! Build-time configuration.

use candump_core::config::RawConfig;
use candump_core::{Config, ConfigError};

use crate::board;

/// Strings exported by `build.rs`.
pub const RAW: RawConfig<'static> = RawConfig {
    bit_rate: env!("CANDUMP_BITRATE"),
    tx_gpio: env!("CANDUMP_TX_GPIO"),
    rx_gpio: env!("CANDUMP_RX_GPIO"),
    led_enabled: env!("CANDUMP_RX_LED"),
    led_gpio: env!("CANDUMP_RX_LED_GPIO"),
    led_polarity: env!("CANDUMP_RX_LED_POLARITY"),
};

/// Parses the build configuration and checks its pins against the board.
pub fn from_build_env() -> Result<Config, ConfigError> {
    let config = Config::parse(&RAW)?;
    board::check_config(&config)?;
    Ok(config)
}

use embassy_time::Duration;

use crate::config::BusConfig;
use crate::frame::Frame;

/// Bound for driver error types, so they can be logged with whichever
/// backend is enabled.
#[cfg(feature = "defmt")]
pub trait DriverError: core::fmt::Debug + defmt::Format {}
#[cfg(feature = "defmt")]
impl<T: core::fmt::Debug + defmt::Format> DriverError for T {}

#[cfg(not(feature = "defmt"))]
pub trait DriverError: core::fmt::Debug {}
#[cfg(not(feature = "defmt"))]
impl<T: core::fmt::Debug> DriverError for T {}

/// Abstracts the TWAI controller driver.
///
/// Implementors wrap the vendor peripheral. [`Session`](crate::Session)
/// enforces the call order, so implementations may assume each method is only
/// called from the state it is documented for.
#[allow(async_fn_in_trait)]
pub trait TwaiDriver {
    /// Error type for driver failures.
    type Error: DriverError;

    /// Allocate and configure the peripheral with an accept-all filter.
    fn install(&mut self, config: &BusConfig) -> Result<(), Self::Error>;

    /// Join the bus.
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Wait up to `timeout` for the next frame.
    ///
    /// Returns `Ok(None)` when the timeout elapses without traffic. That is
    /// the normal idle outcome, not a failure.
    async fn receive(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Frame>, Self::Error>;

    /// Leave the bus.
    fn stop(&mut self) -> Result<(), Self::Error>;

    /// Release the peripheral.
    fn uninstall(&mut self) -> Result<(), Self::Error>;
}

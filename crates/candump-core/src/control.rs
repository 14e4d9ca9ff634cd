use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::config::BusConfig;
use crate::coordinator::Coordinator;
use crate::driver::TwaiDriver;
use crate::error::SessionError;
use crate::session::Session;

/// Pause between releasing the worker and parking on the shutdown request.
pub const GRACE_PERIOD_MS: u32 = 100;

/// Drives one capture run from install to uninstall.
///
/// The worker must already exist and be parked on
/// [`Coordinator::wait_for_release`]. It is only released once the session is
/// running, so an install or start failure returns before the worker ever
/// touches the bus. Every error returned here is fatal for the firmware.
///
/// The run lasts until [`Coordinator::request_shutdown`] is called.
pub async fn run_control<M, D, T>(
    session: &Session<M, D>,
    coordinator: &Coordinator<M>,
    config: &BusConfig,
    delay: &mut T,
) -> Result<(), SessionError<D::Error>>
where
    M: RawMutex,
    D: TwaiDriver,
    T: DelayNs,
{
    info!("RX GPIO: {}", config.pins.rx);
    info!("TX GPIO: {}", config.pins.tx);
    info!("CAN baudrate: {}", config.bit_rate.as_str());

    session.install(config).await?;
    info!("TWAI driver successfully installed");
    session.start().await?;
    info!("TWAI driver successfully started");

    coordinator.release_worker();
    delay.delay_ms(GRACE_PERIOD_MS).await;

    coordinator.wait_for_shutdown_request().await;
    coordinator.cancel_worker();
    coordinator.wait_for_worker().await;

    session.stop().await?;
    info!("TWAI driver successfully stopped");
    session.uninstall().await?;
    info!("TWAI driver successfully uninstalled");

    Ok(())
}

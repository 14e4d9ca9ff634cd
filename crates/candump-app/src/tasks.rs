use candump_core::{Indicator, ReceiveWorker};
use esp_hal::gpio::Output;
use esp_println::Printer;

use crate::prelude::*;

/// Receive worker. Parks until control releases it, then prints every frame
/// to the console.
#[embassy_executor::task]
pub async fn rx_task(
    session: &'static AppSession,
    coordinator: &'static AppCoordinator,
    indicator: Option<Indicator<Output<'static>>>,
) {
    let mut worker = ReceiveWorker::new(session, coordinator, indicator, Printer);
    let report = worker.run().await;
    info!(
        "RX worker exited after {} frames ({} receive errors)",
        report.frames,
        report.errors
    );
}

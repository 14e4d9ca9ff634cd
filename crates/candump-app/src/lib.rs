#![no_std]
//! ESP32-C3 firmware that prints every TWAI (CAN) frame it sees.

#[doc(hidden)]
pub mod fmt;

pub mod board;
pub mod config;
pub mod tasks;
pub mod twai;

use embassy_executor::SendSpawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use esp_hal::interrupt::software::SoftwareInterrupt;
use esp_hal::interrupt::Priority;
use esp_rtos::embassy::InterruptExecutor;
use static_cell::StaticCell;

pub const FW_VERSION: &str = env!("FW_VERSION");

pub type AppSession =
    candump_core::Session<CriticalSectionRawMutex, twai::EspTwai>;
pub type AppCoordinator = candump_core::Coordinator<CriticalSectionRawMutex>;

static EXECUTOR_HIGH: StaticCell<InterruptExecutor<2>> = StaticCell::new();

/// Starts the high-priority executor the receive worker runs on, so frame
/// handling preempts everything on the thread-mode executor.
pub fn init_executors(
    software_interrupt: SoftwareInterrupt<'static, 2>,
) -> SendSpawner {
    let executor =
        EXECUTOR_HIGH.init(InterruptExecutor::new(software_interrupt));
    executor.start(Priority::Priority3)
}

pub mod prelude {
    pub use super::{
        error, info, init_executors, tasks::*, unwrap, warn, AppCoordinator,
        AppSession, FW_VERSION,
    };
    pub use embassy_executor::Spawner;
    pub use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    pub use embassy_time::{Delay, Duration, Timer};
}

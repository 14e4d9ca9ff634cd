#![no_std]
#![no_main]

use candump_core::{run_control, Indicator};
use esp_backtrace as _;
use esp_hal::interrupt::software::SoftwareInterruptControl;
use esp_hal::timer::timg::TimerGroup;
use static_cell::StaticCell;

use candump_app::{board, config, prelude::*, twai::EspTwai};

esp_bootloader_esp_idf::esp_app_desc!();

static SESSION: StaticCell<AppSession> = StaticCell::new();
static COORDINATOR: StaticCell<AppCoordinator> = StaticCell::new();

#[esp_rtos::main]
async fn main(_spawner: Spawner) {
    #[cfg(feature = "log")]
    esp_println::logger::init_logger_from_env();

    let peripherals = esp_hal::init(esp_hal::Config::default());
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let software_interrupts =
        SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, software_interrupts.software_interrupt0);

    info!("candump firmware {}", FW_VERSION);

    // Any configuration error is fatal.
    let config = unwrap!(config::from_build_env());
    match config.indicator {
        Some(led) => info!("RX LED: GPIO {} ({:?})", led.pin, led.polarity),
        None => info!("RX LED: disabled"),
    }

    // The indicator must be driven to its off level before the worker exists.
    let indicator = config.indicator.map(|led| {
        // SAFETY: checked by `from_build_env` and distinct from the bus pins.
        let output = unsafe { board::indicator_output(led.pin, led.polarity) };
        unwrap!(Indicator::configure(output, led.polarity))
    });

    let session: &'static AppSession =
        SESSION.init(AppSession::new(EspTwai::new()));
    let coordinator: &'static AppCoordinator =
        COORDINATOR.init(AppCoordinator::new());

    let high_prio_spawner =
        init_executors(software_interrupts.software_interrupt2);
    high_prio_spawner.must_spawn(rx_task(session, coordinator, indicator));

    let mut delay = Delay;
    unwrap!(run_control(session, coordinator, &config.bus, &mut delay).await);

    // Only reached if something requested a shutdown.
    info!("Capture finished");
}

//! [`TwaiDriver`] for the ESP32-C3 TWAI controller.

use candump_core::config::BitTiming;
use candump_core::{BitRate, BusConfig, Frame, Id, TwaiDriver};
use embassy_time::{with_timeout, Duration};
use embedded_can::Frame as _;
use esp_hal::peripherals::TWAI0;
use esp_hal::twai::filter::SingleStandardFilter;
use esp_hal::twai::{
    BaudRate, EspTwaiError, EspTwaiFrame, TimingConfig, Twai,
    TwaiConfiguration, TwaiMode,
};
use esp_hal::Async;

use crate::board;

/// Accepts every frame, standard and extended.
const ACCEPT_ALL: SingleStandardFilter = SingleStandardFilter::new(
    b"xxxxxxxxxxx",
    b"x",
    [b"xxxxxxxx", b"xxxxxxxx"],
);

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The call does not match the controller's current mode.
    WrongMode,
    /// Reported by the controller while receiving.
    Bus(EspTwaiError),
    /// A received frame that cannot be represented.
    Malformed,
}

enum Mode {
    Uninstalled,
    Configured(TwaiConfiguration<'static, Async>),
    Running(Twai<'static, Async>),
}

/// Owns the TWAI peripheral between `install` and `uninstall`.
///
/// Both `Installed` and `Stopped` map to a held configuration; leaving the bus
/// hands the configuration back so the same pins stay claimed until
/// `uninstall` drops it.
pub struct EspTwai {
    mode: Mode,
}

impl EspTwai {
    pub const fn new() -> Self {
        Self { mode: Mode::Uninstalled }
    }
}

// SAFETY: async esp-hal drivers are `!Send` because their interrupt handler is
// bound on the core that created them. The ESP32-C3 has a single core, and
// every access goes through the session's critical-section mutex.
unsafe impl Send for EspTwai {}

impl Default for EspTwai {
    fn default() -> Self {
        Self::new()
    }
}

fn baud_rate(rate: BitRate) -> BaudRate {
    match rate {
        BitRate::Mbit1 => BaudRate::B1000K,
        BitRate::Kbit500 => BaudRate::B500K,
        BitRate::Kbit250 => BaudRate::B250K,
        BitRate::Kbit125 => BaudRate::B125K,
        other => {
            let BitTiming { prescaler, tseg_1, tseg_2, sjw, triple_sample } =
                other.timing();
            BaudRate::Custom(TimingConfig {
                baud_rate_prescaler: prescaler,
                sync_jump_width: sjw,
                tseg_1,
                tseg_2,
                triple_sample,
            })
        }
    }
}

fn convert(frame: &EspTwaiFrame) -> Result<Frame, Error> {
    let id = match frame.id() {
        embedded_can::Id::Standard(id) => Id::standard(id.as_raw()),
        embedded_can::Id::Extended(id) => Id::extended(id.as_raw()),
    }
    .ok_or(Error::Malformed)?;
    let frame = if frame.is_remote_frame() {
        Frame::remote(id, frame.dlc() as u8)
    } else {
        Frame::new(id, frame.data())
    };
    frame.map_err(|_| Error::Malformed)
}

impl TwaiDriver for EspTwai {
    type Error = Error;

    fn install(&mut self, config: &BusConfig) -> Result<(), Error> {
        if !matches!(self.mode, Mode::Uninstalled) {
            return Err(Error::WrongMode);
        }
        // SAFETY: the session installs at most one controller at a time and
        // the pins were validated at startup.
        let (peripheral, rx, tx) = unsafe {
            (
                TWAI0::steal(),
                board::take_pin(config.pins.rx),
                board::take_pin(config.pins.tx),
            )
        };
        let mut twai_config = TwaiConfiguration::new(
            peripheral,
            rx,
            tx,
            baud_rate(config.bit_rate),
            TwaiMode::Normal,
        )
        .into_async();
        twai_config.set_filter(ACCEPT_ALL);
        self.mode = Mode::Configured(twai_config);
        Ok(())
    }

    fn start(&mut self) -> Result<(), Error> {
        match core::mem::replace(&mut self.mode, Mode::Uninstalled) {
            Mode::Configured(twai_config) => {
                self.mode = Mode::Running(twai_config.start());
                Ok(())
            }
            other => {
                self.mode = other;
                Err(Error::WrongMode)
            }
        }
    }

    async fn receive(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Frame>, Error> {
        let Mode::Running(twai) = &mut self.mode else {
            return Err(Error::WrongMode);
        };
        match with_timeout(timeout, twai.receive_async()).await {
            Ok(Ok(frame)) => convert(&frame).map(Some),
            Ok(Err(e)) => Err(Error::Bus(e)),
            Err(_) => Ok(None),
        }
    }

    fn stop(&mut self) -> Result<(), Error> {
        match core::mem::replace(&mut self.mode, Mode::Uninstalled) {
            Mode::Running(twai) => {
                self.mode = Mode::Configured(twai.stop());
                Ok(())
            }
            other => {
                self.mode = other;
                Err(Error::WrongMode)
            }
        }
    }

    fn uninstall(&mut self) -> Result<(), Error> {
        match core::mem::replace(&mut self.mode, Mode::Uninstalled) {
            Mode::Configured(_) => Ok(()),
            other => {
                self.mode = other;
                Err(Error::WrongMode)
            }
        }
    }
}

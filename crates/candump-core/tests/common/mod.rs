#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use candump_core::{BusConfig, Frame, TwaiDriver};
use embassy_time::Duration;
use embedded_hal::digital::{ErrorType, OutputPin, PinState};
use embedded_hal_async::delay::DelayNs;

// ---------------------------------------------------------------------------
// Mock driver
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError(pub i32);

/// One scripted `receive` outcome.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Frame(Frame),
    Timeout,
    Error(MockError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Install(BusConfig),
    Start,
    Receive,
    Stop,
    Uninstall,
}

pub struct ProbeInner {
    pub calls: Vec<Call>,
    /// Simulated time spent blocked in `receive`.
    pub elapsed: Duration,
    /// Set once `receive` runs past the end of the script.
    pub drained: bool,
}

impl Default for ProbeInner {
    fn default() -> Self {
        Self { calls: Vec::new(), elapsed: Duration::from_ticks(0), drained: false }
    }
}

/// Shared view into what the driver was asked to do.
#[derive(Clone, Default)]
pub struct Probe(Rc<RefCell<ProbeInner>>);

impl Probe {
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub fn receive_count(&self) -> usize {
        self.0.borrow().calls.iter().filter(|c| **c == Call::Receive).count()
    }

    pub fn elapsed(&self) -> Duration {
        self.0.borrow().elapsed
    }

    pub fn drained(&self) -> bool {
        self.0.borrow().drained
    }
}

#[derive(Default)]
pub struct MockDriver {
    pub script: VecDeque<Step>,
    pub probe: Probe,
    pub fail_install: Option<MockError>,
    pub fail_start: Option<MockError>,
    pub fail_stop: Option<MockError>,
    pub fail_uninstall: Option<MockError>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(steps: impl IntoIterator<Item = Step>) -> Self {
        Self { script: steps.into_iter().collect(), ..Self::default() }
    }

    fn record(&self, call: Call) {
        self.probe.0.borrow_mut().calls.push(call);
    }

    fn fail_or_ok(&self, failure: Option<MockError>) -> Result<(), MockError> {
        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl TwaiDriver for MockDriver {
    type Error = MockError;

    fn install(&mut self, config: &BusConfig) -> Result<(), MockError> {
        self.record(Call::Install(*config));
        self.fail_or_ok(self.fail_install)
    }

    fn start(&mut self) -> Result<(), MockError> {
        self.record(Call::Start);
        self.fail_or_ok(self.fail_start)
    }

    async fn receive(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Frame>, MockError> {
        self.record(Call::Receive);
        // Give the other joined futures a chance to run.
        embassy_futures::yield_now().await;

        let step = self.script.pop_front();
        let mut probe = self.probe.0.borrow_mut();
        match step {
            Some(Step::Frame(frame)) => Ok(Some(frame)),
            Some(Step::Error(e)) => Err(e),
            Some(Step::Timeout) => {
                probe.elapsed += timeout;
                Ok(None)
            }
            None => {
                probe.drained = true;
                probe.elapsed += timeout;
                Ok(None)
            }
        }
    }

    fn stop(&mut self) -> Result<(), MockError> {
        self.record(Call::Stop);
        self.fail_or_ok(self.fail_stop)
    }

    fn uninstall(&mut self) -> Result<(), MockError> {
        self.record(Call::Uninstall);
        self.fail_or_ok(self.fail_uninstall)
    }
}

// ---------------------------------------------------------------------------
// Mock pin
// ---------------------------------------------------------------------------

/// Output pin that records every level written to it.
#[derive(Clone, Default)]
pub struct MockPin {
    pub levels: Rc<RefCell<Vec<PinState>>>,
}

impl MockPin {
    pub fn history(&self) -> Vec<PinState> {
        self.levels.borrow().clone()
    }

    pub fn level(&self) -> Option<PinState> {
        self.levels.borrow().last().copied()
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.levels.borrow_mut().push(PinState::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.levels.borrow_mut().push(PinState::High);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Delay
// ---------------------------------------------------------------------------

/// Returns immediately, remembering how long it was asked to wait.
#[derive(Default)]
pub struct RecordingDelay {
    pub total_ns: u64,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn std_frame(id: u16, data: &[u8]) -> Frame {
    Frame::new(candump_core::Id::standard(id).unwrap(), data).unwrap()
}

pub fn bus_config() -> BusConfig {
    BusConfig::new(candump_core::BitRate::Kbit500, 5, 4)
}

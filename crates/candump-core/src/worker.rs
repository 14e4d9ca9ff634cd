//! The receive worker: polls the session, drives the indicator and prints
//! every frame.

use core::fmt::Write;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;
use embedded_hal::digital::OutputPin;

use crate::coordinator::Coordinator;
use crate::driver::TwaiDriver;
use crate::error::SessionError;
use crate::frame::Frame;
use crate::indicator::{Indicator, IndicatorState};
use crate::session::Session;

/// Upper bound on one `receive` call, and therefore on how long the worker
/// takes to notice a cancellation.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WorkerState {
    /// Parked until the control task releases it.
    Idle,
    Running,
    Terminated,
}

/// What the worker saw over its lifetime.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WorkerReport {
    pub frames: u32,
    pub timeouts: u32,
    pub errors: u32,
}

pub struct ReceiveWorker<'a, M, D, P, O>
where
    M: RawMutex,
    D: TwaiDriver,
    P: OutputPin,
    O: Write,
{
    session: &'a Session<M, D>,
    coordinator: &'a Coordinator<M>,
    indicator: Option<Indicator<P>>,
    out: O,
    poll_timeout: Duration,
    state: WorkerState,
    report: WorkerReport,
}

impl<'a, M, D, P, O> ReceiveWorker<'a, M, D, P, O>
where
    M: RawMutex,
    D: TwaiDriver,
    P: OutputPin,
    O: Write,
{
    /// Creates a worker in [`WorkerState::Idle`]. Frames are written to `out`
    /// one complete line per `write_str` call.
    pub fn new(
        session: &'a Session<M, D>,
        coordinator: &'a Coordinator<M>,
        indicator: Option<Indicator<P>>,
        out: O,
    ) -> Self {
        Self {
            session,
            coordinator,
            indicator,
            out,
            poll_timeout: POLL_TIMEOUT,
            state: WorkerState::Idle,
            report: WorkerReport::default(),
        }
    }

    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn indicator(&self) -> Option<&Indicator<P>> {
        self.indicator.as_ref()
    }

    pub fn output(&self) -> &O {
        &self.out
    }

    pub fn report(&self) -> WorkerReport {
        self.report
    }

    /// Waits to be released, then receives until cancelled.
    ///
    /// Receive errors are logged and skipped. The loop only ends when the
    /// coordinator cancels it, or if the session is no longer running.
    pub async fn run(&mut self) -> WorkerReport {
        self.coordinator.wait_for_release().await;
        self.state = WorkerState::Running;
        info!("RX task started");

        loop {
            let outcome = self.session.receive(self.poll_timeout).await;
            if !self.process(outcome) {
                break;
            }
            if self.coordinator.is_cancelled() {
                break;
            }
        }

        self.state = WorkerState::Terminated;
        info!(
            "RX task finished: {} frames, {} timeouts, {} errors",
            self.report.frames,
            self.report.timeouts,
            self.report.errors
        );
        self.coordinator.acknowledge_shutdown();
        self.report
    }

    /// Handles one receive outcome. Returns `false` when the loop must end.
    fn process(
        &mut self,
        outcome: Result<Option<Frame>, SessionError<D::Error>>,
    ) -> bool {
        match outcome {
            Ok(Some(frame)) => {
                self.set_indicator(IndicatorState::On);
                self.emit(&frame);
                self.report.frames = self.report.frames.wrapping_add(1);
            }
            Ok(None) => {
                self.set_indicator(IndicatorState::Off);
                self.report.timeouts = self.report.timeouts.wrapping_add(1);
            }
            Err(SessionError::Driver(e)) => {
                self.set_indicator(IndicatorState::Off);
                self.report.errors = self.report.errors.wrapping_add(1);
                warn!("TWAI receive error {:?}", e);
            }
            Err(e @ SessionError::InvalidState { .. }) => {
                self.set_indicator(IndicatorState::Off);
                error!("TWAI session not running: {:?}", e);
                return false;
            }
        }
        true
    }

    fn set_indicator(&mut self, state: IndicatorState) {
        if let Some(indicator) = self.indicator.as_mut() {
            if indicator.set(state).is_err() {
                warn!("Failed to drive RX indicator");
            }
        }
    }

    fn emit(&mut self, frame: &Frame) {
        let line = frame.to_line();
        if self.out.write_str(&line).is_err() {
            warn!("Failed to write frame to output");
        }
    }
}

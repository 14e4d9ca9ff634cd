#![no_std]
//! Receive pipeline for a TWAI (CAN) bus sniffer.
//!
//! A control task installs and starts the bus controller through a
//! [`Session`], then releases a [`ReceiveWorker`] through the
//! [`Coordinator`]. The worker polls for frames, drives an optional
//! [`Indicator`] and prints each frame as a `candump`-style line. Everything
//! here is hardware independent; the firmware supplies a [`TwaiDriver`], an
//! output pin and an output sink.

pub(crate) mod fmt;

pub mod config;
mod control;
mod coordinator;
mod driver;
mod error;
pub mod frame;
mod indicator;
mod session;
mod worker;

pub use config::{BitRate, BusConfig, Config, IndicatorConfig};
pub use control::{run_control, GRACE_PERIOD_MS};
pub use coordinator::{Coordinator, Handshake};
pub use driver::{DriverError, TwaiDriver};
pub use error::{ConfigError, SessionError};
pub use frame::{Frame, Id};
pub use indicator::{Indicator, IndicatorState, Polarity};
pub use session::{Session, SessionState};
pub use worker::{ReceiveWorker, WorkerReport, WorkerState, POLL_TIMEOUT};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::Duration;

use crate::config::BusConfig;
use crate::driver::TwaiDriver;
use crate::error::SessionError;
use crate::frame::Frame;

/// Lifecycle state of the bus controller.
///
/// Transitions are strictly linear:
/// `Uninstalled -> Installed -> Running -> Stopped -> Uninstalled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Peripheral resources are free.
    Uninstalled,
    /// Peripheral is configured but not on the bus.
    Installed,
    /// Peripheral participates in the bus; frames can be received.
    Running,
    /// Peripheral left the bus and still holds its resources.
    Stopped,
}

struct Inner<D> {
    state: SessionState,
    driver: D,
}

/// Owns the bus controller and enforces its lifecycle.
///
/// Lifecycle operations are meant to be driven by a single control task while
/// one receive worker calls [`receive`](Self::receive). The lock is held for
/// exactly one operation, so a pending `receive` delays a lifecycle call by at
/// most its timeout.
pub struct Session<M: RawMutex, D: TwaiDriver> {
    inner: Mutex<M, Inner<D>>,
}

impl<M: RawMutex, D: TwaiDriver> Session<M, D> {
    /// Wrap an uninstalled driver.
    pub const fn new(driver: D) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: SessionState::Uninstalled,
                driver,
            }),
        }
    }

    /// Configure the peripheral. `Uninstalled -> Installed`.
    pub async fn install(
        &self,
        config: &BusConfig,
    ) -> Result<(), SessionError<D::Error>> {
        self.transition(
            SessionState::Uninstalled,
            SessionState::Installed,
            |driver| driver.install(config),
        )
        .await
    }

    /// Join the bus. `Installed -> Running`.
    pub async fn start(&self) -> Result<(), SessionError<D::Error>> {
        self.transition(
            SessionState::Installed,
            SessionState::Running,
            D::start,
        )
        .await
    }

    /// Wait up to `timeout` for a frame.
    ///
    /// `Ok(None)` means the timeout elapsed with no traffic.
    pub async fn receive(
        &self,
        timeout: Duration,
    ) -> Result<Option<Frame>, SessionError<D::Error>> {
        let mut inner = self.inner.lock().await;
        if inner.state != SessionState::Running {
            return Err(SessionError::InvalidState {
                state: inner.state,
                expected: SessionState::Running,
            });
        }
        inner.driver.receive(timeout).await.map_err(SessionError::Driver)
    }

    /// Leave the bus. `Running -> Stopped`.
    pub async fn stop(&self) -> Result<(), SessionError<D::Error>> {
        self.transition(SessionState::Running, SessionState::Stopped, D::stop)
            .await
    }

    /// Release the peripheral. `Stopped -> Uninstalled`.
    pub async fn uninstall(&self) -> Result<(), SessionError<D::Error>> {
        self.transition(
            SessionState::Stopped,
            SessionState::Uninstalled,
            D::uninstall,
        )
        .await
    }

    /// Returns the current state, or `None` if an operation is in flight.
    ///
    /// This is a non-blocking best-effort check using `try_lock`.
    pub fn state(&self) -> Option<SessionState> {
        self.inner.try_lock().ok().map(|inner| inner.state)
    }

    /// Consume the session and hand back the driver.
    pub fn into_driver(self) -> D {
        self.inner.into_inner().driver
    }

    async fn transition(
        &self,
        expected: SessionState,
        next: SessionState,
        op: impl FnOnce(&mut D) -> Result<(), D::Error>,
    ) -> Result<(), SessionError<D::Error>> {
        let mut inner = self.inner.lock().await;
        if inner.state != expected {
            return Err(SessionError::InvalidState {
                state: inner.state,
                expected,
            });
        }

        // A failed driver call leaves the state untouched.
        op(&mut inner.driver).map_err(SessionError::Driver)?;
        inner.state = next;
        debug!("TWAI session {:?} -> {:?}", expected, next);
        Ok(())
    }
}

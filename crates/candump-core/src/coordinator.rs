//! Startup and shutdown handshakes between the control task and the receive
//! worker.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, Ordering};

/// A single-slot token.
///
/// [`signal`](Self::signal) deposits the token; a second signal before the
/// token is consumed is absorbed. [`wait`](Self::wait) blocks until the token
/// is present and consumes it.
pub struct Handshake<M: RawMutex> {
    token: Signal<M, ()>,
}

impl<M: RawMutex> Handshake<M> {
    pub const fn new() -> Self {
        Self { token: Signal::new() }
    }

    pub fn signal(&self) {
        self.token.signal(());
    }

    pub async fn wait(&self) {
        self.token.wait().await
    }

    /// Consume the token if present, without blocking.
    pub fn try_take(&self) -> bool {
        self.token.try_take().is_some()
    }

    /// Whether a token is waiting to be consumed.
    pub fn is_signaled(&self) -> bool {
        self.token.signaled()
    }
}

impl<M: RawMutex> Default for Handshake<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared coordination state for one capture run.
///
/// Created by the control side and lent to the worker for the lifetime of
/// the run. The start and acknowledge handshakes are separate slots so a
/// stale start token can never be mistaken for a completion.
pub struct Coordinator<M: RawMutex> {
    start: Handshake<M>,
    done: Handshake<M>,
    shutdown: Handshake<M>,
    cancel: AtomicBool,
}

impl<M: RawMutex> Coordinator<M> {
    pub const fn new() -> Self {
        Self {
            start: Handshake::new(),
            done: Handshake::new(),
            shutdown: Handshake::new(),
            cancel: AtomicBool::new(false),
        }
    }

    /// Control side: let the worker begin polling.
    pub fn release_worker(&self) {
        self.start.signal();
    }

    /// Worker side: park until released.
    pub async fn wait_for_release(&self) {
        self.start.wait().await
    }

    /// Ask the control task to tear the capture down. May be called from any
    /// task.
    pub fn request_shutdown(&self) {
        self.shutdown.signal();
    }

    /// Control side: park until someone calls
    /// [`request_shutdown`](Self::request_shutdown).
    pub async fn wait_for_shutdown_request(&self) {
        self.shutdown.wait().await
    }

    /// Control side: tell the worker to leave its loop after the current
    /// receive.
    pub fn cancel_worker(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    /// Worker side: polled once per loop iteration.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    /// Worker side: report termination.
    pub fn acknowledge_shutdown(&self) {
        self.done.signal();
    }

    /// Control side: park until the worker has terminated.
    pub async fn wait_for_worker(&self) {
        self.done.wait().await
    }

    /// Whether the worker has been released but not yet started polling.
    pub fn release_pending(&self) -> bool {
        self.start.is_signaled()
    }
}

impl<M: RawMutex> Default for Coordinator<M> {
    fn default() -> Self {
        Self::new()
    }
}

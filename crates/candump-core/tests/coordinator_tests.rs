use core::task::Poll;

use candump_core::{Coordinator, Handshake};
use embassy_futures::poll_once;
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};

#[futures_test::test]
async fn wait_after_signal_returns_and_consumes() {
    let handshake: Handshake<NoopRawMutex> = Handshake::new();

    handshake.signal();
    assert!(handshake.is_signaled());
    handshake.wait().await;

    assert!(!handshake.is_signaled());
    assert_eq!(poll_once(handshake.wait()), Poll::Pending);
}

#[test]
fn second_signal_is_absorbed() {
    let handshake: Handshake<NoopRawMutex> = Handshake::new();

    handshake.signal();
    handshake.signal();

    assert_eq!(poll_once(handshake.wait()), Poll::Ready(()));
    assert_eq!(poll_once(handshake.wait()), Poll::Pending);
}

#[test]
fn try_take_does_not_block() {
    let handshake: Handshake<CriticalSectionRawMutex> = Handshake::default();

    assert!(!handshake.try_take());
    handshake.signal();
    assert!(handshake.try_take());
    assert!(!handshake.try_take());
}

#[test]
fn start_and_done_slots_are_independent() {
    let coordinator: Coordinator<NoopRawMutex> = Coordinator::new();

    coordinator.release_worker();
    assert!(coordinator.release_pending());
    // A pending start token must not satisfy the completion wait.
    assert_eq!(poll_once(coordinator.wait_for_worker()), Poll::Pending);
    assert_eq!(poll_once(coordinator.wait_for_release()), Poll::Ready(()));
    assert!(!coordinator.release_pending());

    coordinator.acknowledge_shutdown();
    // Nor the other way round.
    assert_eq!(poll_once(coordinator.wait_for_release()), Poll::Pending);
    assert_eq!(poll_once(coordinator.wait_for_worker()), Poll::Ready(()));
}

#[test]
fn worker_parks_until_released() {
    let coordinator: Coordinator<NoopRawMutex> = Coordinator::new();
    assert_eq!(poll_once(coordinator.wait_for_release()), Poll::Pending);
    coordinator.release_worker();
    assert_eq!(poll_once(coordinator.wait_for_release()), Poll::Ready(()));
}

#[test]
fn shutdown_request_and_cancellation() {
    let coordinator: Coordinator<CriticalSectionRawMutex> =
        Coordinator::default();

    assert!(!coordinator.is_cancelled());
    assert_eq!(
        poll_once(coordinator.wait_for_shutdown_request()),
        Poll::Pending
    );

    coordinator.request_shutdown();
    assert_eq!(
        poll_once(coordinator.wait_for_shutdown_request()),
        Poll::Ready(())
    );

    // Requesting shutdown does not by itself cancel the worker.
    assert!(!coordinator.is_cancelled());
    coordinator.cancel_worker();
    assert!(coordinator.is_cancelled());
}

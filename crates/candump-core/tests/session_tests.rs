mod common;

use candump_core::{Session, SessionError, SessionState, POLL_TIMEOUT};
use common::{bus_config, std_frame, Call, MockDriver, MockError, Step};
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};

fn make_session(driver: MockDriver) -> Session<NoopRawMutex, MockDriver> {
    Session::new(driver)
}

#[futures_test::test]
async fn full_lifecycle() {
    let driver = MockDriver::new();
    let probe = driver.probe.clone();
    let session = make_session(driver);
    let config = bus_config();

    assert_eq!(session.state(), Some(SessionState::Uninstalled));
    session.install(&config).await.unwrap();
    assert_eq!(session.state(), Some(SessionState::Installed));
    session.start().await.unwrap();
    assert_eq!(session.state(), Some(SessionState::Running));
    session.stop().await.unwrap();
    assert_eq!(session.state(), Some(SessionState::Stopped));
    session.uninstall().await.unwrap();
    assert_eq!(session.state(), Some(SessionState::Uninstalled));

    assert_eq!(
        probe.calls(),
        vec![
            Call::Install(config),
            Call::Start,
            Call::Stop,
            Call::Uninstall
        ]
    );
}

#[futures_test::test]
async fn start_requires_installed() {
    let session = make_session(MockDriver::new());

    assert_eq!(
        session.start().await,
        Err(SessionError::InvalidState {
            state: SessionState::Uninstalled,
            expected: SessionState::Installed,
        })
    );
    assert_eq!(session.state(), Some(SessionState::Uninstalled));
}

#[futures_test::test]
async fn transitions_never_skip_a_state() {
    let session = make_session(MockDriver::new());
    let config = bus_config();

    // Nothing but install is legal from Uninstalled.
    assert!(session.stop().await.is_err());
    assert!(session.uninstall().await.is_err());

    session.install(&config).await.unwrap();
    assert!(matches!(
        session.install(&config).await,
        Err(SessionError::InvalidState { state: SessionState::Installed, .. })
    ));
    assert!(session.stop().await.is_err());
    assert!(session.uninstall().await.is_err());

    session.start().await.unwrap();
    assert!(session.start().await.is_err());
    assert!(session.uninstall().await.is_err());

    session.stop().await.unwrap();
    assert!(session.start().await.is_err());
    assert!(session.install(&config).await.is_err());
    assert_eq!(session.state(), Some(SessionState::Stopped));
}

#[futures_test::test]
async fn receive_only_while_running() {
    let driver = MockDriver::with_script([Step::Frame(std_frame(0x42, &[1]))]);
    let probe = driver.probe.clone();
    let session = make_session(driver);

    assert_eq!(
        session.receive(POLL_TIMEOUT).await,
        Err(SessionError::InvalidState {
            state: SessionState::Uninstalled,
            expected: SessionState::Running,
        })
    );

    session.install(&bus_config()).await.unwrap();
    assert!(session.receive(POLL_TIMEOUT).await.is_err());

    session.start().await.unwrap();
    assert_eq!(
        session.receive(POLL_TIMEOUT).await,
        Ok(Some(std_frame(0x42, &[1])))
    );

    session.stop().await.unwrap();
    assert!(matches!(
        session.receive(POLL_TIMEOUT).await,
        Err(SessionError::InvalidState { state: SessionState::Stopped, .. })
    ));

    // The driver only saw the one legal receive.
    assert_eq!(probe.receive_count(), 1);
}

#[futures_test::test]
async fn receive_reports_timeout_and_driver_errors() {
    let driver = MockDriver::with_script([
        Step::Timeout,
        Step::Error(MockError(-1)),
    ]);
    let session = make_session(driver);
    session.install(&bus_config()).await.unwrap();
    session.start().await.unwrap();

    assert_eq!(session.receive(POLL_TIMEOUT).await, Ok(None));
    assert_eq!(
        session.receive(POLL_TIMEOUT).await,
        Err(SessionError::Driver(MockError(-1)))
    );
    assert_eq!(session.state(), Some(SessionState::Running));
}

#[futures_test::test]
async fn driver_failure_preserves_state() {
    let mut driver = MockDriver::new();
    driver.fail_install = Some(MockError(0x103));
    let session = make_session(driver);

    assert_eq!(
        session.install(&bus_config()).await,
        Err(SessionError::Driver(MockError(0x103)))
    );
    assert_eq!(session.state(), Some(SessionState::Uninstalled));

    let mut driver = MockDriver::new();
    driver.fail_start = Some(MockError(7));
    let session = make_session(driver);
    session.install(&bus_config()).await.unwrap();
    assert_eq!(
        session.start().await,
        Err(SessionError::Driver(MockError(7)))
    );
    assert_eq!(session.state(), Some(SessionState::Installed));
}

#[futures_test::test]
async fn session_can_be_reinstalled() {
    let session = make_session(MockDriver::new());
    let config = bus_config();

    for _ in 0..3 {
        session.install(&config).await.unwrap();
        session.start().await.unwrap();
        session.stop().await.unwrap();
        session.uninstall().await.unwrap();
    }

    let driver = session.into_driver();
    assert_eq!(driver.probe.calls().len(), 12);
}

#[futures_test::test]
async fn works_with_critical_section_mutex() {
    let session: Session<CriticalSectionRawMutex, MockDriver> =
        Session::new(MockDriver::new());
    session.install(&bus_config()).await.unwrap();
    session.start().await.unwrap();
    assert_eq!(session.receive(POLL_TIMEOUT).await, Ok(None));
    assert_eq!(session.state(), Some(SessionState::Running));
}

use crate::session::SessionState;

/// Errors that can occur during session lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError<E: core::fmt::Debug> {
    /// The underlying controller driver reported a failure.
    Driver(E),
    /// The operation is not legal from the current state.
    InvalidState {
        /// State the session was in when the operation was attempted.
        state: SessionState,
        /// State the operation requires.
        expected: SessionState,
    },
}

/// Errors produced while building a [`Config`](crate::config::Config).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    InvalidBitRate,
    InvalidPinNumber,
    /// The GPIO cannot be used for the requested role.
    InvalidPin(u8),
    /// Two roles were assigned the same GPIO.
    PinConflict(u8),
    InvalidPolarity,
    InvalidFlag,
}

//! Exit code standardization for retryctl.
//!
//! Provides consistent exit codes for different error types, and for the
//! terminal [`RetryState`](crate::backoff::RetryState) the decision core
//! reports, to enable reliable programmatic use of the demonstration CLI.
//!
//! ## Exit Code Convention
//!
//! - `0` = Success / `InProgress` (another attempt is scheduled)
//! - `1` = User error (invalid scenario input)
//! - `2` = Terminal retry state reached (`MaximumAttemptsReached`,
//!   `Timeout`, `NonRetryableFailure`)
//! - `3` = Configuration error (missing preset, invalid config file)

use crate::backoff::RetryState;
use crate::error::RetryCtlError;

/// Standard exit codes for retryctl.
pub mod codes {
    #[allow(dead_code)]
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 1;
    pub const RETRY_TERMINAL: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
}

/// Maps a [`RetryCtlError`] to the exit code convention above.
pub fn exit_code_for_error(error: &RetryCtlError) -> i32 {
    use RetryCtlError::*;
    match error {
        Config(_) | Toml(_) => codes::CONFIG_ERROR,
        InvalidScenario { .. } => codes::USER_ERROR,
        Io(_) | Json(_) => codes::USER_ERROR,
    }
}

/// Maps a [`RetryState`] to the exit code convention above: `InProgress`
/// succeeds, every other state is a terminal retry outcome.
pub fn exit_code_for_retry_state(state: RetryState) -> i32 {
    match state {
        RetryState::InProgress => codes::SUCCESS,
        RetryState::MaximumAttemptsReached
        | RetryState::Timeout
        | RetryState::NonRetryableFailure
        | RetryState::Unspecified => codes::RETRY_TERMINAL,
    }
}

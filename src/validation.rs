//! Scenario/config validation utilities.
//!
//! The decision core (`classifier`, `backoff`) never rejects its inputs
//! (spec.md §7): out-of-range attempt numbers and non-positive durations
//! are defensively normalized, not errored on. The boundary still needs
//! to validate untrusted input *before* it reaches the core, though — a
//! scenario file is attacker- or typo-controlled JSON, not an internal
//! value already shaped by the type system. `attempt` itself needs no
//! such guard here: every `i32` value, including `i32::MIN`, is handled
//! by `next_backoff`'s `attempt <= 0` normalization without overflow.

use crate::error::{RetryCtlError, Result};

/// Validates a [`RetryPolicy`](crate::policy::RetryPolicy) parsed from a
/// scenario or config file.
pub fn validate_scenario_policy(policy: &crate::policy::RetryPolicy) -> Result<()> {
    if policy.backoff_coefficient.is_nan() {
        return Err(RetryCtlError::InvalidScenario {
            reason: "backoff_coefficient must not be NaN".to_string(),
        });
    }
    if policy.maximum_attempts < 0 {
        return Err(RetryCtlError::InvalidScenario {
            reason: format!(
                "maximum_attempts must be >= 0 (0 means unbounded), got: {}",
                policy.maximum_attempts
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RetryPolicy;

    #[test]
    fn nan_coefficient_is_rejected() {
        let policy = RetryPolicy {
            backoff_coefficient: f64::NAN,
            ..RetryPolicy::bounded_default()
        };
        assert!(validate_scenario_policy(&policy).is_err());
    }

    #[test]
    fn negative_maximum_attempts_is_rejected() {
        let policy = RetryPolicy {
            maximum_attempts: -1,
            ..RetryPolicy::bounded_default()
        };
        assert!(validate_scenario_policy(&policy).is_err());
    }

    #[test]
    fn default_policy_is_valid() {
        assert!(validate_scenario_policy(&RetryPolicy::bounded_default()).is_ok());
    }
}

//! The retry policy: a single immutable record, not a loose parameter list.
//!
//! Per spec.md §9's design note, the seven policy fields belong together
//! in one value passed by reference, so call sites can't transpose two
//! `Duration`s or swap `attempt` and `maximum_attempts` the way a long
//! positional parameter list invites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Immutable retry policy for one task.
///
/// `maximum_interval == Duration::ZERO` means "no explicit cap" (the
/// calculator derives `100 * initial_interval`, see
/// [`crate::backoff::next_backoff`]). `maximum_attempts == 0` means
/// "unbounded attempts".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub initial_interval: Duration,
    pub maximum_interval: Duration,
    pub backoff_coefficient: f64,
    pub maximum_attempts: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub non_retryable_error_types: HashSet<String>,
}

impl RetryPolicy {
    /// A policy with sensible, bounded defaults: a 1 second initial
    /// interval doubling up to a 100 second cap, 10 attempts, no deadline.
    pub fn bounded_default() -> Self {
        Self {
            initial_interval: Duration::from_secs(1),
            maximum_interval: Duration::from_secs(100),
            backoff_coefficient: 2.0,
            maximum_attempts: 10,
            expiration_time: None,
            non_retryable_error_types: HashSet::new(),
        }
    }

    /// A policy with no attempt budget and no deadline: every retryable
    /// failure keeps retrying, backoff capped at `100 * initial_interval`.
    pub fn unbounded() -> Self {
        Self {
            maximum_attempts: 0,
            ..Self::bounded_default()
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::bounded_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_has_no_attempt_budget_or_deadline() {
        let p = RetryPolicy::unbounded();
        assert_eq!(p.maximum_attempts, 0);
        assert!(p.expiration_time.is_none());
    }

    #[test]
    fn bounded_default_matches_documented_values() {
        let p = RetryPolicy::bounded_default();
        assert_eq!(p.initial_interval, Duration::from_secs(1));
        assert_eq!(p.maximum_interval, Duration::from_secs(100));
        assert_eq!(p.backoff_coefficient, 2.0);
        assert_eq!(p.maximum_attempts, 10);
    }
}

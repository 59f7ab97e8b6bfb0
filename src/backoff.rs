//! The backoff calculator: `next_backoff`.
//!
//! Pure given an injected `now` (spec.md §4.2). Internally consults
//! [`crate::classifier::is_retryable`]; external callers only call
//! [`next_backoff`].

use crate::classifier::is_retryable;
use crate::failure::Failure;
use crate::policy::RetryPolicy;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// The wait before the next attempt, or the sentinel meaning "no next
/// attempt is scheduled".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interval {
    Wait(Duration),
    NoBackoff,
}

impl Interval {
    pub fn is_no_backoff(&self) -> bool {
        matches!(self, Interval::NoBackoff)
    }
}

/// The terminal or continuing outcome of a retry decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Unspecified,
    InProgress,
    MaximumAttemptsReached,
    Timeout,
    NonRetryableFailure,
}

/// Computes the next backoff interval and retry state for one failed
/// attempt, following the fixed five-step decision order of spec.md §4.2.
///
/// `attempt` is the 1-based ordinal of the attempt that just failed;
/// values `<= 0` are treated as `1` (the first scheduled retry).
#[allow(clippy::too_many_arguments)]
pub fn next_backoff(
    now: DateTime<Utc>,
    attempt: i32,
    policy: &RetryPolicy,
    failure: Option<&Failure>,
) -> (Interval, RetryState) {
    let attempt = if attempt <= 0 { 1 } else { attempt };

    // Step 1: classifier gate.
    if !is_retryable(failure, &policy.non_retryable_error_types) {
        return (Interval::NoBackoff, RetryState::NonRetryableFailure);
    }

    // Step 2: attempt budget. 0 means unbounded.
    if policy.maximum_attempts > 0 && attempt >= policy.maximum_attempts {
        return (Interval::NoBackoff, RetryState::MaximumAttemptsReached);
    }

    // Step 3: interval arithmetic.
    let interval = nominal_interval(
        attempt,
        policy.initial_interval,
        policy.maximum_interval,
        policy.backoff_coefficient,
    );

    // Step 4: expiration gate. Inclusive on equality: landing exactly on
    // the deadline times out. `DateTime + TimeDelta` panics on overflow,
    // so the arrival time is computed with checked arithmetic throughout;
    // an interval too large to convert, or an arrival past what
    // `DateTime<Utc>` can represent, is certainly past any finite
    // deadline.
    if let Some(expiration) = policy.expiration_time {
        let arrival = chrono::Duration::from_std(interval)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta));
        match arrival {
            Some(arrival) if arrival < expiration => {}
            _ => return (Interval::NoBackoff, RetryState::Timeout),
        }
    }

    // Step 5: success.
    (Interval::Wait(interval), RetryState::InProgress)
}

/// Computes the nominal next interval, clamped to the effective cap and
/// guarded against non-finite floating point results. Never negative.
fn nominal_interval(
    attempt: i32,
    initial_interval: Duration,
    maximum_interval: Duration,
    backoff_coefficient: f64,
) -> Duration {
    let effective_cap = effective_maximum_interval(initial_interval, maximum_interval);
    if effective_cap.is_zero() {
        return Duration::ZERO;
    }

    // coefficient < 1 is undefined by spec; clamp defensively to 1 so a
    // maliciously small coefficient can't shrink the interval below the
    // initial one (spec.md §9 open question).
    let coefficient = if backoff_coefficient < 1.0 {
        1.0
    } else {
        backoff_coefficient
    };

    let exponent = (attempt - 1).max(0);
    let raw = initial_interval.as_secs_f64() * coefficient.powi(exponent);
    let cap_secs = effective_cap.as_secs_f64();

    // Clamp in floating point, *then* convert to `Duration` (spec.md §9):
    // converting first risks panicking on a finite `raw` that is still
    // far larger than anything `Duration` need represent.
    if !raw.is_finite() || raw < 0.0 || raw >= cap_secs {
        return effective_cap;
    }

    Duration::from_secs_f64(raw)
}

/// The cap the calculator enforces: `maximum_interval` if set, else
/// `100 * initial_interval` so an unset cap still bounds growth.
fn effective_maximum_interval(initial_interval: Duration, maximum_interval: Duration) -> Duration {
    if !maximum_interval.is_zero() {
        return maximum_interval;
    }
    initial_interval
        .checked_mul(100)
        .unwrap_or(Duration::MAX)
}

//! The retryability classifier: `is_retryable`.
//!
//! A total, pure function over the outermost node of a [`Failure`] tree.
//! See spec.md §4.1 for the six-rule precedence this implements; the
//! comments below name each rule by its number there.

use crate::failure::{Failure, FailureInfo, TimeoutKind};
use std::collections::HashSet;

/// The fixed prefix used to derive a blocklist key for timeout failures
/// (spec.md §4.1 rule 5, §9). Callers populating `non_retryable_types`
/// must spell this exactly.
pub const TIMEOUT_TYPE_KEY_PREFIX: &str = "TimeoutType:";

/// Decides whether `failure` may be retried at all.
///
/// `None` is treated as retryable: there is no failure to reject.
pub fn is_retryable(failure: Option<&Failure>, non_retryable_types: &HashSet<String>) -> bool {
    let Some(failure) = failure else {
        return true;
    };

    // Rule 1: a child-workflow wrapper is always retryable, regardless of
    // its cause. The cause is never consulted in this branch.
    if matches!(failure.info, FailureInfo::ChildWorkflowExecutionFailure) {
        return true;
    }

    // Rule 2: unambiguously non-retryable kinds.
    if matches!(
        failure.info,
        FailureInfo::TerminatedFailure | FailureInfo::CanceledFailure
    ) {
        return false;
    }

    // Rule 3: timeout kinds; only StartToClose and Heartbeat retry.
    if let FailureInfo::TimeoutFailure { timeout_type } = &failure.info {
        if !matches!(
            timeout_type,
            TimeoutKind::StartToClose | TimeoutKind::Heartbeat
        ) {
            return false;
        }
    }

    // Rule 4: explicit non-retryable flags.
    match &failure.info {
        FailureInfo::ServerFailure { non_retryable } if *non_retryable => return false,
        FailureInfo::ApplicationFailure { non_retryable, .. } if *non_retryable => return false,
        _ => {}
    }

    // Rule 5: user type filter, via a derived blocklist key.
    if let Some(key) = blocklist_key(&failure.info) {
        if !key.is_empty() && non_retryable_types.contains(&key) {
            return false;
        }
    }

    // Rule 6: default.
    true
}

/// Derives the string key rule 5 matches against the caller's blocklist,
/// or `None` if this failure kind has no key (the filter never rejects
/// such a failure).
fn blocklist_key(info: &FailureInfo) -> Option<String> {
    match info {
        FailureInfo::TimeoutFailure { timeout_type } => {
            Some(format!("{TIMEOUT_TYPE_KEY_PREFIX}{}", timeout_type.wire_name()))
        }
        FailureInfo::ApplicationFailure { r#type, .. } => Some(r#type.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::Failure;

    fn empty() -> HashSet<String> {
        HashSet::new()
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // Scenario 1
    #[test]
    fn terminated_is_not_retryable() {
        assert!(!is_retryable(Some(&Failure::terminated()), &empty()));
    }

    // Scenario 2
    #[test]
    fn start_to_close_timeout_is_retryable_by_default() {
        let f = Failure::timeout(TimeoutKind::StartToClose);
        assert!(is_retryable(Some(&f), &empty()));
    }

    // Scenario 3
    #[test]
    fn start_to_close_timeout_blocked_by_type_filter() {
        let f = Failure::timeout(TimeoutKind::StartToClose);
        assert!(!is_retryable(
            Some(&f),
            &set(&["TimeoutType:StartToClose"])
        ));
    }

    // Scenario 4
    #[test]
    fn heartbeat_timeout_not_blocked_by_unrelated_filter_entry() {
        let f = Failure::timeout(TimeoutKind::Heartbeat);
        assert!(is_retryable(
            Some(&f),
            &set(&["TimeoutType:StartToClose"])
        ));
    }

    // Scenario 5
    #[test]
    fn application_failure_blocked_by_exact_type_match() {
        let f = Failure::application("type", false);
        assert!(!is_retryable(Some(&f), &set(&["otherType", "type"])));
    }

    // Scenario 6
    #[test]
    fn child_workflow_wrapper_overrides_non_retryable_cause() {
        let cause = Failure::application("whatever", true);
        let wrapped = Failure::activity(cause);
        let child = Failure::child_workflow(wrapped);
        assert!(is_retryable(Some(&child), &empty()));
    }

    // Scenario 13
    #[test]
    fn server_failure_flag_wins_over_default() {
        let f = Failure::server(true);
        assert!(!is_retryable(Some(&f), &empty()));
    }

    #[test]
    fn absent_failure_is_retryable() {
        assert!(is_retryable(None, &empty()));
    }

    #[test]
    fn schedule_to_start_and_schedule_to_close_are_not_retryable() {
        assert!(!is_retryable(
            Some(&Failure::timeout(TimeoutKind::ScheduleToStart)),
            &empty()
        ));
        assert!(!is_retryable(
            Some(&Failure::timeout(TimeoutKind::ScheduleToClose)),
            &empty()
        ));
        assert!(!is_retryable(
            Some(&Failure::timeout(TimeoutKind::Unspecified)),
            &empty()
        ));
    }

    #[test]
    fn canceled_is_not_retryable() {
        assert!(!is_retryable(Some(&Failure::canceled()), &empty()));
    }

    #[test]
    fn non_retryable_application_flag_overrides_default() {
        let f = Failure::application("anything", true);
        assert!(!is_retryable(Some(&f), &empty()));
    }

    #[test]
    fn blocklist_reordering_and_duplicates_do_not_change_the_outcome() {
        let f = Failure::application("type", false);
        let a = set(&["type", "other"]);
        let b = set(&["other", "type", "type"]);
        assert_eq!(is_retryable(Some(&f), &a), is_retryable(Some(&f), &b));
    }

    #[test]
    fn child_workflow_short_circuit_holds_through_intermediate_activity_wrapper() {
        // Lock the precedence rule: regardless of how deep the
        // non-retryable cause sits, the child-workflow wrapper wins.
        let innermost = Failure::server(true);
        let through_activity = Failure::child_workflow(Failure::activity(innermost));
        assert!(is_retryable(Some(&through_activity), &empty()));
    }
}

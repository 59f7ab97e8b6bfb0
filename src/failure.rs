//! The failure tree consumed by the retry decision core.
//!
//! A [`Failure`] is a node in a finite, acyclic chain: each node carries
//! exactly one [`FailureInfo`] and an optional `cause`, the failure that
//! produced it. The outermost node is closest to the observer; the
//! innermost (the end of the `cause` chain) is closest to the origin.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single kind of timeout, as reported by the workflow's task timers.
///
/// The stringified names below are part of the wire contract (spec.md
/// §9): callers populating a non-retryable-type blocklist must spell
/// these exactly as [`TimeoutKind::wire_name`] returns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeoutKind {
    Unspecified,
    StartToClose,
    ScheduleToStart,
    ScheduleToClose,
    Heartbeat,
}

impl TimeoutKind {
    /// The canonical wire-protocol name for this timeout kind.
    pub fn wire_name(&self) -> &'static str {
        match self {
            TimeoutKind::Unspecified => "Unspecified",
            TimeoutKind::StartToClose => "StartToClose",
            TimeoutKind::ScheduleToStart => "ScheduleToStart",
            TimeoutKind::ScheduleToClose => "ScheduleToClose",
            TimeoutKind::Heartbeat => "Heartbeat",
        }
    }
}

impl fmt::Display for TimeoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// The discriminated union of failure kinds a [`Failure`] node may carry.
///
/// `Other` stands in for every transparent wrapper kind the core does not
/// special-case (the real system has several; the classifier only ever
/// distinguishes the variants spec.md §4.1 names).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FailureInfo {
    ApplicationFailure { r#type: String, non_retryable: bool },
    TimeoutFailure { timeout_type: TimeoutKind },
    ServerFailure { non_retryable: bool },
    CanceledFailure,
    TerminatedFailure,
    ActivityFailure,
    ChildWorkflowExecutionFailure,
    Other,
}

/// One node of the failure tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub info: FailureInfo,
    pub cause: Option<Box<Failure>>,
}

impl Failure {
    /// Builds a leaf failure (no cause) from its `info`.
    pub fn new(info: FailureInfo) -> Self {
        Self { info, cause: None }
    }

    /// Wraps `cause` in a new outer failure of kind `info`.
    pub fn wrapping(info: FailureInfo, cause: Failure) -> Self {
        Self {
            info,
            cause: Some(Box::new(cause)),
        }
    }

    pub fn application(r#type: impl Into<String>, non_retryable: bool) -> Self {
        Self::new(FailureInfo::ApplicationFailure {
            r#type: r#type.into(),
            non_retryable,
        })
    }

    pub fn timeout(timeout_type: TimeoutKind) -> Self {
        Self::new(FailureInfo::TimeoutFailure { timeout_type })
    }

    pub fn server(non_retryable: bool) -> Self {
        Self::new(FailureInfo::ServerFailure { non_retryable })
    }

    pub fn canceled() -> Self {
        Self::new(FailureInfo::CanceledFailure)
    }

    pub fn terminated() -> Self {
        Self::new(FailureInfo::TerminatedFailure)
    }

    pub fn activity(cause: Failure) -> Self {
        Self::wrapping(FailureInfo::ActivityFailure, cause)
    }

    pub fn child_workflow(cause: Failure) -> Self {
        Self::wrapping(FailureInfo::ChildWorkflowExecutionFailure, cause)
    }

    /// The innermost failure in the chain (the node with no `cause`).
    pub fn root_cause(&self) -> &Failure {
        let mut current = self;
        while let Some(cause) = &current.cause {
            current = cause;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_cause_walks_to_the_end_of_the_chain() {
        let leaf = Failure::application("leaf", false);
        let wrapped = Failure::activity(leaf.clone());
        let double_wrapped = Failure::child_workflow(wrapped);
        assert_eq!(double_wrapped.root_cause(), &leaf);
    }

    #[test]
    fn leaf_has_no_cause() {
        let f = Failure::terminated();
        assert!(f.cause.is_none());
        assert_eq!(f.root_cause(), &f);
    }

    #[test]
    fn wire_names_match_canonical_spelling() {
        assert_eq!(TimeoutKind::StartToClose.wire_name(), "StartToClose");
        assert_eq!(TimeoutKind::Heartbeat.wire_name(), "Heartbeat");
        assert_eq!(TimeoutKind::ScheduleToStart.wire_name(), "ScheduleToStart");
        assert_eq!(TimeoutKind::ScheduleToClose.wire_name(), "ScheduleToClose");
        assert_eq!(TimeoutKind::Unspecified.wire_name(), "Unspecified");
    }
}

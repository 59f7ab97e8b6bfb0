//! retryctl: the retry decision core of a durable workflow execution engine.
//!
//! This crate answers, for one failed task attempt: (a) whether another
//! attempt is permitted at all, (b) when it must run, and (c) which
//! terminal retry state to report otherwise. The decision is made by two
//! pure, total functions:
//!
//! - [`classifier::is_retryable`] — is this failure retryable at all?
//! - [`backoff::next_backoff`] — given the policy, the attempt number,
//!   and the current time, what's the next interval and retry state?
//!
//! Everything else in this crate (`config`, `error`, `exit_codes`,
//! `validation`) is the ambient layer around the core: loading a policy
//! from a config file, reporting a CLI exit code, validating a scenario
//! file before handing it to the pure functions above. The core itself
//! performs no I/O and never reads a clock (`now` is always an argument).
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use retryctl::backoff::next_backoff;
//! use retryctl::failure::Failure;
//! use retryctl::policy::RetryPolicy;
//!
//! let policy = RetryPolicy::bounded_default();
//! let failure = Failure::server(false);
//! let (interval, state) = next_backoff(Utc::now(), 1, &policy, Some(&failure));
//! println!("{interval:?} {state:?}");
//! ```

pub mod backoff;
pub mod classifier;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod failure;
pub mod policy;
pub mod validation;

pub use backoff::{next_backoff, Interval, RetryState};
pub use classifier::is_retryable;
pub use config::Config;
pub use error::{ConfigError, Result, RetryCtlError};
pub use failure::{Failure, FailureInfo, TimeoutKind};
pub use policy::RetryPolicy;

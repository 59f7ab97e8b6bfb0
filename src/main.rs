//! retryctl CLI entry point
//!
//! This is the main binary for the retryctl command-line interface. It is
//! a thin demonstration shell over the library: the decision core itself
//! has no CLI, no files, and no environment variables (spec.md §6) — this
//! binary exists purely so a scenario can be exercised end-to-end from
//! the command line, the way every binary in this house style is a thin
//! `clap` front over its own library.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use retryctl::backoff::{next_backoff, Interval, RetryState};
use retryctl::classifier::is_retryable;
use retryctl::config::Config;
use retryctl::error::RetryCtlError;
use retryctl::exit_codes::{exit_code_for_error, exit_code_for_retry_state};
use retryctl::failure::Failure;
use retryctl::policy::RetryPolicy;
use retryctl::validation::validate_scenario_policy;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retryctl")]
#[command(
    about = "Retry decision core for a durable workflow execution engine",
    long_about = "retryctl exercises the retry decision core from the command line:\n\n  - classify: is this failure retryable at all?\n  - decide: given a policy, attempt number, and current time, what's\n    the next backoff interval and retry state?\n\nThe decision functions themselves are pure; this binary only wires them\nto scenario files on disk."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Retry policy config file (TOML). Defaults to .retryctl.toml in the
    /// current directory if present, else built-in presets.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    output: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether a failure is retryable at all
    ///
    /// Examples:
    ///   retryctl classify --scenario failure.json
    Classify {
        /// Path to a JSON scenario file describing the failure
        #[arg(long, value_name = "FILE")]
        scenario: PathBuf,
    },
    /// Compute the next backoff interval and retry state for one attempt
    ///
    /// Examples:
    ///   retryctl decide --scenario attempt.json
    ///   retryctl decide --scenario attempt.json --policy-preset unbounded
    Decide {
        /// Path to a JSON scenario file describing now/attempt/failure
        #[arg(long, value_name = "FILE")]
        scenario: PathBuf,
        /// Named policy preset from the config file (defaults to the
        /// config's own default preset)
        #[arg(long, value_name = "NAME")]
        policy_preset: Option<String>,
    },
}

/// A failure description plus the blocklist `classify` checks it against.
#[derive(Debug, Deserialize)]
struct ClassifyScenario {
    failure: Option<Failure>,
    #[serde(default)]
    non_retryable_error_types: HashSet<String>,
}

/// Everything `decide` needs: the clock reading, the attempt ordinal, the
/// failure, and (optionally) a policy overriding the resolved preset.
#[derive(Debug, Deserialize)]
struct DecideScenario {
    now: chrono::DateTime<chrono::Utc>,
    attempt: i32,
    failure: Option<Failure>,
    #[serde(default)]
    policy: Option<RetryPolicy>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = run(&cli);

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            if cli.output == "json" {
                let error_json = serde_json::json!({
                    "success": false,
                    "error": format!("{e}"),
                });
                eprintln!("{}", serde_json::to_string_pretty(&error_json)?);
            } else {
                eprintln!("Error: {e}");
            }
            let code = e
                .downcast_ref::<RetryCtlError>()
                .map(exit_code_for_error)
                .unwrap_or(1);
            std::process::exit(code);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Commands::Classify { scenario } => run_classify(scenario, cli.output == "json"),
        Commands::Decide {
            scenario,
            policy_preset,
        } => run_decide(scenario, policy_preset.as_deref(), cli.config.as_deref(), cli.output == "json"),
    }
}

fn run_classify(scenario_path: &PathBuf, json_output: bool) -> Result<i32> {
    let content = std::fs::read_to_string(scenario_path)
        .with_context(|| format!("Failed to read scenario: {}", scenario_path.display()))?;
    let scenario: ClassifyScenario = serde_json::from_str(&content)
        .map_err(RetryCtlError::from)
        .with_context(|| format!("Failed to parse scenario: {}", scenario_path.display()))?;

    let retryable = is_retryable(scenario.failure.as_ref(), &scenario.non_retryable_error_types);
    info!(retryable, "classified failure");

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "retryable": retryable }))?
        );
    } else {
        println!("retryable: {retryable}");
    }
    Ok(0)
}

fn run_decide(
    scenario_path: &PathBuf,
    policy_preset: Option<&str>,
    config_path: Option<&std::path::Path>,
    json_output: bool,
) -> Result<i32> {
    let content = std::fs::read_to_string(scenario_path)
        .with_context(|| format!("Failed to read scenario: {}", scenario_path.display()))?;
    let scenario: DecideScenario = serde_json::from_str(&content)
        .map_err(RetryCtlError::from)
        .with_context(|| format!("Failed to parse scenario: {}", scenario_path.display()))?;

    let policy = match scenario.policy {
        Some(policy) => policy,
        None => {
            let config = Config::load(config_path)?;
            config
                .resolve_policy(policy_preset)
                .map_err(RetryCtlError::Config)?
                .clone()
        }
    };
    validate_scenario_policy(&policy)?;

    let (interval, state) = next_backoff(scenario.now, scenario.attempt, &policy, scenario.failure.as_ref());

    match state {
        RetryState::InProgress => info!(?interval, ?state, "next attempt scheduled"),
        _ => warn!(?state, "retry decision is terminal"),
    }

    if json_output {
        let interval_json = match interval {
            Interval::Wait(d) => serde_json::json!({ "wait_ms": d.as_millis() }),
            Interval::NoBackoff => serde_json::json!("no_backoff"),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "interval": interval_json,
                "retry_state": format!("{state:?}"),
            }))?
        );
    } else {
        println!("interval: {interval:?}");
        println!("retry_state: {state:?}");
    }

    Ok(exit_code_for_retry_state(state))
}

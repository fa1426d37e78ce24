//! Conformance runner for variable handle access modes
//!
//! Drives every fixture handle through its legal operations with fixed bit
//! patterns, checks returned values and post-state, and separately confirms
//! that illegal operations report the right error class.
//!
//! # Example
//!
//! ```no_run
//! use varaccess_harness::{HarnessConfig, ScenarioRunner};
//!
//! let reports = ScenarioRunner::new(HarnessConfig::default()).run_all()?;
//! assert!(reports.iter().all(|r| r.all_passed()));
//! # Ok::<(), varaccess_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod case;
pub mod check;
pub mod config;
pub mod fixture;
pub mod runner;
pub mod scenarios;

pub use case::{AccessTestCase, LookupTestCase, Scenario, ScenarioBody};
pub use check::{CheckFailure, CheckResult};
pub use config::{ConfigError, HarnessConfig, RunProfile};
pub use fixture::AccessFixture;
pub use runner::{ScenarioOutcome, ScenarioPhase, ScenarioRunner, SuiteReport};
pub use scenarios::ScenarioContext;

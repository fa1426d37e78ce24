//! Scenario runner
//!
//! Each scenario moves through a small state machine:
//!
//! ```text
//! INIT ──► EXECUTE (once, or `iters` times) ──► VERIFY ──► DONE
//!   │          │                                  │
//!   └──────────┴──────────────► FAILED ◄──────────┘
//! ```
//!
//! A failure ends only its own scenario. The first unmet expectation is
//! recorded with the iteration it happened in; sibling scenarios still run.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};
use varaccess_core::Result;

use crate::case::{access_test_cases, capability_test_cases, lookup_test_cases, Scenario};
use crate::check::CheckFailure;
use crate::config::HarnessConfig;
use crate::fixture::AccessFixture;
use crate::scenarios::ScenarioContext;

/// Lifecycle phase of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScenarioPhase {
    /// Preconditions
    Init,
    /// Body execution
    Execute,
    /// Post-state checks
    Verify,
    /// Completed successfully
    Done,
    /// Aborted on the first unmet expectation
    Failed,
}

impl fmt::Display for ScenarioPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScenarioPhase::Init => "INIT",
            ScenarioPhase::Execute => "EXECUTE",
            ScenarioPhase::Verify => "VERIFY",
            ScenarioPhase::Done => "DONE",
            ScenarioPhase::Failed => "FAILED",
        };
        write!(f, "{}", name)
    }
}

/// Where and how a scenario failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioFailure {
    /// Phase the failure happened in
    pub phase: ScenarioPhase,
    /// Zero-based iteration, for failures during the loop
    pub iteration: Option<usize>,
    /// The broken expectation
    pub detail: CheckFailure,
}

impl fmt::Display for ScenarioFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.iteration {
            Some(i) => write!(f, "{} (iteration {}): {}", self.phase, i, self.detail),
            None => write!(f, "{}: {}", self.phase, self.detail),
        }
    }
}

/// Result of one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioOutcome {
    /// Scenario description
    pub description: String,
    /// Terminal phase: [`ScenarioPhase::Done`] or [`ScenarioPhase::Failed`]
    pub phase: ScenarioPhase,
    /// Executions completed without failure
    pub iterations_run: usize,
    /// Failure details when `phase` is `Failed`
    pub failure: Option<ScenarioFailure>,
}

impl ScenarioOutcome {
    /// Whether the scenario reached DONE
    pub fn passed(&self) -> bool {
        self.phase == ScenarioPhase::Done
    }
}

/// Result of one suite of scenarios
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    /// Suite name
    pub suite: &'static str,
    /// Scenarios run
    pub case_count: usize,
    /// Scenarios that reached DONE
    pub pass_count: usize,
    /// Per-scenario outcomes, in run order
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    /// Whether every scenario passed
    pub fn all_passed(&self) -> bool {
        self.case_count == self.pass_count
    }

    /// Outcomes of the failed scenarios
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}

/// Drives scenarios according to a [`HarnessConfig`]
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: HarnessConfig,
}

impl ScenarioRunner {
    /// Create a runner
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    fn context(&self) -> ScenarioContext {
        ScenarioContext {
            weak_attempts: self.config.weak_attempts,
        }
    }

    /// Run one scenario to DONE or FAILED
    pub fn run_scenario<S: Scenario + ?Sized>(&self, scenario: &S) -> ScenarioOutcome {
        let ctx = self.context();
        let iters = if scenario.requires_loop() {
            self.config.iters
        } else {
            1
        };
        let mut outcome = ScenarioOutcome {
            description: scenario.description().to_string(),
            phase: ScenarioPhase::Init,
            iterations_run: 0,
            failure: None,
        };

        if let Err(detail) = scenario.init() {
            return fail(outcome, ScenarioPhase::Init, None, detail);
        }

        outcome.phase = ScenarioPhase::Execute;
        for iteration in 0..iters {
            if let Err(detail) = scenario.execute(&ctx) {
                return fail(outcome, ScenarioPhase::Execute, Some(iteration), detail);
            }
            outcome.iterations_run += 1;
        }

        outcome.phase = ScenarioPhase::Verify;
        if let Err(detail) = scenario.verify() {
            return fail(outcome, ScenarioPhase::Verify, None, detail);
        }

        outcome.phase = ScenarioPhase::Done;
        debug!(
            target: "varaccess::runner",
            scenario = %outcome.description,
            iterations = outcome.iterations_run,
            "Scenario passed"
        );
        outcome
    }

    /// Run every scenario of a suite, continuing past failures
    pub fn run_suite<S: Scenario>(&self, suite: &'static str, cases: &[S]) -> SuiteReport {
        info!(target: "varaccess::runner", suite, cases = cases.len(), "Running suite");
        let outcomes: Vec<ScenarioOutcome> = cases.iter().map(|c| self.run_scenario(c)).collect();
        let pass_count = outcomes.iter().filter(|o| o.passed()).count();
        let report = SuiteReport {
            suite,
            case_count: outcomes.len(),
            pass_count,
            outcomes,
        };
        info!(
            target: "varaccess::runner",
            suite,
            passed = report.pass_count,
            failed = report.case_count - report.pass_count,
            "Suite finished"
        );
        report
    }

    /// Run the capability, lookup and access suites against fresh fixtures
    pub fn run_all(&self) -> Result<Vec<SuiteReport>> {
        info!(
            target: "varaccess::runner",
            iters = self.config.iters,
            weak_attempts = self.config.weak_attempts,
            "Starting access matrix"
        );
        let fixture = AccessFixture::new()?;
        let capabilities = self.run_suite("capabilities", &capability_test_cases(&fixture));
        let lookup = self.run_suite("lookup", &lookup_test_cases(&fixture));

        // The access suite owns its fixture's storage exclusively.
        let fixture = AccessFixture::new()?;
        let access = self.run_suite("access", &access_test_cases(&fixture));

        Ok(vec![capabilities, lookup, access])
    }
}

fn fail(
    mut outcome: ScenarioOutcome,
    phase: ScenarioPhase,
    iteration: Option<usize>,
    detail: CheckFailure,
) -> ScenarioOutcome {
    let failure = ScenarioFailure {
        phase,
        iteration,
        detail,
    };
    warn!(
        target: "varaccess::runner",
        scenario = %outcome.description,
        %failure,
        "Scenario failed"
    );
    outcome.phase = ScenarioPhase::Failed;
    outcome.failure = Some(failure);
    outcome
}

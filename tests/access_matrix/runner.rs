//! The scenario runner end to end

use varaccess::harness::case::access_test_cases;
use varaccess::harness::check::{check_value, CheckFailure, CheckResult};
use varaccess::harness::{
    AccessFixture, AccessTestCase, HarnessConfig, RunProfile, Scenario, ScenarioContext,
    ScenarioPhase, ScenarioRunner,
};
use varaccess::no_coords;

fn runner(iters: usize) -> ScenarioRunner {
    ScenarioRunner::new(HarnessConfig {
        iters,
        ..HarnessConfig::default()
    })
}

#[test]
fn test_full_matrix_passes() {
    let reports = runner(RunProfile::Interpreted.iters()).run_all().unwrap();
    for report in &reports {
        assert!(
            report.all_passed(),
            "{}: {:?}",
            report.suite,
            report.failures().collect::<Vec<_>>()
        );
    }
    let access = reports.iter().find(|r| r.suite == "access").unwrap();
    assert_eq!(access.case_count, 11);
}

#[test]
fn test_looped_cases_repeat() {
    let reports = runner(25).run_all().unwrap();
    let access = reports.iter().find(|r| r.suite == "access").unwrap();
    for outcome in &access.outcomes {
        let expected = if outcome.description.ends_with("unsupported")
            || outcome.description == "Array index out of bounds"
        {
            1
        } else {
            25
        };
        assert_eq!(outcome.iterations_run, expected, "{}", outcome.description);
    }
}

#[test]
fn test_weak_budget_of_one_is_valid_config() {
    let config = HarnessConfig {
        iters: 1,
        weak_attempts: 1,
    };
    assert!(config.validate().is_ok());
    let fixture = AccessFixture::new().unwrap();
    let cases = access_test_cases(&fixture);
    let report = ScenarioRunner::new(config).run_suite("access", &cases);
    assert_eq!(report.case_count, 11);
}

struct BrokenContract;

impl Scenario for BrokenContract {
    fn description(&self) -> &str {
        "broken contract"
    }

    fn requires_loop(&self) -> bool {
        true
    }

    fn execute(&self, _ctx: &ScenarioContext) -> CheckResult {
        check_value("getAndAdd int", 0x01234567, 0x01234568)
    }
}

#[test]
fn test_failure_is_reported_with_literals() {
    let report = runner(5).run_suite("broken", &[BrokenContract]);
    assert!(!report.all_passed());
    let outcome = &report.outcomes[0];
    assert_eq!(outcome.phase, ScenarioPhase::Failed);
    assert_eq!(outcome.iterations_run, 0);
    let failure = outcome.failure.as_ref().unwrap();
    assert_eq!(failure.iteration, Some(0));
    assert_eq!(
        failure.to_string(),
        "EXECUTE (iteration 0): getAndAdd int: expected 0x01234568, observed 0x01234567"
    );
}

/// Runs an access case, then overwrites the static field before VERIFY
struct OverwrittenAfterExecute {
    case: AccessTestCase,
}

impl Scenario for OverwrittenAfterExecute {
    fn description(&self) -> &str {
        self.case.description()
    }

    fn requires_loop(&self) -> bool {
        self.case.requires_loop()
    }

    fn execute(&self, ctx: &ScenarioContext) -> CheckResult {
        self.case.execute(ctx)?;
        self.case.handle().set(&no_coords(), 0x7777).unwrap();
        Ok(())
    }

    fn verify(&self) -> CheckResult {
        self.case.verify()
    }
}

#[test]
fn test_overwritten_location_fails_in_verify() {
    let fixture = AccessFixture::new().unwrap();
    let case = access_test_cases(&fixture)
        .into_iter()
        .find(|c| c.description() == "Static field")
        .unwrap();
    let report = runner(3).run_suite("overwritten", &[OverwrittenAfterExecute { case }]);

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.phase, ScenarioPhase::Failed);
    assert_eq!(outcome.iterations_run, 3);
    let failure = outcome.failure.as_ref().unwrap();
    assert_eq!(failure.phase, ScenarioPhase::Verify);
    assert_eq!(failure.iteration, None);
    assert!(matches!(
        failure.detail,
        CheckFailure::ValueMismatch { observed: 0x7777, .. }
    ));
}

#[test]
fn test_reports_serialize_to_json() {
    let reports = runner(1).run_all().unwrap();
    let json = serde_json::to_value(&reports).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[1]["suite"], "lookup");
    assert_eq!(json[1]["case_count"], 4);
    assert!(json[2]["outcomes"]
        .as_array()
        .unwrap()
        .iter()
        .all(|o| o["failure"].is_null()));
}

#[test]
fn test_config_file_drives_runner() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matrix.toml");
    std::fs::write(&path, "iters = 3\n").unwrap();
    let config = HarnessConfig::from_file(&path).unwrap();
    let reports = ScenarioRunner::new(config).run_all().unwrap();
    let access = reports.iter().find(|r| r.suite == "access").unwrap();
    assert_eq!(access.outcomes[0].iterations_run, 3);
}

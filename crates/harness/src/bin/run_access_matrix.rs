//! Runs the access-mode conformance matrix and reports per-scenario results.
//!
//! ```bash
//! run_access_matrix --profile compiled --json
//! ```

use clap::{Arg, ArgAction, Command};
use std::path::Path;
use std::process;
use tracing::Level;

use varaccess_harness::{HarnessConfig, RunProfile, ScenarioRunner, SuiteReport};

fn build_cli() -> Command {
    Command::new("run_access_matrix")
        .about("Check every access mode of every handle shape against its contract")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("TOML config file"),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .value_parser(["interpreted", "compiled"])
                .help("Iteration profile (default: interpreted)"),
        )
        .arg(
            Arg::new("iters")
                .long("iters")
                .value_parser(clap::value_parser!(usize))
                .help("Repetitions of each looped scenario"),
        )
        .arg(
            Arg::new("weak-attempts")
                .long("weak-attempts")
                .value_parser(clap::value_parser!(u32))
                .help("Attempts allowed for a weak compare-and-set"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print suite reports as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("print-config")
                .long("print-config")
                .help("Print the default config file and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log every scenario")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    if matches.get_flag("print-config") {
        print!("{}", HarnessConfig::default_toml());
        return;
    }

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match resolve_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("run_access_matrix: {}", e);
            process::exit(2);
        }
    };

    let reports = match ScenarioRunner::new(config).run_all() {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("run_access_matrix: {}", e);
            process::exit(2);
        }
    };

    if matches.get_flag("json") {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("run_access_matrix: {}", e);
                process::exit(2);
            }
        }
    } else {
        print_summary(&reports);
    }

    if !reports.iter().all(SuiteReport::all_passed) {
        process::exit(1);
    }
}

fn resolve_config(matches: &clap::ArgMatches) -> Result<HarnessConfig, varaccess_harness::ConfigError> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => HarnessConfig::from_file(Path::new(path))?,
        None => HarnessConfig::default(),
    };
    if let Some(profile) = matches.get_one::<String>("profile") {
        config.iters = profile.parse::<RunProfile>()?.iters();
    }
    let mut config = config.with_env_overrides()?;
    if let Some(&iters) = matches.get_one::<usize>("iters") {
        config.iters = iters;
    }
    if let Some(&attempts) = matches.get_one::<u32>("weak-attempts") {
        config.weak_attempts = attempts;
    }
    config.validate()?;
    Ok(config)
}

fn print_summary(reports: &[SuiteReport]) {
    for report in reports {
        println!(
            "{}: total={} passed={} failed={}",
            report.suite,
            report.case_count,
            report.pass_count,
            report.case_count - report.pass_count
        );
        for outcome in &report.outcomes {
            match &outcome.failure {
                None => println!("  ok    {} ({} iteration(s))", outcome.description, outcome.iterations_run),
                Some(failure) => println!("  FAIL  {}: {}", outcome.description, failure),
            }
        }
    }
}

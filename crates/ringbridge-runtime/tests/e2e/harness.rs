//! Test harness for end-to-end runs
//!
//! Builds a scripted VM factory with the default hook wiring and runs
//! programs through `run_script`.

#![allow(dead_code)]

use ringbridge_runtime::options::{DEFAULT_HOOK_NAME, DEFAULT_REBIND_SOURCE};
use ringbridge_runtime::{run_script, BridgeOptions, RunOutput};
use ringbridge_sdk::scripted::{ScriptedFactory, ScriptedValue, Step};

pub use ringbridge_runtime::RunStatus;

/// Source key used for single-program tests
pub const PROGRAM: &str = "main";

/// Install a fmt subscriber that writes through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Factory with the default rebind wiring and no programs
pub fn factory() -> ScriptedFactory {
    init_tracing();
    ScriptedFactory::new(DEFAULT_REBIND_SOURCE, DEFAULT_HOOK_NAME)
}

/// Run a program made of `see` calls with the given options
pub fn run_with(values: Vec<ScriptedValue>, options: &BridgeOptions) -> RunOutput {
    let steps = values.into_iter().map(Step::See).collect();
    let factory = factory().program(PROGRAM, steps);
    run_script(&factory, PROGRAM, options)
}

/// Run a program made of `see` calls with default options
pub fn run(values: Vec<ScriptedValue>) -> RunOutput {
    run_with(values, &BridgeOptions::default())
}

/// Run and assert the captured text
pub fn expect_output(values: Vec<ScriptedValue>, expected: &str) {
    let output = run(values);
    assert_eq!(output.status(), RunStatus::Completed);
    assert_eq!(
        output.text(),
        expected,
        "unexpected output; got {:?}",
        output.text()
    );
}

/// String value
pub fn s(text: &str) -> ScriptedValue {
    ScriptedValue::str(text)
}

/// Number value
pub fn n(value: f64) -> ScriptedValue {
    ScriptedValue::Num(value)
}

/// List value
pub fn list(items: Vec<ScriptedValue>) -> ScriptedValue {
    ScriptedValue::List(items)
}

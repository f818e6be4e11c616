//! VM lifecycle around a run.

use super::harness::*;
use ringbridge_runtime::options::SETUP_ERROR;
use ringbridge_runtime::{run_script, Bridge, BridgeOptions};
use ringbridge_sdk::scripted::Step;

#[test]
fn test_each_run_creates_and_releases_one_vm() {
    let factory = factory().program(PROGRAM, vec![Step::See(s("x"))]);
    let bridge = Bridge::new(factory, BridgeOptions::default());
    bridge.run(PROGRAM);
    bridge.run(PROGRAM);
    assert_eq!(bridge.factory().created(), 2);
    assert_eq!(bridge.factory().released(), 2);
}

#[test]
fn test_runs_do_not_share_output() {
    let factory = factory()
        .program("first", vec![Step::See(s("one"))])
        .program("second", vec![Step::See(s("two"))]);
    let bridge = Bridge::new(factory, BridgeOptions::default());
    assert_eq!(bridge.run("first").text(), "one");
    assert_eq!(bridge.run("second").text(), "two");
}

#[test]
fn test_truncation_does_not_carry_over() {
    let factory = factory()
        .program("big", vec![Step::See(s("0123456789"))])
        .program("small", vec![Step::See(s("ok"))]);
    let bridge = Bridge::new(factory, BridgeOptions::default().with_capacity(8));
    assert!(bridge.run("big").is_truncated());
    let small = bridge.run("small");
    assert_eq!(small.text(), "ok");
    assert!(!small.is_truncated());
}

#[test]
fn test_init_failure_sentinel() {
    let factory = factory().failing_init();
    let output = run_script(&factory, "see 1", &BridgeOptions::default());
    assert_eq!(output.status(), RunStatus::InitFailed);
    assert_eq!(output.text(), "Error: Failed to init RingState");
    assert!(!output.is_truncated());
}

#[test]
fn test_custom_init_error_message() {
    let factory = factory().failing_init();
    let options = BridgeOptions {
        init_error_message: "VM unavailable".to_string(),
        ..BridgeOptions::default()
    };
    assert_eq!(run_script(&factory, "", &options).text(), "VM unavailable");
}

#[test]
fn test_hook_rejection_releases_vm() {
    let factory = factory().rejecting_hooks();
    let output = run_script(&factory, PROGRAM, &BridgeOptions::default());
    assert_eq!(output.status(), RunStatus::SetupFailed);
    assert_eq!(output.text(), SETUP_ERROR);
    assert_eq!(factory.released(), 1);
}

#[test]
fn test_script_error_keeps_earlier_output() {
    let factory = factory().program(
        PROGRAM,
        vec![
            Step::See(s("partial")),
            Step::Fail("Error (R3): Calling function without definition".to_string()),
            Step::See(s("never")),
        ],
    );
    let output = run_script(&factory, PROGRAM, &BridgeOptions::default());
    assert_eq!(output.status(), RunStatus::Completed);
    assert_eq!(output.text(), "partial");
    assert_eq!(factory.released(), 1);
}

#[test]
fn test_empty_source() {
    let factory = factory();
    let output = run_script(&factory, "", &BridgeOptions::default());
    assert_eq!(output.status(), RunStatus::Completed);
    assert_eq!(output.text(), "");
}

#[test]
fn test_see_reaches_hook_only_through_rebind() {
    // the VM rebinds `see` to a name the bridge never registers
    let factory = ringbridge_sdk::scripted::ScriptedFactory::new(
        ringbridge_runtime::options::DEFAULT_REBIND_SOURCE,
        "some_other_hook",
    )
    .program(PROGRAM, vec![Step::See(s("lost"))]);
    let output = run_script(&factory, PROGRAM, &BridgeOptions::default());
    assert_eq!(output.text(), "");
    assert_eq!(factory.unrouted_prints(), 1);
}

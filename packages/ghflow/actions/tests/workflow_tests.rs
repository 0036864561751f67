use ghflow_actions::{
    official::{Checkout, UploadArtifact},
    rust::{RustCache, Toolchain},
};
use ghflow_model::{
    Job, PushTrigger, Step, StepAction, Workflow,
    serde_yaml::{self, Value},
};
use pretty_assertions::assert_eq;

#[test_log::test]
fn artifact_upload_emits_only_set_inputs_in_key_order() {
    let workflow = Workflow::new("CI").push(PushTrigger::new()).job(
        "build",
        Job::new("ubuntu-latest").action(
            UploadArtifact::new()
                .path("./build")
                .retention_days(7_u32)
                .overwrite(false)
                .name(""),
        ),
    );

    let yaml = workflow.render().unwrap();

    assert!(yaml.contains(
        "\
    steps:
    - uses: actions/upload-artifact@v4
      with:
        path: ./build
        retention-days: 7
"
    ));
}

#[test_log::test]
fn unset_toolchain_emits_bare_uses() {
    let workflow = Workflow::new("CI")
        .push(PushTrigger::new())
        .job("setup", Job::new("ubuntu-latest").action(Toolchain::new()));

    let yaml = workflow.render().unwrap();

    assert!(yaml.ends_with("    steps:\n    - uses: dtolnay/rust-toolchain@master\n"));
}

#[test_log::test]
fn checkout_toolchain_and_script_render_in_order() {
    let workflow = Workflow::new("CI").push(PushTrigger::new().branch("main")).job(
        "test",
        Job::new("ubuntu-latest")
            .step(Step::uses("actions/checkout@v4"))
            .action(Toolchain::stable())
            .step(Step::run("cargo test")),
    );

    let document: Value = serde_yaml::from_str(&workflow.render().unwrap()).unwrap();
    let steps = document["jobs"]["test"]["steps"].as_sequence().unwrap();

    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0]["uses"], Value::from("actions/checkout@v4"));
    assert!(steps[0].get("with").is_none());
    assert_eq!(steps[1]["uses"], Value::from(Toolchain::REFERENCE));
    assert_eq!(steps[1]["with"]["toolchain"], Value::from("stable"));
    assert_eq!(steps[2]["run"], Value::from("cargo test"));
    assert!(steps[2].get("with").is_none());
}

#[test_log::test]
fn full_history_checkout_renders_zero_depth() {
    let workflow = Workflow::new("Release")
        .push(PushTrigger::new().tag("v*"))
        .job(
            "release",
            Job::new("ubuntu-latest")
                .action(Checkout::new().fetch_depth(0_u32))
                .action(RustCache::new()),
        );

    let yaml = workflow.render().unwrap();

    assert!(yaml.contains("      with:\n        fetch-depth: 0\n"));
    assert!(yaml.contains("    - uses: Swatinem/rust-cache@v2\n"));
}

#[test_log::test]
fn adapter_step_with_id_goes_through_step() {
    let toolchain = Toolchain::nightly();
    let workflow = Workflow::new("CI").push(PushTrigger::new()).job(
        "test",
        Job::new("ubuntu-latest").step(Step::from_action(&toolchain).id("toolchain")),
    );

    let document: Value = serde_yaml::from_str(&workflow.render().unwrap()).unwrap();
    let step = &document["jobs"]["test"]["steps"][0];

    assert_eq!(step["id"], Value::from("toolchain"));
    assert_eq!(step["uses"], Value::from(toolchain.reference()));
    assert_eq!(step["with"]["toolchain"], Value::from("nightly"));
}

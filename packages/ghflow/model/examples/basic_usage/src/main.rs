#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Basic usage example for `ghflow_model`
//!
//! This example demonstrates:
//! - Declaring jobs with typed action wrappers and raw steps
//! - Expressing `needs` with job values instead of key strings
//! - Validating the workflow before rendering
//! - Rendering the workflow YAML to stdout

use ghflow_actions::{
    official::{Checkout, UploadArtifact},
    rust::{RustCache, Toolchain},
};
use ghflow_model::{
    Concurrency, Job, Matrix, PermissionLevel, Permissions, PullRequestTrigger, PushTrigger,
    Step, Strategy, Workflow,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let lint = Job::new("ubuntu-latest")
        .name("Lint")
        .action(Checkout::new())
        .action(Toolchain::stable().components("clippy, rustfmt"))
        .action(RustCache::new())
        .step(Step::run("cargo fmt --check"))
        .step(Step::run("cargo clippy --all-targets -- -D warnings"));

    let test = Job::new("${{ matrix.os }}")
        .name("Test")
        .strategy(
            Strategy::matrix(
                Matrix::new()
                    .axis("os", ["ubuntu-latest", "macos-latest", "windows-latest"])
                    .axis("toolchain", ["stable", "nightly"]),
            )
            .fail_fast(false),
        )
        .action(Checkout::new())
        .step(
            Step::uses(Toolchain::REFERENCE)
                .with("toolchain", "${{ matrix.toolchain }}"),
        )
        .step(Step::run("cargo test --workspace").env("RUST_BACKTRACE", 1));

    let release = Job::new("ubuntu-latest")
        .name("Release build")
        .needs(&lint)
        .needs(&test)
        .if_condition("github.ref == 'refs/heads/main'")
        .action(Checkout::new().fetch_depth(0_u32))
        .action(Toolchain::stable())
        .step(Step::run("cargo build --release\nls -l target/release\n"))
        .action(
            UploadArtifact::new()
                .name("release")
                .path("target/release")
                .retention_days(5_u32),
        );

    let workflow = Workflow::new("CI")
        .push(PushTrigger::new().branch("main"))
        .pull_request(PullRequestTrigger::new())
        .permissions(Permissions::scoped().grant("contents", PermissionLevel::Read))
        .concurrency(Concurrency::new("ci-${{ github.ref }}").cancel_in_progress(true))
        .job("lint", lint)
        .job("test", test)
        .job("release", release);

    let defects = workflow.validate();
    if !defects.is_empty() {
        for defect in &defects {
            log::error!("{defect}");
        }
        return Err(format!("workflow has {} defect(s)", defects.len()).into());
    }

    let needs = ghflow_model::resolve_needs(&workflow)?;
    log::info!("release job needs {:?}", needs["release"]);

    ghflow_model::render_to_writer(&workflow, std::io::stdout().lock())?;

    Ok(())
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! # ghflow model
//!
//! Strongly-typed object model for GitHub Actions workflows, and the renderer
//! that turns it into the workflow YAML the runner reads from
//! `.github/workflows/`.
//!
//! * [`Workflow`], [`Job`], [`Step`], [`Triggers`], [`Strategy`] and friends
//!   hold the authored configuration.
//! * [`StepAction`] is the contract for typed wrappers around third-party
//!   actions; [`step_action!`] declares one from a table of inputs.
//! * Jobs declare `needs` with job values; [`resolve_needs`] maps them back
//!   to job keys.
//! * [`render`] emits deterministic YAML, [`validate`] reports every defect
//!   without emitting anything.
//!
//! # Examples
//!
//! ```
//! use ghflow_model::{Job, PushTrigger, Step, Workflow};
//!
//! let build = Job::new("ubuntu-latest")
//!     .step(Step::uses("actions/checkout@v4"))
//!     .step(Step::run("cargo build --locked"));
//!
//! let workflow = Workflow::new("CI")
//!     .push(PushTrigger::new().branch("main"))
//!     .job("build", build);
//!
//! let yaml = ghflow_model::render(&workflow)?;
//! assert!(yaml.starts_with("name: CI\non:\n"));
//! # Ok::<(), ghflow_model::Error>(())
//! ```

// Re-export for convenience
pub use serde_yaml;

mod action;
mod error;
mod job;
mod render;
mod resolve;
mod settings;
mod step;
mod strategy;
mod trigger;
mod value;
mod workflow;

pub use action::*;
pub use error::*;
pub use job::*;
pub use render::{render, render_to_writer, validate};
pub use resolve::resolve_needs;
pub use settings::*;
pub use step::*;
pub use strategy::*;
pub use trigger::*;
pub use value::*;
pub use workflow::*;

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! # ghflow
//!
//! Author GitHub Actions workflows as typed Rust values and render them to
//! the YAML files the runner reads.
//!
//! ## Features
//!
//! * `model` - workflows, jobs, steps, triggers and the YAML renderer
//! * `actions` - typed wrappers for commonly used actions

/// Workflow object model and YAML renderer.
///
/// Re-exported from the `ghflow_model` crate. Enable the `model` feature to
/// access this module.
#[cfg(feature = "model")]
pub use ghflow_model as model;

/// Typed wrappers for commonly used actions.
///
/// Re-exported from the `ghflow_actions` crate. Enable the `actions` feature
/// to access this module.
#[cfg(feature = "actions")]
pub use ghflow_actions as actions;

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! # ghflow actions
//!
//! Typed wrappers for commonly used GitHub Actions. Each wrapper is a plain
//! value with one field per action input; unset fields are left out of the
//! rendered `with` block.
//!
//! Wrappers are grouped by publisher, each behind a feature of the same name:
//!
//! * [`official`] - the `actions/*` family
//! * [`rust`] - Rust toolchain, caching and tool installation
//! * [`docker`] - the `docker/*` family
//! * [`release`] - publishing releases, pages, pull requests and coverage
//!
//! # Examples
//!
//! ```
//! use ghflow_actions::{official::Checkout, rust::Toolchain};
//! use ghflow_model::{Job, PushTrigger, Step, Workflow};
//!
//! let test = Job::new("ubuntu-latest")
//!     .action(Checkout::new())
//!     .action(Toolchain::stable().components("clippy"))
//!     .step(Step::run("cargo clippy"));
//!
//! let yaml = Workflow::new("CI")
//!     .push(PushTrigger::new())
//!     .job("test", test)
//!     .render()?;
//!
//! assert!(yaml.contains("- uses: dtolnay/rust-toolchain@master\n"));
//! # Ok::<(), ghflow_model::Error>(())
//! ```

#[cfg(feature = "docker")]
pub mod docker;

#[cfg(feature = "official")]
pub mod official;

#[cfg(feature = "release")]
pub mod release;

#[cfg(feature = "rust")]
pub mod rust;

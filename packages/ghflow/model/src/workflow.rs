//! The top-level workflow definition.

use std::collections::BTreeMap;

use crate::{
    Concurrency, Defaults, Error, InputValue, Job, Permissions, PullRequestTrigger, PushTrigger,
    Triggers, WorkflowDispatch,
};

/// A complete workflow: triggers plus a map of jobs keyed by job id.
///
/// # Structure
///
/// ```yaml
/// name: string
/// run-name: string
/// on:
///   push: {branches, branches-ignore, tags, tags-ignore, paths, paths-ignore}
///   pull_request: {branches, branches-ignore, types, paths, paths-ignore}
///   schedule:
///   - cron: string
///   workflow_dispatch: {inputs}
/// permissions: read-all | write-all | {scope: level}
/// env: {KEY: value}
/// concurrency: {group, cancel-in-progress}
/// defaults:
///   run: {shell, working-directory}
/// jobs:
///   job-key:
///     name: string
///     runs-on: string
///     needs: [job-key]
///     if: expression
///     timeout-minutes: integer
///     strategy: {matrix, fail-fast, max-parallel}
///     environment: name | {name, url}
///     outputs: {name: expression}
///     steps:
///     - {id, name, if, uses, with, run, env, working-directory, shell}
/// ```
///
/// # Examples
///
/// ```
/// use ghflow_model::{Job, PushTrigger, Step, Workflow};
///
/// let build = Job::new("ubuntu-latest").step(Step::run("cargo build"));
/// let test = Job::new("ubuntu-latest").needs(&build).step(Step::run("cargo test"));
///
/// let workflow = Workflow::new("CI")
///     .push(PushTrigger::new().branch("main"))
///     .job("build", build)
///     .job("test", test);
///
/// let yaml = workflow.render()?;
/// assert!(yaml.contains("needs:\n    - build\n"));
/// # Ok::<(), ghflow_model::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workflow {
    /// Display name
    pub name: Option<String>,

    /// Name of each run, may reference the triggering event
    pub run_name: Option<String>,

    /// Events that start the workflow
    pub on: Triggers,

    /// Default `GITHUB_TOKEN` permissions
    pub permissions: Option<Permissions>,

    /// Environment variables for every job
    pub env: BTreeMap<String, InputValue>,

    /// Workflow-wide concurrency group
    pub concurrency: Option<Concurrency>,

    /// Defaults for `run` steps of every job
    pub defaults: Option<Defaults>,

    /// Jobs by key
    pub jobs: BTreeMap<String, Job>,
}

impl Workflow {
    /// Creates a workflow with a display name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets `run-name`
    #[must_use]
    pub fn run_name(mut self, run_name: impl Into<String>) -> Self {
        self.run_name = Some(run_name.into());
        self
    }

    /// Replaces the trigger set
    #[must_use]
    pub fn on(mut self, triggers: Triggers) -> Self {
        self.on = triggers;
        self
    }

    /// Sets the push trigger
    #[must_use]
    pub fn push(mut self, push: PushTrigger) -> Self {
        self.on.push = Some(push);
        self
    }

    /// Sets the pull request trigger
    #[must_use]
    pub fn pull_request(mut self, pull_request: PullRequestTrigger) -> Self {
        self.on.pull_request = Some(pull_request);
        self
    }

    /// Adds a cron schedule
    #[must_use]
    pub fn schedule(mut self, cron: impl Into<String>) -> Self {
        self.on = self.on.schedule(cron);
        self
    }

    /// Sets the manual trigger
    #[must_use]
    pub fn workflow_dispatch(mut self, dispatch: WorkflowDispatch) -> Self {
        self.on.workflow_dispatch = Some(dispatch);
        self
    }

    /// Sets the default token permissions
    #[must_use]
    pub fn permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Adds an environment variable
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Sets the concurrency group
    #[must_use]
    pub fn concurrency(mut self, concurrency: impl Into<Concurrency>) -> Self {
        self.concurrency = Some(concurrency.into());
        self
    }

    /// Sets the `run` defaults
    #[must_use]
    pub fn defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Registers `job` under `key`, replacing any job already there
    #[must_use]
    pub fn job(mut self, key: impl Into<String>, job: Job) -> Self {
        self.jobs.insert(key.into(), job);
        self
    }

    /// Renders the workflow to YAML. See [`crate::render`].
    ///
    /// # Errors
    ///
    /// * If the workflow is malformed (see [`crate::validate`])
    /// * If the YAML encoder fails
    pub fn render(&self) -> Result<String, Error> {
        crate::render(self)
    }

    /// Every defect in the workflow. See [`crate::validate`].
    #[must_use]
    pub fn validate(&self) -> Vec<Error> {
        crate::validate(self)
    }
}

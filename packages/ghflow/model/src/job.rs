//! Job definitions and their dependency edges.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Concurrency, Defaults, InputValue, Permissions, Step, StepAction, StepItem, Strategy};

/// A unit of work within a workflow.
///
/// Dependencies are declared with job *values*: pass the job you depend on to
/// [`Job::needs`] and the renderer resolves it to the key it is registered
/// under in the workflow. A job-key string works too.
///
/// # Examples
///
/// ```
/// use ghflow_model::{Job, Step};
///
/// let build = Job::new("ubuntu-latest")
///     .name("Build")
///     .step(Step::run("cargo build"));
///
/// let test = Job::new("ubuntu-latest")
///     .needs(&build)
///     .step(Step::run("cargo test"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Job {
    /// Display name
    pub name: Option<String>,

    /// Runner label, may be an expression such as `${{ matrix.os }}`
    pub runs_on: String,

    /// Jobs that must complete first, in declaration order
    pub needs: Vec<Need>,

    /// Condition for running this job (opaque expression)
    pub if_condition: Option<String>,

    /// Maximum minutes the job may run (zero means unset)
    pub timeout_minutes: Option<u32>,

    /// Matrix strategy
    pub strategy: Option<Strategy>,

    /// Deployment environment
    pub environment: Option<Environment>,

    /// Job outputs, name to expression
    pub outputs: BTreeMap<String, String>,

    /// Environment variables for every step
    pub env: BTreeMap<String, InputValue>,

    /// Defaults for `run` steps
    pub defaults: Option<Defaults>,

    /// Concurrency group
    pub concurrency: Option<Concurrency>,

    /// `GITHUB_TOKEN` permissions
    pub permissions: Option<Permissions>,

    /// Let the workflow pass if this job fails
    pub continue_on_error: Option<bool>,

    /// Container image the steps run in
    pub container: Option<String>,

    /// Steps, executed in order
    pub steps: Vec<StepItem>,
}

impl Job {
    /// Creates a job running on `runs_on`
    #[must_use]
    pub fn new(runs_on: impl Into<String>) -> Self {
        Self {
            runs_on: runs_on.into(),
            ..Self::default()
        }
    }

    /// Sets the display name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a dependency, either a job value or a job key
    #[must_use]
    pub fn needs(mut self, need: impl Into<Need>) -> Self {
        self.needs.push(need.into());
        self
    }

    /// Sets the `if` condition
    #[must_use]
    pub fn if_condition(mut self, condition: impl Into<String>) -> Self {
        self.if_condition = Some(condition.into());
        self
    }

    /// Sets `timeout-minutes`
    #[must_use]
    pub const fn timeout_minutes(mut self, minutes: u32) -> Self {
        self.timeout_minutes = Some(minutes);
        self
    }

    /// Sets the strategy
    #[must_use]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Binds the job to a deployment environment
    #[must_use]
    pub fn environment(mut self, environment: impl Into<Environment>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Adds an output
    #[must_use]
    pub fn output(mut self, name: impl Into<String>, expression: impl Into<String>) -> Self {
        self.outputs.insert(name.into(), expression.into());
        self
    }

    /// Adds an environment variable
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Sets the `run` defaults
    #[must_use]
    pub fn defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Sets the concurrency group
    #[must_use]
    pub fn concurrency(mut self, concurrency: impl Into<Concurrency>) -> Self {
        self.concurrency = Some(concurrency.into());
        self
    }

    /// Sets the token permissions
    #[must_use]
    pub fn permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Sets `continue-on-error`
    #[must_use]
    pub const fn continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = Some(continue_on_error);
        self
    }

    /// Sets the container image
    #[must_use]
    pub fn container(mut self, image: impl Into<String>) -> Self {
        self.container = Some(image.into());
        self
    }

    /// Appends a raw step
    #[must_use]
    pub fn step(mut self, step: impl Into<StepItem>) -> Self {
        self.steps.push(step.into());
        self
    }

    /// Appends an action wrapper step
    #[must_use]
    pub fn action<A: StepAction + 'static>(mut self, action: A) -> Self {
        self.steps.push(StepItem::action(action));
        self
    }

    /// A short human description of the job, used in diagnostics
    #[must_use]
    pub fn describe(&self) -> String {
        match (self.name.as_deref(), self.runs_on.as_str()) {
            (Some(name), _) if !name.is_empty() => format!("job named '{name}'"),
            (_, runs_on) if !runs_on.is_empty() => format!("job running on '{runs_on}'"),
            _ => format!("unnamed job with {} step(s)", self.steps.len()),
        }
    }
}

/// One entry of a job's `needs` list
#[derive(Debug, Clone, PartialEq)]
pub enum Need {
    /// A job key, passed through unchanged
    Key(String),
    /// A job value, resolved to the key it is registered under
    Job(Box<Job>),
}

impl From<&str> for Need {
    fn from(value: &str) -> Self {
        Self::Key(value.to_string())
    }
}

impl From<String> for Need {
    fn from(value: String) -> Self {
        Self::Key(value)
    }
}

impl From<Job> for Need {
    fn from(value: Job) -> Self {
        Self::Job(Box::new(value))
    }
}

impl From<&Job> for Need {
    fn from(value: &Job) -> Self {
        Self::Job(Box::new(value.clone()))
    }
}

/// A deployment environment, either a bare name or a name with a URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Environment {
    /// `environment: production`
    Name(String),
    /// `environment: {name: production, url: https://...}`
    WithUrl {
        /// Environment name
        name: String,
        /// URL shown on the deployment
        url: String,
    },
}

impl Environment {
    /// Creates an environment with a deployment URL
    #[must_use]
    pub fn with_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::WithUrl {
            name: name.into(),
            url: url.into(),
        }
    }

    /// The environment name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::WithUrl { name, .. } => name,
        }
    }
}

impl From<&str> for Environment {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<String> for Environment {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

impl From<&Self> for Environment {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_needs_accepts_job_values_and_keys() {
        let build = Job::new("ubuntu-latest").name("Build");
        let deploy = Job::new("ubuntu-latest").needs(&build).needs("lint");

        assert_eq!(
            deploy.needs,
            vec![Need::Job(Box::new(build)), Need::Key("lint".to_string())]
        );
    }

    #[test_log::test]
    fn test_describe_prefers_name_then_runner() {
        assert_eq!(Job::new("macos-14").name("Lint").describe(), "job named 'Lint'");
        assert_eq!(Job::new("macos-14").describe(), "job running on 'macos-14'");
        assert_eq!(Job::default().describe(), "unnamed job with 0 step(s)");
    }

    #[test_log::test]
    fn test_environment_serializes_as_string_or_mapping() {
        let bare = serde_yaml::to_string(&Environment::from("staging")).unwrap();
        let with_url = serde_yaml::to_string(&Environment::with_url(
            "production",
            "https://example.com",
        ))
        .unwrap();

        assert_eq!(bare, "staging\n");
        assert_eq!(with_url, "name: production\nurl: https://example.com\n");
    }

    #[test_log::test]
    fn test_shared_environment_can_bind_many_jobs() {
        let production = Environment::with_url("production", "https://example.com");

        let a = Job::new("ubuntu-latest").environment(&production);
        let b = Job::new("ubuntu-latest").environment(&production);

        assert_eq!(a.environment, b.environment);
        assert_eq!(production.name(), "production");
    }
}

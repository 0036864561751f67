//! Events that start a workflow, emitted under `on`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::InputValue;

/// The set of events a workflow reacts to.
///
/// Only present variants are emitted. A workflow needs at least one.
///
/// # Examples
///
/// ```
/// use ghflow_model::{PushTrigger, Triggers};
///
/// let triggers = Triggers::default()
///     .push(PushTrigger::new().branch("main"))
///     .schedule("0 3 * * 1");
///
/// assert!(!triggers.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Triggers {
    /// Pushes to branches or tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<PushTrigger>,

    /// Pull request activity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestTrigger>,

    /// Pull request activity, run in the context of the base branch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request_target: Option<PullRequestTrigger>,

    /// Cron schedules
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<Schedule>,

    /// Release activity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<ReleaseTrigger>,

    /// Invocation from another workflow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_call: Option<WorkflowCall>,

    /// Manual invocation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_dispatch: Option<WorkflowDispatch>,
}

impl Triggers {
    /// Whether no event is configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.push.is_none()
            && self.pull_request.is_none()
            && self.pull_request_target.is_none()
            && self.schedule.is_empty()
            && self.release.is_none()
            && self.workflow_call.is_none()
            && self.workflow_dispatch.is_none()
    }

    /// Sets the push trigger
    #[must_use]
    pub fn push(mut self, push: PushTrigger) -> Self {
        self.push = Some(push);
        self
    }

    /// Sets the pull request trigger
    #[must_use]
    pub fn pull_request(mut self, pull_request: PullRequestTrigger) -> Self {
        self.pull_request = Some(pull_request);
        self
    }

    /// Sets the pull request target trigger
    #[must_use]
    pub fn pull_request_target(mut self, pull_request: PullRequestTrigger) -> Self {
        self.pull_request_target = Some(pull_request);
        self
    }

    /// Adds a cron schedule
    #[must_use]
    pub fn schedule(mut self, cron: impl Into<String>) -> Self {
        self.schedule.push(Schedule::new(cron));
        self
    }

    /// Sets the release trigger
    #[must_use]
    pub fn release(mut self, release: ReleaseTrigger) -> Self {
        self.release = Some(release);
        self
    }

    /// Sets the reusable workflow trigger
    #[must_use]
    pub fn workflow_call(mut self, call: WorkflowCall) -> Self {
        self.workflow_call = Some(call);
        self
    }

    /// Sets the manual trigger
    #[must_use]
    pub fn workflow_dispatch(mut self, dispatch: WorkflowDispatch) -> Self {
        self.workflow_dispatch = Some(dispatch);
        self
    }
}

/// Push event filters. Empty lists are omitted; an empty trigger matches
/// every push.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PushTrigger {
    /// Branch patterns to include
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,

    /// Branch patterns to exclude
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches_ignore: Vec<String>,

    /// Tag patterns to include
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Tag patterns to exclude
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags_ignore: Vec<String>,

    /// Path filters to include
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,

    /// Path filters to exclude
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub paths_ignore: Vec<String>,
}

impl PushTrigger {
    /// Creates a push trigger matching every push
    #[must_use]
    pub const fn new() -> Self {
        Self {
            branches: Vec::new(),
            branches_ignore: Vec::new(),
            tags: Vec::new(),
            tags_ignore: Vec::new(),
            paths: Vec::new(),
            paths_ignore: Vec::new(),
        }
    }

    /// Adds a branch pattern
    #[must_use]
    pub fn branch(mut self, pattern: impl Into<String>) -> Self {
        self.branches.push(pattern.into());
        self
    }

    /// Adds an excluded branch pattern
    #[must_use]
    pub fn branch_ignore(mut self, pattern: impl Into<String>) -> Self {
        self.branches_ignore.push(pattern.into());
        self
    }

    /// Adds a tag pattern
    #[must_use]
    pub fn tag(mut self, pattern: impl Into<String>) -> Self {
        self.tags.push(pattern.into());
        self
    }

    /// Adds an excluded tag pattern
    #[must_use]
    pub fn tag_ignore(mut self, pattern: impl Into<String>) -> Self {
        self.tags_ignore.push(pattern.into());
        self
    }

    /// Adds a path filter
    #[must_use]
    pub fn path(mut self, pattern: impl Into<String>) -> Self {
        self.paths.push(pattern.into());
        self
    }

    /// Adds an excluded path filter
    #[must_use]
    pub fn path_ignore(mut self, pattern: impl Into<String>) -> Self {
        self.paths_ignore.push(pattern.into());
        self
    }
}

/// Pull request event filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PullRequestTrigger {
    /// Base branch patterns to include
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,

    /// Base branch patterns to exclude
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches_ignore: Vec<String>,

    /// Activity types, e.g. `opened`, `synchronize`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,

    /// Path filters to include
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,

    /// Path filters to exclude
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub paths_ignore: Vec<String>,
}

impl PullRequestTrigger {
    /// Creates a trigger matching every pull request
    #[must_use]
    pub const fn new() -> Self {
        Self {
            branches: Vec::new(),
            branches_ignore: Vec::new(),
            types: Vec::new(),
            paths: Vec::new(),
            paths_ignore: Vec::new(),
        }
    }

    /// Adds a base branch pattern
    #[must_use]
    pub fn branch(mut self, pattern: impl Into<String>) -> Self {
        self.branches.push(pattern.into());
        self
    }

    /// Adds an excluded base branch pattern
    #[must_use]
    pub fn branch_ignore(mut self, pattern: impl Into<String>) -> Self {
        self.branches_ignore.push(pattern.into());
        self
    }

    /// Adds an activity type
    #[must_use]
    pub fn activity(mut self, activity: impl Into<String>) -> Self {
        self.types.push(activity.into());
        self
    }

    /// Adds a path filter
    #[must_use]
    pub fn path(mut self, pattern: impl Into<String>) -> Self {
        self.paths.push(pattern.into());
        self
    }

    /// Adds an excluded path filter
    #[must_use]
    pub fn path_ignore(mut self, pattern: impl Into<String>) -> Self {
        self.paths_ignore.push(pattern.into());
        self
    }
}

/// A cron schedule entry, emitted as `{cron: ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    /// POSIX cron expression, evaluated in UTC
    pub cron: String,
}

impl Schedule {
    /// Creates a schedule entry
    #[must_use]
    pub fn new(cron: impl Into<String>) -> Self {
        Self { cron: cron.into() }
    }
}

/// Release event filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseTrigger {
    /// Activity types, e.g. `published`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
}

impl ReleaseTrigger {
    /// Creates a trigger on the given activity types
    #[must_use]
    pub fn types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
        }
    }
}

/// Manual invocation, with optional input descriptors
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkflowDispatch {
    /// Inputs shown in the run dialog
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, InputDescriptor>,
}

impl WorkflowDispatch {
    /// Creates a dispatch trigger without inputs
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inputs: BTreeMap::new(),
        }
    }

    /// Adds an input descriptor
    #[must_use]
    pub fn input(mut self, name: impl Into<String>, input: InputDescriptor) -> Self {
        self.inputs.insert(name.into(), input);
        self
    }
}

/// Invocation from another workflow, with optional input descriptors
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkflowCall {
    /// Inputs the caller passes
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, InputDescriptor>,
}

impl WorkflowCall {
    /// Creates a call trigger without inputs
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inputs: BTreeMap::new(),
        }
    }

    /// Adds an input descriptor
    #[must_use]
    pub fn input(mut self, name: impl Into<String>, input: InputDescriptor) -> Self {
        self.inputs.insert(name.into(), input);
        self
    }
}

/// Describes one input of a manual or reusable workflow
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputDescriptor {
    /// Help text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the input must be provided
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    /// Value used when the input is not provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<InputValue>,

    /// Input kind
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,

    /// Allowed values for [`InputType::Choice`]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl InputDescriptor {
    /// Creates a descriptor of the given kind
    #[must_use]
    pub fn new(input_type: InputType) -> Self {
        Self {
            input_type: Some(input_type),
            ..Self::default()
        }
    }

    /// Sets the help text
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the input as required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the default value
    #[must_use]
    pub fn default_value(mut self, value: impl Into<InputValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Adds an allowed value
    #[must_use]
    pub fn option(mut self, value: impl Into<String>) -> Self {
        self.options.push(value.into());
        self
    }
}

/// Kinds of workflow input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    /// Free text
    String,
    /// Checkbox
    Boolean,
    /// One of [`InputDescriptor::options`]
    Choice,
    /// Number
    Number,
    /// A deployment environment of the repository
    Environment,
}

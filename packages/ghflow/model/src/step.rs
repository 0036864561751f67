//! Step definition types for workflow jobs.
//!
//! A job's step list is heterogeneous: each element is either a raw [`Step`]
//! record (an action reference or a shell command) or any value implementing
//! [`StepAction`]. Both are held by [`StepItem`] and normalized to the same
//! emitted shape by the renderer.

use std::{collections::BTreeMap, sync::Arc};

use serde::{Serialize, Serializer};

use crate::{InputValue, StepAction};

/// A single raw step in a workflow job.
///
/// A well-formed step carries exactly one of `uses` or `run`. The constructors
/// [`Step::uses`] and [`Step::run`] always produce a well-formed step; the
/// fields stay public so malformed records can still be built and are then
/// rejected when the workflow is rendered.
///
/// # Examples
///
/// ```
/// use ghflow_model::{Shell, Step};
///
/// let checkout = Step::uses("actions/checkout@v4").with("fetch-depth", 0);
///
/// let test = Step::run("cargo test --all-features")
///     .name("Test")
///     .shell(Shell::Bash)
///     .env("RUST_BACKTRACE", 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    /// Identifier for referencing the step's outputs
    pub id: Option<String>,

    /// Display name
    pub name: Option<String>,

    /// Condition for running this step (opaque expression)
    pub if_condition: Option<String>,

    /// Action reference, `owner/repo@ref` or `owner/repo/path@ref`
    pub uses: Option<String>,

    /// Inputs passed to the action named by `uses`
    pub with: BTreeMap<String, InputValue>,

    /// Shell command or script to run
    pub run: Option<String>,

    /// Environment variables for this step
    pub env: BTreeMap<String, InputValue>,

    /// Working directory for `run`
    pub working_directory: Option<String>,

    /// Shell used for `run`
    pub shell: Option<Shell>,

    /// Keep the job going if this step fails
    pub continue_on_error: Option<bool>,

    /// Maximum minutes the step may run
    pub timeout_minutes: Option<u32>,
}

impl Step {
    /// Creates a step invoking the action at `reference`
    #[must_use]
    pub fn uses(reference: impl Into<String>) -> Self {
        Self {
            uses: Some(reference.into()),
            ..Self::default()
        }
    }

    /// Creates a step running the shell `script`
    #[must_use]
    pub fn run(script: impl Into<String>) -> Self {
        Self {
            run: Some(script.into()),
            ..Self::default()
        }
    }

    /// Snapshots an action wrapper into a raw step so that step-level
    /// attributes (`id`, `name`, `if`, ...) can be attached to it.
    #[must_use]
    pub fn from_action(action: &dyn StepAction) -> Self {
        Self {
            uses: Some(action.reference().to_string()),
            with: action.inputs().into_inner(),
            ..Self::default()
        }
    }

    /// Sets the step identifier
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the display name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the `if` condition
    #[must_use]
    pub fn if_condition(mut self, condition: impl Into<String>) -> Self {
        self.if_condition = Some(condition.into());
        self
    }

    /// Adds an input for the action
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.with.insert(key.into(), value.into());
        self
    }

    /// Adds an environment variable
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Sets the working directory
    #[must_use]
    pub fn working_directory(mut self, directory: impl Into<String>) -> Self {
        self.working_directory = Some(directory.into());
        self
    }

    /// Sets the shell
    #[must_use]
    pub fn shell(mut self, shell: impl Into<Shell>) -> Self {
        self.shell = Some(shell.into());
        self
    }

    /// Sets `continue-on-error`
    #[must_use]
    pub const fn continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = Some(continue_on_error);
        self
    }

    /// Sets `timeout-minutes`
    #[must_use]
    pub const fn timeout_minutes(mut self, minutes: u32) -> Self {
        self.timeout_minutes = Some(minutes);
        self
    }

    /// The action reference, ignoring an empty string
    #[must_use]
    pub fn action_reference(&self) -> Option<&str> {
        self.uses.as_deref().filter(|uses| !uses.is_empty())
    }

    /// The shell script, ignoring an empty string
    #[must_use]
    pub fn script(&self) -> Option<&str> {
        self.run.as_deref().filter(|run| !run.is_empty())
    }

    /// Checks that the step carries exactly one of `uses` and `run`, and that
    /// only `uses` steps carry `with` inputs.
    ///
    /// # Errors
    ///
    /// * [`StepDefect::BothUsesAndRun`] if both are set
    /// * [`StepDefect::NeitherUsesNorRun`] if neither is set
    /// * [`StepDefect::InputsWithoutUses`] if a `run` step sets `with`
    pub fn check(&self) -> Result<(), StepDefect> {
        match (self.action_reference(), self.script()) {
            (Some(_), Some(_)) => Err(StepDefect::BothUsesAndRun),
            (None, None) => Err(StepDefect::NeitherUsesNorRun),
            (None, Some(_)) if !self.with.is_empty() => Err(StepDefect::InputsWithoutUses),
            (Some(_), None) | (None, Some(_)) => Ok(()),
        }
    }
}

/// Why a raw [`Step`] is malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDefect {
    /// The step sets both `uses` and `run`
    BothUsesAndRun,
    /// The step sets neither `uses` nor `run`
    NeitherUsesNorRun,
    /// A `run` step carries `with` inputs, which only actions accept
    InputsWithoutUses,
}

impl std::fmt::Display for StepDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::BothUsesAndRun => "step sets both `uses` and `run`",
            Self::NeitherUsesNorRun => "step sets neither `uses` nor `run`",
            Self::InputsWithoutUses => "`run` step sets `with` inputs",
        })
    }
}

/// Shell used to execute a `run` step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shell {
    /// `bash`
    Bash,
    /// `pwsh`
    Pwsh,
    /// `python`
    Python,
    /// `sh`
    Sh,
    /// `cmd`
    Cmd,
    /// `powershell`
    Powershell,
    /// A custom command template, e.g. `perl {0}`
    Custom(String),
}

impl Shell {
    /// The value emitted for `shell`
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bash => "bash",
            Self::Pwsh => "pwsh",
            Self::Python => "python",
            Self::Sh => "sh",
            Self::Cmd => "cmd",
            Self::Powershell => "powershell",
            Self::Custom(template) => template,
        }
    }
}

impl From<&str> for Shell {
    fn from(value: &str) -> Self {
        match value {
            "bash" => Self::Bash,
            "pwsh" => Self::Pwsh,
            "python" => Self::Python,
            "sh" => Self::Sh,
            "cmd" => Self::Cmd,
            "powershell" => Self::Powershell,
            custom => Self::Custom(custom.to_string()),
        }
    }
}

impl Serialize for Shell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One element of a job's step list
#[derive(Debug, Clone)]
pub enum StepItem {
    /// A raw step record
    Step(Step),
    /// An action wrapper
    Action(Arc<dyn StepAction>),
}

impl StepItem {
    /// Wraps an action wrapper value
    #[must_use]
    pub fn action<A: StepAction + 'static>(action: A) -> Self {
        Self::Action(Arc::new(action))
    }
}

impl From<Step> for StepItem {
    fn from(value: Step) -> Self {
        Self::Step(value)
    }
}

impl From<Arc<dyn StepAction>> for StepItem {
    fn from(value: Arc<dyn StepAction>) -> Self {
        Self::Action(value)
    }
}

/// Action wrappers are values without identity: two elements are equal when
/// they emit the same reference and inputs.
impl PartialEq for StepItem {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Step(a), Self::Step(b)) => a == b,
            (Self::Action(a), Self::Action(b)) => {
                a.reference() == b.reference() && a.inputs() == b.inputs()
            }
            (Self::Step(_), Self::Action(_)) | (Self::Action(_), Self::Step(_)) => false,
        }
    }
}

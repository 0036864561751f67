//! Errors raised while validating or rendering a workflow.

use thiserror::Error;

use crate::StepDefect;

/// Where in a workflow a defect was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Display name of the workflow, if it has one
    pub workflow: Option<String>,
    /// Key of the offending job
    pub job: Option<String>,
    /// Zero-based index of the offending step within the job
    pub step: Option<usize>,
}

impl Location {
    pub(crate) fn workflow(workflow: Option<&str>) -> Self {
        Self {
            workflow: workflow.map(ToString::to_string),
            job: None,
            step: None,
        }
    }

    pub(crate) fn job(workflow: Option<&str>, job: &str) -> Self {
        Self {
            job: Some(job.to_string()),
            ..Self::workflow(workflow)
        }
    }

    pub(crate) fn step(workflow: Option<&str>, job: &str, step: usize) -> Self {
        Self {
            step: Some(step),
            ..Self::job(workflow, job)
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.workflow.as_deref() {
            Some(workflow) => write!(f, "workflow '{workflow}'")?,
            None => f.write_str("unnamed workflow")?,
        }
        if let Some(job) = &self.job {
            write!(f, ", job '{job}'")?;
        }
        if let Some(step) = self.step {
            write!(f, ", step {step}")?;
        }
        Ok(())
    }
}

/// Error type for workflow validation and rendering
#[derive(Debug, Error)]
pub enum Error {
    /// The workflow declares no trigger
    #[error("{location}: no trigger configured under `on`")]
    MissingTrigger {
        /// Offending workflow
        location: Location,
    },

    /// A `needs` entry names a job that is not in the workflow
    #[error("{location}: needs {target}, which is not a job of this workflow")]
    DanglingReference {
        /// Job holding the dangling entry
        location: Location,
        /// The missing key, or a description of the missing job value
        target: String,
    },

    /// A `needs` entry matches a job registered under several keys
    #[error("{location}: needed job is registered under multiple keys ({})", .keys.join(", "))]
    AmbiguousReference {
        /// Job holding the ambiguous entry
        location: Location,
        /// Every key the job value is registered under
        keys: Vec<String>,
    },

    /// A job lists itself in `needs`
    #[error("{location}: job needs itself")]
    SelfReference {
        /// The self-referencing job
        location: Location,
    },

    /// A matrix axis is named like one of the `include`/`exclude` overlays
    #[error("{location}: matrix axis `{axis}` collides with the `{axis}` overlay key")]
    MalformedMatrix {
        /// Job holding the matrix
        location: Location,
        /// The colliding axis name
        axis: String,
    },

    /// A raw step sets both or neither of `uses` and `run`, or a `run` step
    /// sets `with`
    #[error("{location}: {defect}")]
    MalformedStep {
        /// Offending step
        location: Location,
        /// What is wrong with it
        defect: StepDefect,
    },

    /// An action wrapper returned an empty reference
    #[error("{location}: action {action} has an empty `uses` reference")]
    MalformedAdapter {
        /// Offending step
        location: Location,
        /// Debug rendering of the wrapper value
        action: String,
    },

    /// The YAML encoder failed
    #[error("failed to encode workflow: {0}")]
    Encoding(#[from] serde_yaml::Error),

    /// Writing the rendered document failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The location of a model defect, `None` for encoding and I/O failures
    #[must_use]
    pub const fn location(&self) -> Option<&Location> {
        match self {
            Self::MissingTrigger { location }
            | Self::DanglingReference { location, .. }
            | Self::AmbiguousReference { location, .. }
            | Self::SelfReference { location }
            | Self::MalformedMatrix { location, .. }
            | Self::MalformedStep { location, .. }
            | Self::MalformedAdapter { location, .. } => Some(location),
            Self::Encoding(_) | Self::Io(_) => None,
        }
    }
}

//! Settings shared by workflows and jobs: token permissions, concurrency
//! groups and `run` defaults.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::Shell;

/// Permissions granted to the `GITHUB_TOKEN`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permissions {
    /// `read-all`
    ReadAll,
    /// `write-all`
    WriteAll,
    /// Per-scope levels, e.g. `contents: read`
    Scoped(BTreeMap<String, PermissionLevel>),
}

impl Permissions {
    /// Creates an empty scoped permission set (every scope `none`)
    #[must_use]
    pub const fn scoped() -> Self {
        Self::Scoped(BTreeMap::new())
    }

    /// Grants `level` on `scope`. Turns `read-all`/`write-all` into a scoped
    /// set containing just this grant.
    #[must_use]
    pub fn grant(self, scope: impl Into<String>, level: PermissionLevel) -> Self {
        let mut scopes = match self {
            Self::Scoped(scopes) => scopes,
            Self::ReadAll | Self::WriteAll => BTreeMap::new(),
        };
        scopes.insert(scope.into(), level);
        Self::Scoped(scopes)
    }
}

impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::ReadAll => serializer.serialize_str("read-all"),
            Self::WriteAll => serializer.serialize_str("write-all"),
            Self::Scoped(scopes) => scopes.serialize(serializer),
        }
    }
}

/// Access level for one permission scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PermissionLevel {
    /// `read`
    #[serde(rename = "read")]
    Read,
    /// `write`
    #[serde(rename = "write")]
    Write,
    /// `none`
    #[serde(rename = "none")]
    NoAccess,
}

/// A concurrency group; runs in the same group are serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Concurrency {
    /// Group name, usually an expression
    pub group: String,

    /// Cancel the in-flight run when a new one is queued
    #[serde(rename = "cancel-in-progress", skip_serializing_if = "Option::is_none")]
    pub cancel_in_progress: Option<bool>,
}

impl Concurrency {
    /// Whether the group name is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.group.is_empty()
    }

    /// Creates a concurrency group
    #[must_use]
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            cancel_in_progress: None,
        }
    }

    /// Sets `cancel-in-progress`
    #[must_use]
    pub const fn cancel_in_progress(mut self, cancel: bool) -> Self {
        self.cancel_in_progress = Some(cancel);
        self
    }
}

impl From<&str> for Concurrency {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// `defaults` block; only `run` defaults exist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Defaults {
    /// Defaults applied to every `run` step
    pub run: RunDefaults,
}

impl Defaults {
    /// Whether no `run` default is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.run.shell.is_none() && is_blank(&self.run.working_directory)
    }

    /// Sets the default shell
    #[must_use]
    pub fn shell(mut self, shell: impl Into<Shell>) -> Self {
        self.run.shell = Some(shell.into());
        self
    }

    /// Sets the default working directory
    #[must_use]
    pub fn working_directory(mut self, directory: impl Into<String>) -> Self {
        self.run.working_directory = Some(directory.into());
        self
    }
}

/// Defaults for `run` steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunDefaults {
    /// Shell for every `run` step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<Shell>,

    /// Working directory for every `run` step
    #[serde(rename = "working-directory", skip_serializing_if = "is_blank")]
    pub working_directory: Option<String>,
}

#[allow(clippy::ref_option)]
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_blanket_permissions_serialize_as_strings() {
        assert_eq!(
            serde_yaml::to_string(&Permissions::ReadAll).unwrap(),
            "read-all\n"
        );
    }

    #[test_log::test]
    fn test_scoped_permissions_serialize_sorted() {
        let permissions = Permissions::scoped()
            .grant("pages", PermissionLevel::Write)
            .grant("contents", PermissionLevel::Read)
            .grant("id-token", PermissionLevel::NoAccess);

        assert_eq!(
            serde_yaml::to_string(&permissions).unwrap(),
            "contents: read\nid-token: none\npages: write\n"
        );
    }

    #[test_log::test]
    fn test_concurrency_omits_unset_cancel() {
        assert_eq!(
            serde_yaml::to_string(&Concurrency::new("ci-${{ github.ref }}")).unwrap(),
            "group: ci-${{ github.ref }}\n"
        );
        assert_eq!(
            serde_yaml::to_string(&Concurrency::new("deploy").cancel_in_progress(false)).unwrap(),
            "group: deploy\ncancel-in-progress: false\n"
        );
    }

    #[test_log::test]
    fn test_defaults_nest_under_run() {
        let defaults = Defaults::default().shell(Shell::Bash).working_directory("app");

        assert_eq!(
            serde_yaml::to_string(&defaults).unwrap(),
            "run:\n  shell: bash\n  working-directory: app\n"
        );
    }

    #[test_log::test]
    fn test_blank_defaults_and_concurrency_are_empty() {
        assert!(Defaults::default().is_empty());
        assert!(Defaults::default().working_directory("").is_empty());
        assert!(!Defaults::default().shell(Shell::Bash).is_empty());
        assert!(Concurrency::new("").is_empty());
        assert!(!Concurrency::new("deploy").is_empty());
    }
}

//! Matrix strategies for fanning a job out over parallel instances.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::InputValue;

/// Execution strategy of a job.
///
/// `fail-fast` is a tri-state: it is only emitted when explicitly set, so
/// `Some(false)` is rendered literally while `None` defers to the runner.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Strategy {
    /// Matrix the job is expanded over
    #[serde(skip_serializing_if = "no_matrix")]
    pub matrix: Option<Matrix>,

    /// Cancel sibling instances when one fails
    #[serde(rename = "fail-fast", skip_serializing_if = "Option::is_none")]
    pub fail_fast: Option<bool>,

    /// Upper bound on concurrently running instances (zero means unset)
    #[serde(rename = "max-parallel", skip_serializing_if = "is_unset")]
    pub max_parallel: Option<u32>,
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
fn is_unset(value: &Option<u32>) -> bool {
    value.is_none_or(|value| value == 0)
}

#[allow(clippy::ref_option)]
fn no_matrix(matrix: &Option<Matrix>) -> bool {
    matrix.as_ref().is_none_or(Matrix::is_empty)
}

impl Strategy {
    /// Whether the strategy would render as an empty mapping
    #[must_use]
    pub fn is_empty(&self) -> bool {
        no_matrix(&self.matrix) && self.fail_fast.is_none() && is_unset(&self.max_parallel)
    }

    /// Creates a strategy running `matrix`
    #[must_use]
    pub fn matrix(matrix: Matrix) -> Self {
        Self {
            matrix: Some(matrix),
            ..Self::default()
        }
    }

    /// Sets `fail-fast`
    #[must_use]
    pub const fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = Some(fail_fast);
        self
    }

    /// Sets `max-parallel`
    #[must_use]
    pub const fn max_parallel(mut self, max_parallel: u32) -> Self {
        self.max_parallel = Some(max_parallel);
        self
    }
}

/// Matrix axes plus optional `include`/`exclude` overlays.
///
/// Axes are emitted in lexicographic order, values in declaration order.
/// Axes share the mapping with the overlays, so an axis may not be named
/// `include` or `exclude` (see [`Matrix::overlay_axis`]).
///
/// # Examples
///
/// ```
/// use ghflow_model::Matrix;
///
/// let matrix = Matrix::new()
///     .axis("os", ["ubuntu-latest", "macos-latest"])
///     .axis("rust", ["stable", "nightly"])
///     .exclude([("os", "macos-latest"), ("rust", "nightly")]);
///
/// assert_eq!(matrix.combinations(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Matrix {
    /// Axis name to its values
    #[serde(flatten)]
    pub axes: BTreeMap<String, Vec<InputValue>>,

    /// Extra combinations, or extra keys merged into matching combinations
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<BTreeMap<String, InputValue>>,

    /// Combinations removed from the cross product
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<BTreeMap<String, InputValue>>,
}

impl Matrix {
    /// Keys reserved for the overlays
    pub const OVERLAY_KEYS: [&'static str; 2] = ["include", "exclude"];

    /// Creates an empty matrix
    #[must_use]
    pub const fn new() -> Self {
        Self {
            axes: BTreeMap::new(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// Whether the matrix has no axes and no overlays
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty() && self.include.is_empty() && self.exclude.is_empty()
    }

    /// The first axis whose name collides with an overlay key, if any
    #[must_use]
    pub fn overlay_axis(&self) -> Option<&str> {
        self.axes
            .keys()
            .map(String::as_str)
            .find(|axis| Self::OVERLAY_KEYS.contains(axis))
    }

    /// Adds (or replaces) the axis `name`
    #[must_use]
    pub fn axis<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<InputValue>,
    {
        self.axes
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Adds an `include` overlay
    #[must_use]
    pub fn include<I, K, V>(mut self, overlay: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<InputValue>,
    {
        self.include.push(collect_overlay(overlay));
        self
    }

    /// Adds an `exclude` overlay
    #[must_use]
    pub fn exclude<I, K, V>(mut self, overlay: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<InputValue>,
    {
        self.exclude.push(collect_overlay(overlay));
        self
    }

    /// Number of job instances the matrix expands to.
    ///
    /// Counts the cross product minus excluded combinations, plus `include`
    /// overlays that do not merge into an existing combination.
    #[must_use]
    pub fn combinations(&self) -> usize {
        let mut combinations: Vec<BTreeMap<&str, &InputValue>> = vec![BTreeMap::new()];

        for (axis, values) in &self.axes {
            combinations = combinations
                .into_iter()
                .flat_map(|combination| {
                    values.iter().map(move |value| {
                        let mut next = combination.clone();
                        next.insert(axis.as_str(), value);
                        next
                    })
                })
                .collect();
        }

        if self.axes.is_empty() {
            combinations.clear();
        }

        combinations.retain(|combination| {
            !self
                .exclude
                .iter()
                .any(|overlay| overlay_matches(overlay, combination))
        });

        let standalone = self
            .include
            .iter()
            .filter(|overlay| {
                !combinations.iter().any(|combination| {
                    overlay
                        .iter()
                        .filter(|(key, _)| self.axes.contains_key(*key))
                        .all(|(key, value)| combination.get(key.as_str()) == Some(&value))
                })
            })
            .count();

        combinations.len() + standalone
    }
}

fn collect_overlay<I, K, V>(overlay: I) -> BTreeMap<String, InputValue>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<InputValue>,
{
    overlay
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

fn overlay_matches(
    overlay: &BTreeMap<String, InputValue>,
    combination: &BTreeMap<&str, &InputValue>,
) -> bool {
    overlay
        .iter()
        .all(|(key, value)| combination.get(key.as_str()) == Some(&value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test_log::test]
    fn test_matrix_emits_sorted_axes_then_overlays() {
        let matrix = Matrix::new()
            .axis("rust", ["stable", "nightly"])
            .axis("os", ["ubuntu-latest"])
            .include([("os", "windows-latest"), ("rust", "stable")]);

        let yaml = serde_yaml::to_string(&matrix).unwrap();

        assert_eq!(
            yaml,
            "os:\n- ubuntu-latest\nrust:\n- stable\n- nightly\ninclude:\n- os: windows-latest\n  rust: stable\n"
        );
    }

    #[test_log::test]
    fn test_matrix_emits_exclude_overlays_as_mappings() {
        let matrix = Matrix::new()
            .axis("os", ["ubuntu-latest", "windows-latest"])
            .axis("rust", ["stable", "nightly"])
            .exclude([("os", "windows-latest"), ("rust", "nightly")]);

        let yaml = serde_yaml::to_string(&matrix).unwrap();

        assert_eq!(
            yaml,
            "os:\n- ubuntu-latest\n- windows-latest\nrust:\n- stable\n- nightly\nexclude:\n- os: windows-latest\n  rust: nightly\n"
        );
    }

    #[test_log::test]
    fn test_version_axis_as_strings_keeps_trailing_zero() {
        let matrix = Matrix::new().axis("python", ["3.10", "3.12"]);

        let yaml = serde_yaml::to_string(&matrix).unwrap();
        let reparsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(reparsed["python"][0].as_str(), Some("3.10"));
        assert_eq!(reparsed["python"][1].as_str(), Some("3.12"));
    }

    #[test_log::test]
    fn test_overlay_axis_detects_reserved_names() {
        assert_eq!(Matrix::new().axis("os", ["a"]).overlay_axis(), None);
        assert_eq!(
            Matrix::new()
                .axis("os", ["a"])
                .axis("include", ["b"])
                .overlay_axis(),
            Some("include")
        );
        assert_eq!(
            Matrix::new().axis("exclude", ["c"]).overlay_axis(),
            Some("exclude")
        );
    }

    #[test_log::test]
    fn test_empty_matrix_and_strategy_are_empty() {
        assert!(Matrix::new().is_empty());
        assert!(Strategy::default().is_empty());
        assert!(Strategy::matrix(Matrix::new()).max_parallel(0).is_empty());
        assert!(!Strategy::default().fail_fast(true).is_empty());
        assert!(!Strategy::matrix(Matrix::new().include([("os", "a")])).is_empty());
        assert_eq!(
            serde_yaml::to_string(&Strategy::matrix(Matrix::new()).fail_fast(false)).unwrap(),
            "fail-fast: false\n"
        );
    }

    #[test_log::test]
    fn test_fail_fast_false_is_emitted_literally() {
        let strategy = Strategy::default().fail_fast(false);

        assert_eq!(serde_yaml::to_string(&strategy).unwrap(), "fail-fast: false\n");
    }

    #[test_log::test]
    fn test_unset_strategy_fields_are_omitted() {
        let strategy = Strategy::default().max_parallel(0);

        assert_eq!(serde_yaml::to_string(&strategy).unwrap(), "{}\n");
    }

    #[test_log::test]
    fn test_max_parallel_is_emitted_when_positive() {
        let strategy = Strategy::default().max_parallel(2);

        assert_eq!(serde_yaml::to_string(&strategy).unwrap(), "max-parallel: 2\n");
    }

    #[test_log::test]
    fn test_combinations_apply_exclude_and_include() {
        let matrix = Matrix::new()
            .axis("os", ["ubuntu-latest", "windows-latest", "macos-latest"])
            .axis("rust", ["stable", "nightly"])
            .exclude([("os", "windows-latest"), ("rust", "nightly")])
            .include([("os", "ubuntu-latest"), ("rust", "stable")])
            .include([("os", "ubuntu-latest"), ("rust", "1.70")]);

        assert_eq!(matrix.combinations(), 6);
    }

    #[test_log::test]
    fn test_integer_axis_values_stay_integers() {
        let matrix = Matrix::new().axis("node", [18, 20]);

        assert_eq!(serde_yaml::to_string(&matrix).unwrap(), "node:\n- 18\n- 20\n");
    }
}

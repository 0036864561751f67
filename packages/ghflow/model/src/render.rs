//! Rendering of a [`Workflow`] to the runner's YAML format.
//!
//! The model is first normalized into borrowed document types whose field
//! order is the emitted key order, then handed to `serde_yaml`. Unset fields
//! are skipped, user-keyed maps are `BTreeMap`s and so emit sorted, and the
//! whole document is built before any byte is produced.

use std::{borrow::Cow, collections::BTreeMap, io::Write};

use serde::Serialize;

use crate::{
    Concurrency, Defaults, Environment, Error, InputValue, Job, Location, Matrix, Permissions,
    Shell, Step, StepAction, StepItem, Strategy, Triggers, Workflow, resolve::Resolver,
};

#[derive(Debug, Serialize)]
struct WorkflowDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,

    #[serde(rename = "run-name", skip_serializing_if = "Option::is_none")]
    run_name: Option<&'a str>,

    on: &'a Triggers,

    #[serde(skip_serializing_if = "Option::is_none")]
    permissions: Option<&'a Permissions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    env: Option<&'a BTreeMap<String, InputValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    concurrency: Option<&'a Concurrency>,

    #[serde(skip_serializing_if = "Option::is_none")]
    defaults: Option<&'a Defaults>,

    jobs: BTreeMap<&'a str, JobDocument<'a>>,
}

#[derive(Debug, Serialize)]
struct JobDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,

    #[serde(rename = "runs-on", skip_serializing_if = "str::is_empty")]
    runs_on: &'a str,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    needs: Vec<&'a str>,

    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    if_condition: Option<&'a str>,

    #[serde(rename = "timeout-minutes", skip_serializing_if = "Option::is_none")]
    timeout_minutes: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    strategy: Option<&'a Strategy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<&'a Environment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    outputs: Option<&'a BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    env: Option<&'a BTreeMap<String, InputValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    defaults: Option<&'a Defaults>,

    #[serde(skip_serializing_if = "Option::is_none")]
    concurrency: Option<&'a Concurrency>,

    #[serde(skip_serializing_if = "Option::is_none")]
    permissions: Option<&'a Permissions>,

    #[serde(rename = "continue-on-error", skip_serializing_if = "Option::is_none")]
    continue_on_error: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    container: Option<&'a str>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    steps: Vec<StepDocument<'a>>,
}

#[derive(Debug, Default, Serialize)]
struct StepDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,

    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    if_condition: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    uses: Option<&'a str>,

    #[serde(skip_serializing_if = "is_empty_map")]
    with: Cow<'a, BTreeMap<String, InputValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    run: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    env: Option<&'a BTreeMap<String, InputValue>>,

    #[serde(rename = "working-directory", skip_serializing_if = "Option::is_none")]
    working_directory: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    shell: Option<&'a Shell>,

    #[serde(rename = "continue-on-error", skip_serializing_if = "Option::is_none")]
    continue_on_error: Option<bool>,

    #[serde(rename = "timeout-minutes", skip_serializing_if = "Option::is_none")]
    timeout_minutes: Option<u32>,
}

fn is_empty_map(map: &Cow<'_, BTreeMap<String, InputValue>>) -> bool {
    map.is_empty()
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|value| !value.is_empty())
}

fn positive(value: Option<u32>) -> Option<u32> {
    value.filter(|value| *value > 0)
}

fn populated<K, V>(map: &BTreeMap<K, V>) -> Option<&BTreeMap<K, V>> {
    Some(map).filter(|map| !map.is_empty())
}

impl<'a> StepDocument<'a> {
    fn from_step(step: &'a Step) -> Self {
        Self {
            id: non_empty(step.id.as_ref()),
            name: non_empty(step.name.as_ref()),
            if_condition: non_empty(step.if_condition.as_ref()),
            uses: step.action_reference(),
            with: Cow::Borrowed(&step.with),
            run: step.script(),
            env: populated(&step.env),
            working_directory: non_empty(step.working_directory.as_ref()),
            shell: step.shell.as_ref(),
            continue_on_error: step.continue_on_error,
            timeout_minutes: positive(step.timeout_minutes),
        }
    }

    fn from_action(action: &'a dyn StepAction) -> Self {
        Self {
            uses: Some(action.reference()),
            with: Cow::Owned(action.inputs().into_inner()),
            ..Self::default()
        }
    }
}

/// Checks one step element, returning its emitted form.
fn step_document<'a>(
    workflow: &Workflow,
    key: &str,
    index: usize,
    item: &'a StepItem,
) -> Result<StepDocument<'a>, Error> {
    match item {
        StepItem::Step(step) => {
            step.check().map_err(|defect| Error::MalformedStep {
                location: Location::step(workflow.name.as_deref(), key, index),
                defect,
            })?;
            Ok(StepDocument::from_step(step))
        }
        StepItem::Action(action) => {
            if action.reference().is_empty() {
                return Err(Error::MalformedAdapter {
                    location: Location::step(workflow.name.as_deref(), key, index),
                    action: format!("{action:?}"),
                });
            }
            Ok(StepDocument::from_action(action.as_ref()))
        }
    }
}

fn check_matrix(workflow: &Workflow, key: &str, job: &Job) -> Result<(), Error> {
    let axis = job
        .strategy
        .as_ref()
        .and_then(|strategy| strategy.matrix.as_ref())
        .and_then(Matrix::overlay_axis);

    match axis {
        Some(axis) => Err(Error::MalformedMatrix {
            location: Location::job(workflow.name.as_deref(), key),
            axis: axis.to_string(),
        }),
        None => Ok(()),
    }
}

fn job_document<'a>(
    workflow: &'a Workflow,
    resolver: &Resolver<'a>,
    key: &str,
    job: &'a Job,
) -> Result<JobDocument<'a>, Error> {
    let needs = resolver.resolve_job(key, job)?;

    check_matrix(workflow, key, job)?;

    let steps = job
        .steps
        .iter()
        .enumerate()
        .map(|(index, item)| step_document(workflow, key, index, item))
        .collect::<Result<Vec<_>, _>>()?;

    log::trace!(
        "render: job '{key}' with {} need(s) and {} step(s)",
        needs.len(),
        steps.len()
    );

    Ok(JobDocument {
        name: non_empty(job.name.as_ref()),
        runs_on: &job.runs_on,
        needs,
        if_condition: non_empty(job.if_condition.as_ref()),
        timeout_minutes: positive(job.timeout_minutes),
        strategy: job.strategy.as_ref().filter(|strategy| !strategy.is_empty()),
        environment: job
            .environment
            .as_ref()
            .filter(|environment| !environment.name().is_empty()),
        outputs: populated(&job.outputs),
        env: populated(&job.env),
        defaults: job.defaults.as_ref().filter(|defaults| !defaults.is_empty()),
        concurrency: job
            .concurrency
            .as_ref()
            .filter(|concurrency| !concurrency.is_empty()),
        permissions: job.permissions.as_ref(),
        continue_on_error: job.continue_on_error,
        container: non_empty(job.container.as_ref()),
        steps,
    })
}

fn check_triggers(workflow: &Workflow) -> Result<(), Error> {
    if workflow.on.is_empty() {
        return Err(Error::MissingTrigger {
            location: Location::workflow(workflow.name.as_deref()),
        });
    }
    Ok(())
}

fn workflow_document(workflow: &Workflow) -> Result<WorkflowDocument<'_>, Error> {
    check_triggers(workflow)?;

    let resolver = Resolver::new(workflow);

    let jobs = workflow
        .jobs
        .iter()
        .map(|(key, job)| -> Result<_, Error> {
            Ok((key.as_str(), job_document(workflow, &resolver, key, job)?))
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    Ok(WorkflowDocument {
        name: non_empty(workflow.name.as_ref()),
        run_name: non_empty(workflow.run_name.as_ref()),
        on: &workflow.on,
        permissions: workflow.permissions.as_ref(),
        env: populated(&workflow.env),
        concurrency: workflow
            .concurrency
            .as_ref()
            .filter(|concurrency| !concurrency.is_empty()),
        defaults: workflow.defaults.as_ref().filter(|defaults| !defaults.is_empty()),
        jobs,
    })
}

/// Renders `workflow` to a YAML document.
///
/// Rendering is deterministic: the same workflow always produces the same
/// bytes. Nothing is produced if any defect is found.
///
/// Multi-line strings are emitted as literal blocks, except when a line ends
/// in a space or tab: the encoder cannot represent that in block style and
/// falls back to a double-quoted scalar with `\n` escapes. The value the
/// runner reads is the same either way.
///
/// # Errors
///
/// * [`Error::MissingTrigger`] if no trigger is configured
/// * [`Error::DanglingReference`], [`Error::AmbiguousReference`] or
///   [`Error::SelfReference`] if a `needs` entry cannot be resolved
/// * [`Error::MalformedMatrix`] if a matrix axis is named `include` or `exclude`
/// * [`Error::MalformedStep`] if a raw step sets both or neither of `uses`/`run`,
///   or a `run` step sets `with`
/// * [`Error::MalformedAdapter`] if an action wrapper has an empty reference
/// * [`Error::Encoding`] if the YAML encoder fails
pub fn render(workflow: &Workflow) -> Result<String, Error> {
    log::debug!(
        "render: workflow {:?} with {} job(s)",
        workflow.name,
        workflow.jobs.len()
    );

    let document = workflow_document(workflow)?;

    Ok(serde_yaml::to_string(&document)?)
}

/// Renders `workflow` and writes the document to `writer`.
///
/// The document is fully rendered before anything is written, so a malformed
/// workflow leaves `writer` untouched.
///
/// # Errors
///
/// * Any error of [`render`]
/// * [`Error::Io`] if writing fails
pub fn render_to_writer<W: Write>(workflow: &Workflow, mut writer: W) -> Result<(), Error> {
    let yaml = render(workflow)?;
    writer.write_all(yaml.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Runs every check [`render`] performs without producing output.
///
/// Returns all defects found: the missing-trigger check first, then `needs`
/// defects in job key order, then matrix defects in job key order, then step
/// defects in job key and step order.
/// An empty list means the workflow renders (barring encoder failures).
#[must_use]
pub fn validate(workflow: &Workflow) -> Vec<Error> {
    log::debug!(
        "validate: workflow {:?} with {} job(s)",
        workflow.name,
        workflow.jobs.len()
    );

    let mut errors = check_triggers(workflow).err().into_iter().collect::<Vec<_>>();

    errors.extend(Resolver::new(workflow).errors());

    errors.extend(
        workflow
            .jobs
            .iter()
            .filter_map(|(key, job)| check_matrix(workflow, key, job).err()),
    );

    errors.extend(workflow.jobs.iter().flat_map(|(key, job)| {
        job.steps
            .iter()
            .enumerate()
            .filter_map(move |(index, item)| step_document(workflow, key, index, item).err())
    }));

    errors
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Inputs, PushTrigger, StepDefect};

    #[derive(Debug)]
    struct Unpinned;

    impl StepAction for Unpinned {
        fn reference(&self) -> &str {
            ""
        }

        fn inputs(&self) -> Inputs {
            Inputs::new()
        }
    }

    fn ci() -> Workflow {
        Workflow::new("CI").push(PushTrigger::new().branch("main"))
    }

    #[test_log::test]
    fn test_render_minimal_workflow() {
        let workflow = ci().job(
            "build",
            Job::new("ubuntu-latest")
                .step(Step::uses("actions/checkout@v4"))
                .step(Step::run("cargo build")),
        );

        assert_eq!(
            render(&workflow).unwrap(),
            "\
name: CI
on:
  push:
    branches:
    - main
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
    - uses: actions/checkout@v4
    - run: cargo build
"
        );
    }

    #[test_log::test]
    fn test_step_keys_follow_fixed_order() {
        let step = Step::uses("actions/cache@v4")
            .shell(Shell::Bash)
            .working_directory("app")
            .env("A", 1)
            .with("path", "target")
            .if_condition("always()")
            .name("Cache")
            .id("cache");
        let workflow = ci().job("build", Job::new("ubuntu-latest").step(step));

        let yaml = render(&workflow).unwrap();

        assert!(yaml.contains(
            "\
    - id: cache
      name: Cache
      if: always()
      uses: actions/cache@v4
      with:
        path: target
      env:
        A: 1
      working-directory: app
      shell: bash
"
        ));
    }

    #[test_log::test]
    fn test_job_keys_follow_fixed_order() {
        let build = Job::new("ubuntu-latest").step(Step::run("make"));
        let deploy = Job::new("${{ matrix.os }}")
            .step(Step::run("make deploy"))
            .output("url", "${{ steps.deploy.outputs.url }}")
            .environment("production")
            .strategy(Strategy::matrix(Matrix::new().axis("os", ["ubuntu-latest"])))
            .timeout_minutes(30)
            .if_condition("github.ref == 'refs/heads/main'")
            .needs(&build)
            .name("Deploy");
        let workflow = ci().job("build", build).job("deploy", deploy);

        let yaml = render(&workflow).unwrap();

        assert!(yaml.contains(
            "\
  deploy:
    name: Deploy
    runs-on: ${{ matrix.os }}
    needs:
    - build
    if: github.ref == 'refs/heads/main'
    timeout-minutes: 30
    strategy:
      matrix:
        os:
        - ubuntu-latest
    environment: production
    outputs:
      url: ${{ steps.deploy.outputs.url }}
    steps:
    - run: make deploy
"
        ));
    }

    #[test_log::test]
    fn test_zero_and_empty_model_fields_are_omitted() {
        let job = Job {
            name: Some(String::new()),
            timeout_minutes: Some(0),
            ..Job::new("ubuntu-latest").step(Step::run("true").timeout_minutes(0).id(""))
        };
        let workflow = ci().job("build", job);

        let yaml = render(&workflow).unwrap();

        assert!(!yaml.contains("timeout-minutes"));
        assert!(!yaml.contains("name: ''"));
        assert!(!yaml.contains("id:"));
    }

    #[test_log::test]
    fn test_zero_valued_job_records_are_omitted() {
        let workflow = ci()
            .concurrency("")
            .defaults(Defaults::default())
            .job(
                "build",
                Job::new("ubuntu-latest")
                    .strategy(Strategy::default())
                    .environment("")
                    .defaults(Defaults::default().working_directory(""))
                    .concurrency(Concurrency::new(""))
                    .step(Step::run("make")),
            );

        assert_eq!(
            render(&workflow).unwrap(),
            "\
name: CI
on:
  push:
    branches:
    - main
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
    - run: make
"
        );
    }

    #[test_log::test]
    fn test_empty_matrix_is_dropped_but_fail_fast_kept() {
        let workflow = ci().job(
            "build",
            Job::new("ubuntu-latest")
                .strategy(Strategy::matrix(Matrix::new()).fail_fast(false))
                .step(Step::run("make")),
        );

        let yaml = render(&workflow).unwrap();

        assert!(yaml.contains("    strategy:\n      fail-fast: false\n    steps:\n"));
    }

    #[test_log::test]
    fn test_run_step_with_inputs_aborts_rendering() {
        let workflow = ci().job(
            "build",
            Job::new("ubuntu-latest").step(Step::run("make").with("path", "x")),
        );

        let error = render(&workflow).unwrap_err();

        assert!(matches!(
            &error,
            Error::MalformedStep { location, defect: StepDefect::InputsWithoutUses }
                if location.step == Some(0)
        ));
        assert_eq!(validate(&workflow).len(), 1);
    }

    #[test_log::test]
    fn test_matrix_axis_named_like_overlay_is_rejected() {
        let workflow = ci().job(
            "test",
            Job::new("ubuntu-latest")
                .strategy(Strategy::matrix(
                    Matrix::new()
                        .axis("include", ["a"])
                        .include([("os", "b")]),
                ))
                .step(Step::run("make")),
        );

        let error = render(&workflow).unwrap_err();

        assert_eq!(
            error.to_string(),
            "workflow 'CI', job 'test': matrix axis `include` collides with the `include` overlay key"
        );
        assert!(matches!(
            validate(&workflow).as_slice(),
            [Error::MalformedMatrix { axis, .. }] if axis == "include"
        ));
    }

    #[test_log::test]
    fn test_trailing_space_in_multi_line_run_keeps_its_value() {
        let script = "echo a \necho b\n";
        let workflow = ci().job("build", Job::new("ubuntu-latest").step(Step::run(script)));

        let yaml = render(&workflow).unwrap();
        let document: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(
            document["jobs"]["build"]["steps"][0]["run"].as_str(),
            Some(script)
        );
    }

    #[test_log::test]
    fn test_tri_state_continue_on_error_false_is_emitted() {
        let workflow = ci().job(
            "build",
            Job::new("ubuntu-latest")
                .continue_on_error(false)
                .step(Step::run("make").continue_on_error(true)),
        );

        let yaml = render(&workflow).unwrap();

        assert!(yaml.contains("    continue-on-error: false\n"));
        assert!(yaml.contains("      continue-on-error: true\n"));
    }

    #[test_log::test]
    fn test_step_with_both_uses_and_run_aborts_rendering() {
        let step = Step {
            run: Some("make".to_string()),
            ..Step::uses("actions/checkout@v4")
        };
        let workflow = ci().job(
            "build",
            Job::new("ubuntu-latest").step(Step::run("ok")).step(step),
        );

        let error = render(&workflow).unwrap_err();

        assert_eq!(
            error.to_string(),
            "workflow 'CI', job 'build', step 1: step sets both `uses` and `run`"
        );
    }

    #[test_log::test]
    fn test_empty_adapter_reference_aborts_rendering() {
        let workflow = ci().job("build", Job::new("ubuntu-latest").action(Unpinned));

        let error = render(&workflow).unwrap_err();

        assert!(matches!(
            &error,
            Error::MalformedAdapter { location, action }
                if location.step == Some(0) && action == "Unpinned"
        ));
    }

    #[test_log::test]
    fn test_workflow_without_trigger_is_rejected() {
        let workflow = Workflow::new("CI").job("build", Job::new("ubuntu-latest"));

        assert!(matches!(render(&workflow), Err(Error::MissingTrigger { .. })));
    }

    #[test_log::test]
    fn test_render_to_writer_writes_nothing_on_error() {
        let workflow = ci().job("build", Job::new("ubuntu-latest").needs("missing"));
        let mut buffer = Vec::new();

        let result = render_to_writer(&workflow, &mut buffer);

        assert!(result.is_err());
        assert!(buffer.is_empty());
    }

    #[test_log::test]
    fn test_render_to_writer_matches_render() {
        let workflow = ci().job("build", Job::new("ubuntu-latest").step(Step::run("make")));
        let mut buffer = Vec::new();

        render_to_writer(&workflow, &mut buffer).unwrap();

        assert_eq!(String::from_utf8(buffer).unwrap(), render(&workflow).unwrap());
    }

    #[test_log::test]
    fn test_validate_reports_every_defect() {
        let workflow = Workflow::new("Broken")
            .job(
                "build",
                Job::new("ubuntu-latest")
                    .needs("build")
                    .step(Step::default())
                    .action(Unpinned),
            )
            .job("deploy", Job::new("ubuntu-latest").needs("nowhere"));

        let errors = validate(&workflow);

        assert_eq!(
            errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![
                "workflow 'Broken': no trigger configured under `on`".to_string(),
                "workflow 'Broken', job 'build': job needs itself".to_string(),
                "workflow 'Broken', job 'deploy': needs 'nowhere', which is not a job of this workflow"
                    .to_string(),
                "workflow 'Broken', job 'build', step 0: step sets neither `uses` nor `run`"
                    .to_string(),
                "workflow 'Broken', job 'build', step 1: action Unpinned has an empty `uses` reference"
                    .to_string(),
            ]
        );
    }

    #[test_log::test]
    fn test_validate_accepts_well_formed_workflow() {
        let workflow = ci().job("build", Job::new("ubuntu-latest").step(Step::run("make")));

        assert!(validate(&workflow).is_empty());
    }
}

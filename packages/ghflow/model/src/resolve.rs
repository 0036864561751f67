//! Resolution of `needs` entries to job keys.
//!
//! Jobs declare dependencies with job values. Before rendering, every value
//! is looked up in the workflow's job map (by value equality) and replaced by
//! the key it is registered under. Cycles longer than a self-edge are left to
//! the runner.

use std::collections::BTreeMap;

use crate::{Error, Job, Location, Need, Workflow};

/// Maps job values back to their keys in one workflow
#[derive(Debug)]
pub(crate) struct Resolver<'a> {
    workflow: &'a Workflow,
    index: Vec<(&'a Job, &'a str)>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(workflow: &'a Workflow) -> Self {
        let index = workflow
            .jobs
            .iter()
            .map(|(key, job)| (job, key.as_str()))
            .collect();

        Self { workflow, index }
    }

    /// Resolves one entry of the `needs` list of the job registered as `key`.
    pub(crate) fn resolve(&self, key: &str, need: &Need) -> Result<&'a str, Error> {
        let location = || Location::job(self.workflow.name.as_deref(), key);

        let resolved = match need {
            Need::Key(target) => self
                .workflow
                .jobs
                .get_key_value(target.as_str())
                .map(|(target, _)| target.as_str())
                .ok_or_else(|| Error::DanglingReference {
                    location: location(),
                    target: format!("'{target}'"),
                })?,
            Need::Job(job) => {
                let keys = self
                    .index
                    .iter()
                    .filter(|(candidate, _)| *candidate == job.as_ref())
                    .map(|(_, key)| *key)
                    .collect::<Vec<_>>();

                match keys.as_slice() {
                    [] => {
                        return Err(Error::DanglingReference {
                            location: location(),
                            target: job.describe(),
                        });
                    }
                    [key] => *key,
                    _ => {
                        return Err(Error::AmbiguousReference {
                            location: location(),
                            keys: keys.iter().map(ToString::to_string).collect(),
                        });
                    }
                }
            }
        };

        if resolved == key {
            return Err(Error::SelfReference {
                location: location(),
            });
        }

        log::trace!("resolve: job '{key}' needs '{resolved}'");

        Ok(resolved)
    }

    /// Resolves the whole `needs` list of `job`, stopping at the first defect.
    pub(crate) fn resolve_job(&self, key: &str, job: &Job) -> Result<Vec<&'a str>, Error> {
        job.needs
            .iter()
            .map(|need| self.resolve(key, need))
            .collect()
    }

    /// Every `needs` defect in the workflow, in job key order.
    pub(crate) fn errors(&self) -> Vec<Error> {
        self.workflow
            .jobs
            .iter()
            .flat_map(|(key, job)| {
                job.needs
                    .iter()
                    .filter_map(move |need| self.resolve(key, need).err())
            })
            .collect()
    }
}

/// Resolves every job's `needs` list to job keys.
///
/// The result maps each job key to its dependencies, in declaration order.
/// Jobs without dependencies map to an empty list.
///
/// # Errors
///
/// * [`Error::DanglingReference`] if an entry names a job missing from the workflow
/// * [`Error::AmbiguousReference`] if a job value is registered under several keys
/// * [`Error::SelfReference`] if a job needs itself
pub fn resolve_needs(workflow: &Workflow) -> Result<BTreeMap<String, Vec<String>>, Error> {
    let resolver = Resolver::new(workflow);

    workflow
        .jobs
        .iter()
        .map(|(key, job)| -> Result<(String, Vec<String>), Error> {
            let needs = resolver.resolve_job(key, job)?;
            Ok((key.clone(), needs.into_iter().map(ToString::to_string).collect()))
        })
        .collect()
}

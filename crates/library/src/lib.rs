//! Turning a directory of downloaded Python distributions into a mirror.
//!
//! The pipeline is: [`scan`] a download directory into
//! [`PackageArtifact`](wheelhouse_metadata::PackageArtifact)s, [`reconcile`]
//! the names of untrusted wheels against their siblings, then either [`list`]
//! them, write their sidecars ([`write_sidecars`]) or lay them out as a
//! package index ([`mirror::assemble`]).

pub mod error;
pub mod group;
mod listing;
pub mod mirror;
pub mod order;
pub mod reconcile;
pub mod scan;
mod sidecars;

pub use crate::listing::{ListOptions, Listing, list};
pub use crate::sidecars::{SidecarReport, remove_sidecars, write_sidecars};
use serde::{Deserialize, Serialize};
use wheelhouse_metadata::Extractor;

/// What to do when a single artifact can't be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Abort the whole run.
    #[default]
    FailFast,
    /// Log it, skip it and carry on with the rest.
    Continue,
}

/// Settings shared by every operation that resolves artifacts.
#[derive(Debug, Clone)]
pub struct Context {
    extractor: Extractor,
    jobs: usize,
    policy: ErrorPolicy,
}
impl Context {
    pub fn new(extractor: Extractor) -> Self {
        Self {
            extractor,
            jobs: 1,
            policy: ErrorPolicy::default(),
        }
    }

    /// Resolve on up to `jobs` threads. Zero is treated as one.
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }
}
impl Default for Context {
    fn default() -> Self {
        Self::new(Extractor::default())
    }
}

//! Batch jobs: one policy scenario plus what to do with it

use crate::policy::PolicyScenario;
use crate::projection::{project, PremiumSolver, ProjectionRecord, SolverConfig};
use crate::rates::RateProvider;
use super::error::{BatchError, DispatchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a job computes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    /// Project the scenario at its stated premium
    Project,
    /// Solve for the minimum solvent premium and project at it
    Solve,
}

impl FromStr for JobKind {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "project" | "illustrate" => Ok(JobKind::Project),
            "solve" => Ok(JobKind::Solve),
            other => Err(DispatchError::InvalidJobKind(other.to_string())),
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::Project => write!(f, "project"),
            JobKind::Solve => write!(f, "solve"),
        }
    }
}

/// A validated job, ready to hand to a worker
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub scenario: PolicyScenario,
    pub kind: JobKind,
}

impl Job {
    /// Projections need a premium; solves ignore any premium given
    pub fn new(scenario: PolicyScenario, kind: JobKind) -> Result<Self, DispatchError> {
        if kind == JobKind::Project && scenario.annual_premium.is_none() {
            return Err(DispatchError::MissingPremium(scenario.to_string()));
        }
        Ok(Self { scenario, kind })
    }

    pub fn project(scenario: PolicyScenario) -> Result<Self, DispatchError> {
        Self::new(scenario, JobKind::Project)
    }

    pub fn solve(scenario: PolicyScenario) -> Result<Self, DispatchError> {
        Self::new(scenario, JobKind::Solve)
    }

    /// Fetch this job's rates and run it
    ///
    /// Rates are requested from the provider on every call; nothing is
    /// shared between jobs unless the provider itself caches.
    pub fn execute<P: RateProvider + ?Sized>(
        &self,
        provider: &P,
        solver: &SolverConfig,
    ) -> Result<ProjectionRecord, BatchError> {
        let s = &self.scenario;
        let rates = provider
            .get_rates(&s.gender, &s.risk_class, s.issue_age)
            .map_err(|source| BatchError::Rates { scenario: Box::new(s.clone()), source })?;

        match self.kind {
            JobKind::Project => Ok(project(
                &rates,
                s.issue_age,
                s.face_amount,
                s.annual_premium.unwrap_or(0.0),
            )),
            JobKind::Solve => PremiumSolver::with_config(&rates, *solver)
                .solve(s.issue_age, s.face_amount)
                .map_err(|source| BatchError::Solve { scenario: Box::new(s.clone()), source }),
        }
    }
}

/// Unvalidated job as received from a caller, with the kind still as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    pub scenario: PolicyScenario,
    pub kind: String,
}

impl JobRequest {
    pub fn new(scenario: PolicyScenario, kind: impl Into<String>) -> Self {
        Self { scenario, kind: kind.into() }
    }
}

impl TryFrom<JobRequest> for Job {
    type Error = DispatchError;

    fn try_from(request: JobRequest) -> Result<Self, Self::Error> {
        let kind = request.kind.parse()?;
        Job::new(request.scenario, kind)
    }
}

/// `count` copies of the reference scenario as `kind` jobs
pub fn default_jobs(count: usize, kind: JobKind) -> Vec<Job> {
    let job = Job {
        scenario: PolicyScenario::reference(),
        kind,
    };
    vec![job; count]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_job_kind() {
        assert_eq!("project".parse::<JobKind>().unwrap(), JobKind::Project);
        assert_eq!("illustrate".parse::<JobKind>().unwrap(), JobKind::Project);
        assert_eq!(" solve ".parse::<JobKind>().unwrap(), JobKind::Solve);

        let err = "price".parse::<JobKind>().unwrap_err();
        assert_eq!(err, DispatchError::InvalidJobKind("price".to_string()));
    }

    #[test]
    fn test_project_requires_premium() {
        let scenario = PolicyScenario::new("M", "NS", 35, 100_000.0, None);

        assert!(matches!(Job::project(scenario.clone()), Err(DispatchError::MissingPremium(_))));
        assert!(Job::solve(scenario).is_ok());
    }

    #[test]
    fn test_request_conversion() {
        let request = JobRequest::new(PolicyScenario::reference(), "solve");
        let job = Job::try_from(request).unwrap();
        assert_eq!(job.kind, JobKind::Solve);

        let bad = JobRequest::new(PolicyScenario::reference(), "SOLVE!");
        assert!(matches!(Job::try_from(bad), Err(DispatchError::InvalidJobKind(_))));
    }

    #[test]
    fn test_default_jobs() {
        let jobs = default_jobs(3, JobKind::Project);
        assert_eq!(jobs.len(), 3);
        assert!(jobs.iter().all(|j| j.scenario == PolicyScenario::reference()));
    }
}

//! In-memory repository for job records.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::job::{
    domain::{Job, JobId},
    ports::{JobRepository, JobRepositoryError, JobRepositoryResult},
};

/// Thread-safe in-memory job repository.
///
/// Locks are held only while a record is copied into or out of the map, so
/// readers never wait on in-flight processing and only see committed jobs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobRepository {
    state: Arc<RwLock<HashMap<JobId, Job>>>,
}

impl InMemoryJobRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl ToString) -> JobRepositoryError {
    JobRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn store(&self, job: &Job) -> JobRepositoryResult<()> {
        let mut jobs = self.state.write().map_err(|err| poisoned(&err))?;
        if jobs.contains_key(&job.id()) {
            return Err(JobRepositoryError::DuplicateJob(job.id()));
        }
        jobs.insert(job.id(), job.clone());
        Ok(())
    }

    async fn update(&self, job: &Job) -> JobRepositoryResult<()> {
        let mut jobs = self.state.write().map_err(|err| poisoned(&err))?;
        let slot = jobs
            .get_mut(&job.id())
            .ok_or(JobRepositoryError::NotFound(job.id()))?;
        *slot = job.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: JobId) -> JobRepositoryResult<Option<Job>> {
        let jobs = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(jobs.get(&id).cloned())
    }

    async fn list_all(&self) -> JobRepositoryResult<Vec<Job>> {
        let jobs = self.state.read().map_err(|err| poisoned(&err))?;
        let mut listed: Vec<Job> = jobs.values().cloned().collect();
        listed.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        Ok(listed)
    }
}

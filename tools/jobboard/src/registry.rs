use std::collections::HashMap;

use crate::errors::JobBoardError;
use crate::job::Job;

/// Insertion-ordered name -> Job map. Jobs render top to bottom in the
/// order they were added, are never deleted, and re-adding a name
/// overwrites the existing record in place rather than erroring.
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: Vec<Job>,
    index: HashMap<String, usize>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, job: Job) {
        if let Some(&slot) = self.index.get(&job.name) {
            self.jobs[slot] = job;
            return;
        }
        self.index.insert(job.name.clone(), self.jobs.len());
        self.jobs.push(job);
    }

    pub fn get(&self, name: &str) -> Result<&Job, JobBoardError> {
        self.index
            .get(name)
            .map(|&slot| &self.jobs[slot])
            .ok_or_else(|| JobBoardError::NotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Job, JobBoardError> {
        match self.index.get(name) {
            Some(&slot) => Ok(&mut self.jobs[slot]),
            None => Err(JobBoardError::NotFound(name.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::JobRegistry;
    use crate::errors::JobBoardError;
    use crate::job::{Job, JobState};

    #[test]
    fn size_tracks_unique_adds_and_iteration_preserves_order() {
        let mut registry = JobRegistry::new();
        for name in ["a", "b", "c", "d"] {
            registry.add(Job::new(name, format!("job {name}")));
        }
        assert_eq!(registry.len(), 4);
        let order = registry.iter().map(|job| job.name.as_str()).collect::<Vec<_>>();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn readding_a_name_overwrites_in_place() {
        let mut registry = JobRegistry::new();
        registry.add(Job::new("a", "first"));
        registry.add(Job::new("b", "second"));
        registry.add(Job::new("a", "rewritten"));

        assert_eq!(registry.len(), 2);
        let order = registry.iter().map(|job| job.name.as_str()).collect::<Vec<_>>();
        assert_eq!(order, vec!["a", "b"]);
        let job = registry.get("a").expect("job a");
        assert_eq!(job.description, "rewritten");
        assert_eq!(job.state, JobState::Idle);
    }

    #[test]
    fn unknown_name_is_a_not_found_error() {
        let mut registry = JobRegistry::new();
        registry.add(Job::new("a", "first"));
        let err = registry.get("missing").expect_err("must be NotFound");
        assert!(matches!(err, JobBoardError::NotFound(name) if name == "missing"));
        assert!(registry.get_mut("missing").is_err());
    }
}

use std::sync::Arc;

use log::info;

use crate::error::PersistenceError;
use crate::model::submission::Submission;
use crate::storage::{BlobStore, SUBMISSIONS_KEY, load_collection, write_collection};

/// Append-only store of completed submissions.
pub struct SubmissionRepository {
    store: Arc<dyn BlobStore>,
    submissions: Vec<Submission>,
}

impl SubmissionRepository {
    pub fn open(store: Arc<dyn BlobStore>) -> Self {
        let submissions: Vec<Submission> = load_collection(store.as_ref(), SUBMISSIONS_KEY);
        info!("Loaded {} submission(s)", submissions.len());
        Self { store, submissions }
    }

    /// Every submission, oldest first.
    pub fn list(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn list_by_template(&self, template_id: &str) -> Vec<&Submission> {
        self.submissions
            .iter()
            .filter(|submission| submission.template_id == template_id)
            .collect()
    }

    pub fn append(&mut self, submission: Submission) -> Result<(), PersistenceError> {
        let mut next = self.submissions.clone();
        next.push(submission);
        write_collection(self.store.as_ref(), SUBMISSIONS_KEY, &next)?;
        self.submissions = next;
        Ok(())
    }

    /// Removes all submissions of one template. Returns how many were removed;
    /// nothing is written when there were none.
    pub fn delete_by_template(&mut self, template_id: &str) -> Result<usize, PersistenceError> {
        let next: Vec<Submission> = self
            .submissions
            .iter()
            .filter(|submission| submission.template_id != template_id)
            .cloned()
            .collect();
        let removed = self.submissions.len() - next.len();
        if removed == 0 {
            return Ok(0);
        }

        write_collection(self.store.as_ref(), SUBMISSIONS_KEY, &next)?;
        self.submissions = next;
        Ok(removed)
    }

    /// Puts back an earlier snapshot, undoing a cascade whose template write
    /// failed. Memory only changes if the write succeeds.
    pub(crate) fn restore(&mut self, snapshot: Vec<Submission>) -> Result<(), PersistenceError> {
        write_collection(self.store.as_ref(), SUBMISSIONS_KEY, &snapshot)?;
        self.submissions = snapshot;
        Ok(())
    }
}

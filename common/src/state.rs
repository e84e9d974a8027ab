//! # Application state
//!
//! `FormsState` owns both repositories and is handed by reference to whatever
//! needs them; there is no global lookup. It also wires the flows that span
//! more than one component: opening an edit session from a saved template,
//! committing it, deleting a template with its submissions, and gating a
//! submission on validation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::info;

use crate::editor::{ExitOutcome, ExitResolution, TemplateEditSession};
use crate::error::{FormError, PersistenceError};
use crate::model::submission::{Submission, SubmissionData};
use crate::model::template::Template;
use crate::repository::{SubmissionRepository, TemplateRepository};
use crate::storage::BlobStore;
use crate::validation::{FieldErrors, validate_submission};

/// Result of a submission attempt that reached the storage layer or was
/// refused before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored.
    Accepted(Submission),
    /// Refused; nothing was stored.
    Rejected(FieldErrors),
    /// No template with that id exists.
    UnknownTemplate,
}

pub struct FormsState {
    templates: TemplateRepository,
    submissions: SubmissionRepository,
}

impl FormsState {
    /// Opens both repositories over one shared store.
    pub fn open(store: Arc<dyn BlobStore>) -> Self {
        Self {
            templates: TemplateRepository::open(store.clone()),
            submissions: SubmissionRepository::open(store),
        }
    }

    pub fn templates(&self) -> &TemplateRepository {
        &self.templates
    }

    pub fn submissions(&self) -> &SubmissionRepository {
        &self.submissions
    }

    /// Session over a fresh blank template. The template limit is only
    /// enforced when the session commits.
    pub fn begin_new_template(&self) -> TemplateEditSession {
        TemplateEditSession::blank()
    }

    /// Session over a copy of a saved template.
    pub fn begin_edit(&self, template_id: &str) -> Option<TemplateEditSession> {
        self.templates
            .get(template_id)
            .cloned()
            .map(TemplateEditSession::new)
    }

    pub fn commit(&mut self, session: &mut TemplateEditSession) -> Result<(), FormError> {
        let saved = session.commit(&mut self.templates)?;
        info!("Saved template {} ({})", saved.id, saved.name);
        Ok(())
    }

    /// Stores a complete template outside any edit session. Validity is the
    /// caller's concern; the template limit still applies.
    pub fn upsert_template(&mut self, template: Template) -> Result<(), FormError> {
        let id = template.id.clone();
        self.templates.upsert(template)?;
        info!("Upserted template {}", id);
        Ok(())
    }

    pub fn resolve_exit(
        &mut self,
        session: &mut TemplateEditSession,
        resolution: ExitResolution,
    ) -> Result<ExitOutcome, FormError> {
        session.resolve_exit(resolution, &mut self.templates)
    }

    /// Deletes a template and every submission filled against it.
    pub fn delete_template(&mut self, template_id: &str) -> Result<bool, PersistenceError> {
        self.templates.delete(template_id, &mut self.submissions)
    }

    pub fn submit(
        &mut self,
        template_id: &str,
        data: SubmissionData,
    ) -> Result<SubmitOutcome, PersistenceError> {
        self.submit_at(template_id, data, Utc::now())
    }

    /// Validates `data` against the template and stores it only if every
    /// field passes.
    pub fn submit_at(
        &mut self,
        template_id: &str,
        data: SubmissionData,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, PersistenceError> {
        let Some(template) = self.templates.get(template_id) else {
            return Ok(SubmitOutcome::UnknownTemplate);
        };

        let errors = validate_submission(template, &data);
        if !errors.is_empty() {
            info!(
                "Refused submission for {}: {} field(s) in error",
                template_id,
                errors.len()
            );
            return Ok(SubmitOutcome::Rejected(errors));
        }

        let submission = Submission::new(template_id, data, now);
        self.submissions.append(submission.clone())?;
        info!("Stored submission {} for {}", submission.id, template_id);
        Ok(SubmitOutcome::Accepted(submission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::{FieldSpec, FieldType};
    use crate::model::submission::FieldValue;
    use crate::storage::MemoryBlobStore;

    fn saved_intake(state: &mut FormsState) -> (String, String) {
        let mut session = state.begin_new_template();
        session.rename_template("Intake");
        let section_id = session.template().sections[0].id.clone();
        let field_id = session
            .add_field(&section_id, FieldSpec::new(FieldType::Text, "Name"))
            .unwrap()
            .unwrap();
        state.commit(&mut session).unwrap();
        (session.template().id.clone(), field_id)
    }

    #[test]
    fn begin_edit_copies_the_saved_template() {
        let mut state = FormsState::open(Arc::new(MemoryBlobStore::new()));
        let (template_id, _) = saved_intake(&mut state);

        let mut session = state.begin_edit(&template_id).unwrap();
        session.rename_template("Changed");

        assert!(session.is_dirty());
        assert_eq!(state.templates().get(&template_id).unwrap().name, "Intake");
        assert!(state.begin_edit("missing").is_none());
    }

    #[test]
    fn submit_is_gated_by_validation() {
        let mut state = FormsState::open(Arc::new(MemoryBlobStore::new()));
        let (template_id, field_id) = saved_intake(&mut state);

        let outcome = state.submit(&template_id, SubmissionData::new()).unwrap();
        let SubmitOutcome::Rejected(errors) = outcome else {
            panic!("expected rejection, got {outcome:?}");
        };
        assert!(errors.contains_key(&field_id));
        assert!(state.submissions().list().is_empty());

        let mut data = SubmissionData::new();
        data.insert(field_id, FieldValue::from("Ada"));
        let outcome = state.submit(&template_id, data).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Accepted(_)));
        assert_eq!(state.submissions().list_by_template(&template_id).len(), 1);

        assert_eq!(
            state.submit("missing", SubmissionData::new()).unwrap(),
            SubmitOutcome::UnknownTemplate
        );
    }

    #[test]
    fn delete_template_cascades() {
        let mut state = FormsState::open(Arc::new(MemoryBlobStore::new()));
        let (template_id, field_id) = saved_intake(&mut state);
        let mut data = SubmissionData::new();
        data.insert(field_id, FieldValue::from("Ada"));
        state.submit(&template_id, data).unwrap();

        assert!(state.delete_template(&template_id).unwrap());

        assert!(state.templates().is_empty());
        assert!(state.submissions().list().is_empty());
    }
}

use std::sync::Arc;

use log::{error, info};

use crate::error::{FormError, PersistenceError};
use crate::model::template::Template;
use crate::repository::submissions::SubmissionRepository;
use crate::storage::{BlobStore, TEMPLATES_KEY, load_collection, write_collection};

/// Maximum number of saved templates.
pub const TEMPLATE_LIMIT: usize = 5;

/// The authoritative set of saved templates.
pub struct TemplateRepository {
    store: Arc<dyn BlobStore>,
    templates: Vec<Template>,
}

impl TemplateRepository {
    /// Loads the saved templates from `store`. Missing or corrupt data opens
    /// an empty repository.
    pub fn open(store: Arc<dyn BlobStore>) -> Self {
        let templates: Vec<Template> = load_collection(store.as_ref(), TEMPLATES_KEY);
        info!("Loaded {} template(s)", templates.len());
        Self { store, templates }
    }

    /// Saved templates in insertion order. Updates keep their position.
    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, template_id: &str) -> Option<&Template> {
        self.templates
            .iter()
            .find(|template| template.id == template_id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// `true` when creating another template would fail.
    pub fn is_full(&self) -> bool {
        self.templates.len() >= TEMPLATE_LIMIT
    }

    /// Replaces the template with the same id in place, or appends it.
    ///
    /// A replacement keeps the stored `created_at`. Appending fails with
    /// [`FormError::TemplateLimitReached`] once [`TEMPLATE_LIMIT`] templates
    /// exist. Nothing changes unless the write-through succeeds.
    pub fn upsert(&mut self, mut template: Template) -> Result<(), FormError> {
        let mut next = self.templates.clone();
        match next.iter().position(|saved| saved.id == template.id) {
            Some(index) => {
                template.created_at = next[index].created_at;
                next[index] = template;
            }
            None => {
                if next.len() >= TEMPLATE_LIMIT {
                    info!(
                        "Rejected template {}: limit of {} reached",
                        template.id, TEMPLATE_LIMIT
                    );
                    return Err(FormError::TemplateLimitReached {
                        limit: TEMPLATE_LIMIT,
                    });
                }
                next.push(template);
            }
        }

        write_collection(self.store.as_ref(), TEMPLATES_KEY, &next)?;
        self.templates = next;
        Ok(())
    }

    /// Removes the template and every submission filled against it.
    ///
    /// Returns `Ok(false)` without writing anything when no template has that
    /// id. The submissions go first; if the template list then cannot be
    /// written, the removed submissions are written back and the call fails
    /// with nothing deleted.
    pub fn delete(
        &mut self,
        template_id: &str,
        submissions: &mut SubmissionRepository,
    ) -> Result<bool, PersistenceError> {
        let Some(index) = self
            .templates
            .iter()
            .position(|template| template.id == template_id)
        else {
            return Ok(false);
        };

        let snapshot = submissions.list().to_vec();
        let removed = submissions.delete_by_template(template_id)?;

        let mut next = self.templates.clone();
        next.remove(index);
        if let Err(e) = write_collection(self.store.as_ref(), TEMPLATES_KEY, &next) {
            if removed > 0 {
                if let Err(rollback) = submissions.restore(snapshot) {
                    error!(
                        "Could not restore {} submission(s) of {}: {}",
                        removed, template_id, rollback
                    );
                }
            }
            return Err(e);
        }
        self.templates = next;

        info!(
            "Deleted template {} and {} submission(s)",
            template_id, removed
        );
        Ok(true)
    }
}

//! # Template aggregate
//!
//! A `Template` is the root of the builder's data model: a named, ordered list
//! of [`Section`]s plus creation and last-save timestamps. Templates are only
//! mutated through an edit session and only persisted through the template
//! repository; this module holds the data and the "valid to save" rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::field::FieldDescriptor;
use crate::model::section::Section;

/// A reusable form definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Assigned at creation, never reassigned.
    pub id: String,
    pub name: String,
    pub sections: Vec<Section>,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful save.
    pub updated_at: DateTime<Utc>,
}

/// The first reason a template is not valid to save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
pub enum TemplateIssue {
    #[error("the template needs a name")]
    MissingName,
    #[error("the template needs at least one section")]
    NoSections,
    #[error("at least one section needs a field")]
    NoFields,
}

impl Template {
    /// A fresh, unnamed template holding one empty section.
    pub fn blank() -> Self {
        Self::blank_at(Utc::now())
    }

    pub fn blank_at(now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: String::new(),
            sections: vec![Section::default()],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == section_id)
    }

    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.sections
            .iter_mut()
            .find(|section| section.id == section_id)
    }

    /// Every field, in section order then field order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.sections.iter().flat_map(|section| section.fields.iter())
    }

    /// Returns why the template cannot be saved, or `None` when it can.
    ///
    /// Checked in order: a non-blank name, at least one section, at least one
    /// section with a field.
    pub fn validity_issue(&self) -> Option<TemplateIssue> {
        if self.name.trim().is_empty() {
            Some(TemplateIssue::MissingName)
        } else if self.sections.is_empty() {
            Some(TemplateIssue::NoSections)
        } else if self.sections.iter().all(|section| section.fields.is_empty()) {
            Some(TemplateIssue::NoFields)
        } else {
            None
        }
    }

    pub fn is_valid_to_save(&self) -> bool {
        self.validity_issue().is_none()
    }
}

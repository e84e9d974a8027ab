use serde::{Deserialize, Serialize};

use crate::model::field::FieldDescriptor;

/// Title given to sections created by the builder.
pub const DEFAULT_SECTION_TITLE: &str = "New Section";

/// A titled, ordered group of fields. Field order is render and fill order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl Section {
    /// Creates an empty section with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.id == field_id)
    }

    pub fn field_mut(&mut self, field_id: &str) -> Option<&mut FieldDescriptor> {
        self.fields.iter_mut().find(|field| field.id == field_id)
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION_TITLE)
    }
}

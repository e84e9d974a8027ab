//! Serializable edit commands and the abstract drag event.
//!
//! `EditOp` names every mutation an edit session supports, so an outer layer
//! (the HTTP adapter, a message loop) can forward user actions as data.
//! `MoveEvent` is what a drag-and-drop or keyboard-reordering layer reports
//! when an item is dropped; the session turns it into a field reorder.

use serde::{Deserialize, Serialize};

use crate::model::field::{FieldSpec, FieldUpdate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditOp {
    RenameTemplate {
        name: String,
    },
    AddSection,
    RenameSection {
        section_id: String,
        title: String,
    },
    DeleteSection {
        section_id: String,
    },
    ReorderSections {
        from_index: usize,
        to_index: usize,
    },
    AddField {
        section_id: String,
        spec: FieldSpec,
    },
    UpdateField {
        section_id: String,
        field_id: String,
        update: FieldUpdate,
    },
    DeleteField {
        section_id: String,
        field_id: String,
    },
    ReorderFields {
        section_id: String,
        from_index: usize,
        to_index: usize,
    },
}

/// A position inside a reorderable group (a section's field list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    pub group: String,
    pub index: usize,
}

/// "Move the item at `source` to `destination`".
///
/// `destination` is `None` when the item was dropped outside any group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

//! # Template edit session
//!
//! A `TemplateEditSession` owns the working copy of one template for as long
//! as the user edits it. Every structural change goes through the session;
//! none of the mutations touch storage. After each mutation the session
//! refreshes a structural fingerprint of the working copy, and `is_dirty`
//! compares it with the fingerprint taken when the session began or last
//! committed.
//!
//! Operations addressing an unknown section or field id are silent no-ops:
//! ids go stale when two UI events race (a rename arriving after a delete),
//! and that is not the user's problem.
//!
//! ## Leaving a session
//!
//! 1. The caller asks [`TemplateEditSession::request_exit`].
//! 2. `CleanExit` means the session can be dropped right away.
//! 3. `ConfirmationRequired` means the user picks an [`ExitResolution`]:
//!    - `Discard` leaves without any repository call;
//!    - `SaveThenExit` commits and leaves only if the commit succeeds,
//!      otherwise the session stays open, unchanged, with the error returned;
//!    - `Cancel` returns to editing with nothing changed.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::editor::fingerprint::{Fingerprint, fingerprint};
use crate::editor::ops::{EditOp, MoveEvent};
use crate::error::{FieldSpecError, FormError};
use crate::model::field::{FieldSpec, FieldUpdate};
use crate::model::section::{DEFAULT_SECTION_TITLE, Section};
use crate::model::template::{Template, TemplateIssue};
use crate::repository::TemplateRepository;

/// Answer to [`TemplateEditSession::request_exit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExitCheck {
    CleanExit,
    ConfirmationRequired,
}

/// The user's answer to an exit confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExitResolution {
    Discard,
    SaveThenExit,
    Cancel,
}

/// What the caller should do after resolving an exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExitOutcome {
    /// Close the session.
    Leave,
    /// Keep the session open.
    Stay,
}

/// Working copy of one template plus its dirty-tracking baseline.
#[derive(Debug, Clone)]
pub struct TemplateEditSession {
    working: Template,
    baseline: Fingerprint,
    current: Fingerprint,
}

impl TemplateEditSession {
    /// Starts editing `template`; the session begins clean.
    pub fn new(template: Template) -> Self {
        let baseline = fingerprint(&template);
        Self {
            working: template,
            baseline,
            current: baseline,
        }
    }

    /// Starts editing a blank template (unnamed, one empty section).
    pub fn blank() -> Self {
        Self::new(Template::blank())
    }

    pub fn template(&self) -> &Template {
        &self.working
    }

    pub fn into_template(self) -> Template {
        self.working
    }

    /// Replaces the template name. `updated_at` only moves on commit.
    pub fn rename_template(&mut self, name: impl Into<String>) {
        self.working.name = name.into();
        self.touch();
    }

    /// Appends an empty section titled "New Section" and returns its id.
    pub fn add_section(&mut self) -> String {
        let section = Section::new(DEFAULT_SECTION_TITLE);
        let id = section.id.clone();
        self.working.sections.push(section);
        self.touch();
        id
    }

    pub fn rename_section(&mut self, section_id: &str, title: impl Into<String>) {
        if let Some(section) = self.working.section_mut(section_id) {
            section.title = title.into();
            self.touch();
        }
    }

    /// Removes the section and its fields. Submissions are not affected.
    pub fn delete_section(&mut self, section_id: &str) {
        let before = self.working.sections.len();
        self.working
            .sections
            .retain(|section| section.id != section_id);
        if self.working.sections.len() != before {
            self.touch();
        }
    }

    /// Moves one section from `from_index` to `to_index`.
    /// Out-of-range indices are ignored.
    pub fn reorder_sections(&mut self, from_index: usize, to_index: usize) {
        if move_item(&mut self.working.sections, from_index, to_index) {
            self.touch();
        }
    }

    /// Completes `spec` into a field and appends it to the section.
    ///
    /// Returns the new field id, or `Ok(None)` when the section does not
    /// exist; sections are never created implicitly. Fails only for a spec
    /// that cannot form a field (an enum without options).
    pub fn add_field(
        &mut self,
        section_id: &str,
        spec: FieldSpec,
    ) -> Result<Option<String>, FieldSpecError> {
        let Some(section) = self.working.section_mut(section_id) else {
            debug!("add_field: unknown section {}", section_id);
            return Ok(None);
        };

        let field = spec.into_descriptor(uuid::Uuid::new_v4().to_string())?;
        let id = field.id.clone();
        section.fields.push(field);
        self.touch();
        Ok(Some(id))
    }

    pub fn update_field(&mut self, section_id: &str, field_id: &str, update: FieldUpdate) {
        let Some(field) = self
            .working
            .section_mut(section_id)
            .and_then(|section| section.field_mut(field_id))
        else {
            return;
        };
        field.apply_update(update);
        self.touch();
    }

    pub fn delete_field(&mut self, section_id: &str, field_id: &str) {
        let Some(section) = self.working.section_mut(section_id) else {
            return;
        };
        let before = section.fields.len();
        section.fields.retain(|field| field.id != field_id);
        if section.fields.len() != before {
            self.touch();
        }
    }

    /// Moves the field at `from_index` to `to_index` within one section.
    /// Unknown sections and out-of-range indices are ignored.
    pub fn reorder_fields(&mut self, section_id: &str, from_index: usize, to_index: usize) {
        let moved = self
            .working
            .section_mut(section_id)
            .is_some_and(|section| move_item(&mut section.fields, from_index, to_index));
        if moved {
            self.touch();
        }
    }

    /// Applies a drop reported by a gesture layer. Drops outside any group
    /// and moves between different sections are ignored.
    pub fn handle_move(&mut self, event: &MoveEvent) {
        match &event.destination {
            Some(destination) if destination.group == event.source.group => {
                self.reorder_fields(&event.source.group, event.source.index, destination.index);
            }
            _ => debug!("Ignoring move out of group {}", event.source.group),
        }
    }

    /// Applies one edit command. Returns the id of a created section or field.
    pub fn apply(&mut self, op: EditOp) -> Result<Option<String>, FieldSpecError> {
        match op {
            EditOp::RenameTemplate { name } => self.rename_template(name),
            EditOp::AddSection => return Ok(Some(self.add_section())),
            EditOp::RenameSection { section_id, title } => self.rename_section(&section_id, title),
            EditOp::DeleteSection { section_id } => self.delete_section(&section_id),
            EditOp::ReorderSections {
                from_index,
                to_index,
            } => self.reorder_sections(from_index, to_index),
            EditOp::AddField { section_id, spec } => return self.add_field(&section_id, spec),
            EditOp::UpdateField {
                section_id,
                field_id,
                update,
            } => self.update_field(&section_id, &field_id, update),
            EditOp::DeleteField {
                section_id,
                field_id,
            } => self.delete_field(&section_id, &field_id),
            EditOp::ReorderFields {
                section_id,
                from_index,
                to_index,
            } => self.reorder_fields(&section_id, from_index, to_index),
        }
        Ok(None)
    }

    pub fn is_valid(&self) -> bool {
        self.working.is_valid_to_save()
    }

    /// The reason the working copy cannot be saved yet, if any.
    pub fn validity_issue(&self) -> Option<TemplateIssue> {
        self.working.validity_issue()
    }

    /// Whether the working copy differs structurally from the last baseline.
    pub fn is_dirty(&self) -> bool {
        self.current != self.baseline
    }

    pub fn request_exit(&self) -> ExitCheck {
        if self.is_dirty() {
            ExitCheck::ConfirmationRequired
        } else {
            ExitCheck::CleanExit
        }
    }

    /// Saves the working copy through `repository`, stamping `updated_at`.
    pub fn commit(&mut self, repository: &mut TemplateRepository) -> Result<&Template, FormError> {
        self.commit_at(repository, Utc::now())
    }

    /// [`commit`](Self::commit) with an explicit save time.
    ///
    /// On any failure the session is left exactly as it was.
    pub fn commit_at(
        &mut self,
        repository: &mut TemplateRepository,
        now: DateTime<Utc>,
    ) -> Result<&Template, FormError> {
        if let Some(issue) = self.working.validity_issue() {
            debug!("Commit of {} refused: {}", self.working.id, issue);
            return Err(FormError::InvalidTemplate(issue));
        }

        let mut saved = self.working.clone();
        saved.updated_at = now;
        repository.upsert(saved.clone())?;

        self.working = saved;
        self.baseline = self.current;
        Ok(&self.working)
    }

    /// Carries out the user's answer to an exit confirmation.
    pub fn resolve_exit(
        &mut self,
        resolution: ExitResolution,
        repository: &mut TemplateRepository,
    ) -> Result<ExitOutcome, FormError> {
        match resolution {
            ExitResolution::Discard => Ok(ExitOutcome::Leave),
            ExitResolution::SaveThenExit => {
                self.commit(repository)?;
                Ok(ExitOutcome::Leave)
            }
            ExitResolution::Cancel => Ok(ExitOutcome::Stay),
        }
    }

    fn touch(&mut self) {
        self.current = fingerprint(&self.working);
    }
}

/// Single-item move: remove at `from`, reinsert at `to`. Returns whether
/// anything moved.
fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::ops::DragLocation;
    use crate::model::field::{EnumOptions, FieldKind, FieldType, LabelStyle};
    use crate::storage::MemoryBlobStore;
    use std::sync::Arc;

    fn repository() -> TemplateRepository {
        TemplateRepository::open(Arc::new(MemoryBlobStore::new()))
    }

    /// Session over a saved-looking template with three text fields.
    fn session_with_fields() -> (TemplateEditSession, String, Vec<String>) {
        let mut session = TemplateEditSession::blank();
        let section_id = session.template().sections[0].id.clone();
        let ids = ["A", "B", "C"]
            .into_iter()
            .map(|label| {
                session
                    .add_field(&section_id, FieldSpec::new(FieldType::Text, label))
                    .unwrap()
                    .unwrap()
            })
            .collect();
        let session = TemplateEditSession::new(session.into_template());
        (session, section_id, ids)
    }

    fn labels(session: &TemplateEditSession, section_id: &str) -> Vec<String> {
        session
            .template()
            .section(section_id)
            .unwrap()
            .fields
            .iter()
            .map(|field| field.label.clone())
            .collect()
    }

    #[test]
    fn new_session_is_clean() {
        let session = TemplateEditSession::blank();
        assert!(!session.is_dirty());
        assert_eq!(session.request_exit(), ExitCheck::CleanExit);
    }

    #[test]
    fn rename_marks_dirty_and_renaming_back_clears_it() {
        let mut session = TemplateEditSession::blank();
        let updated_at = session.template().updated_at;

        session.rename_template("Intake");
        assert!(session.is_dirty());
        assert!(session.is_dirty());
        assert_eq!(session.template().updated_at, updated_at);

        session.rename_template("");
        assert!(!session.is_dirty());
    }

    #[test]
    fn add_section_uses_default_title() {
        let mut session = TemplateEditSession::blank();
        let id = session.add_section();

        let section = session.template().section(&id).unwrap();
        assert_eq!(section.title, "New Section");
        assert!(section.fields.is_empty());
        assert_eq!(session.template().sections.len(), 2);
    }

    #[test]
    fn unknown_ids_are_silent_no_ops() {
        let (mut session, section_id, ids) = session_with_fields();

        session.rename_section("missing", "X");
        session.update_field(&section_id, "missing", FieldUpdate::default());
        session.update_field("missing", &ids[0], FieldUpdate::default());
        session.delete_field("missing", &ids[0]);
        session.delete_field(&section_id, "missing");
        session.delete_section("missing");
        session.reorder_fields("missing", 0, 1);

        assert!(!session.is_dirty());
    }

    #[test]
    fn add_field_never_creates_a_section() {
        let mut session = TemplateEditSession::blank();
        let section_id = session.template().sections[0].id.clone();
        session.delete_section(&section_id);

        let added = session
            .add_field(&section_id, FieldSpec::new(FieldType::Text, "Name"))
            .unwrap();

        assert_eq!(added, None);
        assert!(session.template().sections.is_empty());
    }

    #[test]
    fn add_field_fills_defaults() {
        let mut session = TemplateEditSession::blank();
        let section_id = session.template().sections[0].id.clone();

        let label_id = session
            .add_field(&section_id, FieldSpec::new(FieldType::Label, "Welcome"))
            .unwrap()
            .unwrap();
        let number_id = session
            .add_field(&section_id, FieldSpec::new(FieldType::Number, "Age"))
            .unwrap()
            .unwrap();

        let section = session.template().section(&section_id).unwrap();
        assert_eq!(
            section.field(&label_id).unwrap().kind,
            FieldKind::Label {
                label_style: LabelStyle::H2
            }
        );
        assert!(section.field(&number_id).unwrap().is_required());
    }

    #[test]
    fn invalid_spec_leaves_the_session_untouched() {
        let mut session = TemplateEditSession::blank();
        let section_id = session.template().sections[0].id.clone();

        let err = session
            .add_field(&section_id, FieldSpec::new(FieldType::Enum, "Colour"))
            .unwrap_err();

        assert_eq!(err, FieldSpecError::MissingOptions);
        assert!(!session.is_dirty());
    }

    #[test]
    fn update_and_delete_field() {
        let (mut session, section_id, ids) = session_with_fields();

        session.update_field(
            &section_id,
            &ids[1],
            FieldUpdate {
                label: Some("Bee".into()),
                required: Some(false),
                ..FieldUpdate::default()
            },
        );
        session.delete_field(&section_id, &ids[0]);

        assert_eq!(labels(&session, &section_id), ["Bee", "C"]);
        let bee = session.template().sections[0].field(&ids[1]).unwrap();
        assert!(!bee.is_required());
        assert!(session.is_dirty());
    }

    #[test]
    fn reorder_then_reverse_restores_order() {
        let (mut session, section_id, _) = session_with_fields();

        session.reorder_fields(&section_id, 0, 2);
        assert_eq!(labels(&session, &section_id), ["B", "C", "A"]);
        assert!(session.is_dirty());

        session.reorder_fields(&section_id, 2, 0);
        assert_eq!(labels(&session, &section_id), ["A", "B", "C"]);
        assert!(!session.is_dirty());
    }

    #[test]
    fn out_of_bounds_reorder_is_ignored() {
        let (mut session, section_id, _) = session_with_fields();

        session.reorder_fields(&section_id, 3, 0);
        session.reorder_fields(&section_id, 0, 3);

        assert_eq!(labels(&session, &section_id), ["A", "B", "C"]);
    }

    #[test]
    fn cross_group_and_outside_drops_are_ignored() {
        let (mut session, section_id, _) = session_with_fields();
        let other = session.add_section();
        let baseline = session.template().clone();

        session.handle_move(&MoveEvent {
            source: DragLocation {
                group: section_id.clone(),
                index: 0,
            },
            destination: Some(DragLocation {
                group: other,
                index: 0,
            }),
        });
        session.handle_move(&MoveEvent {
            source: DragLocation {
                group: section_id.clone(),
                index: 0,
            },
            destination: None,
        });
        assert_eq!(session.template(), &baseline);

        session.handle_move(&MoveEvent {
            source: DragLocation {
                group: section_id.clone(),
                index: 2,
            },
            destination: Some(DragLocation {
                group: section_id.clone(),
                index: 0,
            }),
        });
        assert_eq!(labels(&session, &section_id), ["C", "A", "B"]);
    }

    #[test]
    fn sections_reorder_like_fields() {
        let mut session = TemplateEditSession::blank();
        let first = session.template().sections[0].id.clone();
        let second = session.add_section();

        session.reorder_sections(1, 0);

        let order: Vec<&str> = session
            .template()
            .sections
            .iter()
            .map(|section| section.id.as_str())
            .collect();
        assert_eq!(order, [second.as_str(), first.as_str()]);
    }

    #[test]
    fn apply_dispatches_commands() {
        let mut session = TemplateEditSession::blank();
        let section_id = session
            .apply(EditOp::AddSection)
            .unwrap()
            .unwrap();
        session
            .apply(EditOp::RenameSection {
                section_id: section_id.clone(),
                title: "Preferences".into(),
            })
            .unwrap();
        let field_id = session
            .apply(EditOp::AddField {
                section_id: section_id.clone(),
                spec: FieldSpec::new(FieldType::Enum, "Colour")
                    .with_options(EnumOptions::new(["Red", "Green"]).unwrap()),
            })
            .unwrap()
            .unwrap();

        let section = session.template().section(&section_id).unwrap();
        assert_eq!(section.title, "Preferences");
        assert_eq!(section.field(&field_id).unwrap().field_type(), FieldType::Enum);
    }

    #[test]
    fn commit_refuses_invalid_templates_and_keeps_the_session() {
        let mut repo = repository();
        let mut session = TemplateEditSession::blank();
        session.rename_template("Intake");

        let err = session.commit(&mut repo).unwrap_err();

        assert!(matches!(
            err,
            FormError::InvalidTemplate(TemplateIssue::NoFields)
        ));
        assert!(session.is_dirty());
        assert!(repo.is_empty());
    }

    #[test]
    fn commit_stamps_and_rebaselines() {
        let mut repo = repository();
        let (mut session, _, _) = session_with_fields();
        session.rename_template("Intake");
        let saved_at = session.template().created_at + chrono::Duration::minutes(5);

        let saved = session.commit_at(&mut repo, saved_at).unwrap().clone();

        assert_eq!(saved.updated_at, saved_at);
        assert!(!session.is_dirty());
        assert_eq!(session.request_exit(), ExitCheck::CleanExit);
        assert_eq!(repo.list(), [saved]);
    }

    #[test]
    fn exit_resolutions() {
        let mut repo = repository();
        let (mut session, _, _) = session_with_fields();
        session.rename_template("Intake");
        assert_eq!(session.request_exit(), ExitCheck::ConfirmationRequired);

        let snapshot = session.template().clone();
        assert_eq!(
            session
                .resolve_exit(ExitResolution::Cancel, &mut repo)
                .unwrap(),
            ExitOutcome::Stay
        );
        assert_eq!(session.template(), &snapshot);
        assert!(session.is_dirty());

        assert_eq!(
            session
                .resolve_exit(ExitResolution::Discard, &mut repo)
                .unwrap(),
            ExitOutcome::Leave
        );
        assert!(repo.is_empty());

        assert_eq!(
            session
                .resolve_exit(ExitResolution::SaveThenExit, &mut repo)
                .unwrap(),
            ExitOutcome::Leave
        );
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn failed_save_then_exit_stays_in_the_session() {
        let mut repo = repository();
        let mut session = TemplateEditSession::blank();
        session.add_section();

        let err = session
            .resolve_exit(ExitResolution::SaveThenExit, &mut repo)
            .unwrap_err();

        assert!(matches!(
            err,
            FormError::InvalidTemplate(TemplateIssue::MissingName)
        ));
        assert!(session.is_dirty());
    }
}

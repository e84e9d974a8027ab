//! Request and response payloads exchanged between the server and a builder
//! or form-fill client.

use serde::{Deserialize, Serialize};

use crate::editor::{ExitCheck, ExitResolution, TemplateEditSession};
use crate::model::template::{Template, TemplateIssue};

/// Body of `POST /api/sessions`.
///
/// Without a `templateId` the session starts on a blank template.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionRequest {
    #[serde(default)]
    pub template_id: Option<String>,
}

/// Body of `POST /api/sessions/{session_id}/exit`.
#[derive(Debug, Deserialize, Serialize)]
pub struct ExitRequest {
    pub resolution: ExitResolution,
}

/// Body of `GET /api/sessions/{session_id}/exit`.
#[derive(Debug, Deserialize, Serialize)]
pub struct ExitCheckResponse {
    pub exit: ExitCheck,
}

/// Snapshot of an edit session as reported to the client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub session_id: String,
    pub template: Template,
    pub valid: bool,
    pub issue: Option<TemplateIssue>,
    pub dirty: bool,
}

impl SessionStatus {
    pub fn of(session_id: impl Into<String>, session: &TemplateEditSession) -> Self {
        Self {
            session_id: session_id.into(),
            template: session.template().clone(),
            valid: session.is_valid(),
            issue: session.validity_issue(),
            dirty: session.is_dirty(),
        }
    }
}

/// Reply to an applied edit command.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    /// Id of the section or field the command created, if any.
    pub created_id: Option<String>,
    pub status: SessionStatus,
}

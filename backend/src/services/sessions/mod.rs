//! # Edit Session Service Module
//!
//! Routes under `/api/sessions`. A session is the server-side working copy of
//! one template; the builder opens one, sends edit commands to it, and commits
//! or abandons it through the exit flow.
//!
//! ## Sub-modules:
//! - `open`: starts a session on a blank or a saved template.
//! - `status`: reports the working copy with its validity and dirty flag.
//! - `edit`: applies `EditOp` commands and drag moves.
//! - `commit`: saves the working copy.
//! - `exit`: the confirm-on-exit check and its resolution.
//! - `close`: drops a session without saving.

mod close;
mod commit;
mod edit;
mod exit;
mod open;
mod status;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

/// The base path for all session-related API endpoints.
const API_PATH: &str = "/api/sessions";

/// Configures and returns the Actix `Scope` for all session-related routes.
///
/// # Registered Routes:
///
/// *   **`POST /`** (`open::process`): opens a session, returns `SessionStatus`.
/// *   **`GET /{session_id}`** (`status::process`): current `SessionStatus`.
/// *   **`DELETE /{session_id}`** (`close::process`): closes the session, unsaved
///     edits are dropped.
/// *   **`POST /{session_id}/ops`** (`edit::apply_op`): applies one `EditOp`.
/// *   **`POST /{session_id}/move`** (`edit::apply_move`): applies a `MoveEvent`.
/// *   **`POST /{session_id}/commit`** (`commit::process`): saves the working copy.
/// *   **`GET /{session_id}/exit`** (`exit::check`): whether leaving needs
///     confirmation. A clean session is closed by the check.
/// *   **`POST /{session_id}/exit`** (`exit::resolve`): resolves the exit; a
///     session that leaves is closed.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(open::process))
        .route("/{session_id}", get().to(status::process))
        .route("/{session_id}", delete().to(close::process))
        .route("/{session_id}/ops", post().to(edit::apply_op))
        .route("/{session_id}/move", post().to(edit::apply_move))
        .route("/{session_id}/commit", post().to(commit::process))
        .route("/{session_id}/exit", get().to(exit::check))
        .route("/{session_id}/exit", post().to(exit::resolve))
}

#[cfg(test)]
mod tests {
    use crate::services::test_support::{app_state, intake_template};
    use actix_web::{test, web, App};
    use common::editor::{ExitCheck, ExitResolution};
    use common::model::template::TemplateIssue;
    use common::requests::{EditResponse, ExitCheckResponse, ExitRequest, SessionStatus};
    use serde_json::json;

    #[actix_web::test]
    async fn build_and_commit_a_template() {
        let state = app_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(crate::services::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/sessions")
            .set_json(json!({}))
            .to_request();
        let opened: SessionStatus = test::call_and_read_body_json(&app, req).await;
        assert!(!opened.valid);
        assert_eq!(opened.issue, Some(TemplateIssue::MissingName));
        assert!(!opened.dirty);
        let session_id = opened.session_id.clone();
        let section_id = opened.template.sections[0].id.clone();

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{session_id}/ops"))
            .set_json(json!({ "op": "renameTemplate", "name": "Intake" }))
            .to_request();
        let renamed: EditResponse = test::call_and_read_body_json(&app, req).await;
        assert!(renamed.created_id.is_none());
        assert_eq!(renamed.status.issue, Some(TemplateIssue::NoFields));

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{session_id}/ops"))
            .set_json(json!({
                "op": "addField",
                "sectionId": section_id,
                "spec": { "type": "text", "label": "Name" }
            }))
            .to_request();
        let added: EditResponse = test::call_and_read_body_json(&app, req).await;
        assert!(added.created_id.is_some());
        assert!(added.status.valid);
        assert!(added.status.dirty);

        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{session_id}/exit"))
            .to_request();
        let check: ExitCheckResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(check.exit, ExitCheck::ConfirmationRequired);

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{session_id}/commit"))
            .to_request();
        let committed: SessionStatus = test::call_and_read_body_json(&app, req).await;
        assert!(!committed.dirty);
        assert_eq!(state.forms.read().await.templates().len(), 1);

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{session_id}/exit"))
            .set_json(ExitRequest { resolution: ExitResolution::Discard })
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
        assert!(state.sessions.read().await.is_empty());
    }

    #[actix_web::test]
    async fn invalid_commit_and_bad_ops_are_refused() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .configure(crate::services::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/sessions")
            .set_json(json!({}))
            .to_request();
        let opened: SessionStatus = test::call_and_read_body_json(&app, req).await;
        let session_id = opened.session_id;
        let section_id = opened.template.sections[0].id.clone();

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{session_id}/commit"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 422);

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{session_id}/ops"))
            .set_json(json!({
                "op": "addField",
                "sectionId": section_id,
                "spec": { "type": "enum", "label": "Colour" }
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        let req = test::TestRequest::get()
            .uri("/api/sessions/missing")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }

    #[actix_web::test]
    async fn edit_session_over_saved_template() {
        let state = app_state();
        let template = intake_template();
        state
            .forms
            .write()
            .await
            .upsert_template(template.clone())
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(crate::services::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/sessions")
            .set_json(json!({ "templateId": template.id }))
            .to_request();
        let opened: SessionStatus = test::call_and_read_body_json(&app, req).await;
        assert_eq!(opened.template, template);
        assert!(opened.valid);
        assert!(!opened.dirty);

        let section_id = &template.sections[0].id;
        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/ops", opened.session_id))
            .set_json(json!({
                "op": "addField",
                "sectionId": section_id,
                "spec": { "type": "boolean", "label": "Subscribe" }
            }))
            .to_request();
        let added: EditResponse = test::call_and_read_body_json(&app, req).await;
        let new_field = added.created_id.unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/move", opened.session_id))
            .set_json(json!({
                "source": { "group": section_id, "index": 1 },
                "destination": { "group": section_id, "index": 0 }
            }))
            .to_request();
        let moved: SessionStatus = test::call_and_read_body_json(&app, req).await;
        assert_eq!(moved.template.sections[0].fields[0].id, new_field);

        // Cancel keeps the session; the saved template is untouched.
        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/exit", opened.session_id))
            .set_json(json!({ "resolution": "cancel" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
        assert_eq!(state.sessions.read().await.len(), 1);
        assert_eq!(
            state.forms.read().await.templates().get(&template.id),
            Some(&template)
        );

        let req = test::TestRequest::post()
            .uri("/api/sessions")
            .set_json(json!({ "templateId": "missing" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }

    #[actix_web::test]
    async fn delete_and_clean_exit_check_close_sessions() {
        let state = app_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(crate::services::configure),
        )
        .await;

        let mut ids = Vec::new();
        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/sessions")
                .set_json(json!({}))
                .to_request();
            let opened: SessionStatus = test::call_and_read_body_json(&app, req).await;
            ids.push(opened.session_id);
        }
        assert_eq!(state.sessions.read().await.len(), 2);

        // Dirty sessions can still be closed outright.
        let req = test::TestRequest::post()
            .uri(&format!("/api/sessions/{}/ops", ids[0]))
            .set_json(json!({ "op": "renameTemplate", "name": "Draft" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
        let req = test::TestRequest::delete()
            .uri(&format!("/api/sessions/{}", ids[0]))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
        assert_eq!(state.sessions.read().await.len(), 1);

        let req = test::TestRequest::get()
            .uri(&format!("/api/sessions/{}/exit", ids[1]))
            .to_request();
        let check: ExitCheckResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(check.exit, ExitCheck::CleanExit);
        assert!(state.sessions.read().await.is_empty());

        let req = test::TestRequest::delete()
            .uri(&format!("/api/sessions/{}", ids[1]))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }
}

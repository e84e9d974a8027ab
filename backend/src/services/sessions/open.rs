use crate::session_controller::state::{AppState, OpenSession};
use actix_web::{web, HttpResponse, Responder};
use common::requests::{OpenSessionRequest, SessionStatus};
use log::info;
use uuid::Uuid;

/// Actix web handler for `POST /api/sessions`.
///
/// Opens a session on a blank template, or on a copy of the saved template
/// named by `templateId`.
///
/// # Returns
/// - `200 OK` with the new `SessionStatus`.
/// - `404 Not Found` if `templateId` names no saved template.
pub async fn process(
    payload: web::Json<OpenSessionRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let session = {
        let forms = state.forms.read().await;
        match &payload.template_id {
            Some(template_id) => match forms.begin_edit(template_id) {
                Some(session) => session,
                None => return HttpResponse::NotFound().body("Template not found"),
            },
            None => forms.begin_new_template(),
        }
    };

    let session_id = Uuid::new_v4().to_string();
    let status = SessionStatus::of(session_id.clone(), &session);
    state
        .sessions
        .write()
        .await
        .insert(session_id.clone(), OpenSession::new(session));
    info!("Opened edit session {} on template {}", session_id, status.template.id);

    HttpResponse::Ok().json(status)
}

use crate::services::responses::{form_error, session_not_found};
use crate::session_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::SessionStatus;

/// Actix web handler for `POST /api/sessions/{session_id}/commit`.
///
/// # Returns
/// - `200 OK` with the post-commit `SessionStatus` (no longer dirty).
/// - `422`, `409` or `503` when the save is refused; see `responses::form_error`.
///   The session and its unsaved edits are kept in every case.
pub async fn process(session_id: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let mut sessions = state.sessions.write().await;
    let Some(session) = sessions.get_mut(session_id.as_str()).map(|open| open.touch()) else {
        return session_not_found();
    };

    let mut forms = state.forms.write().await;
    match forms.commit(session) {
        Ok(()) => HttpResponse::Ok().json(SessionStatus::of(session_id.as_str(), session)),
        Err(e) => form_error(&e),
    }
}

use crate::services::responses::session_not_found;
use crate::session_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::SessionStatus;

/// Actix web handler for `GET /api/sessions/{session_id}`.
pub async fn process(session_id: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let mut sessions = state.sessions.write().await;
    match sessions.get_mut(session_id.as_str()) {
        Some(open) => HttpResponse::Ok().json(SessionStatus::of(session_id.as_str(), open.touch())),
        None => session_not_found(),
    }
}

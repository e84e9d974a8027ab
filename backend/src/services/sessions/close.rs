use crate::services::responses::session_not_found;
use crate::session_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use log::info;

/// Actix web handler for `DELETE /api/sessions/{session_id}`.
///
/// Closes the session without saving, whether or not it is dirty.
pub async fn process(session_id: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    match state.sessions.write().await.remove(session_id.as_str()) {
        Some(open) => {
            info!(
                "Closed edit session {} (dirty: {})",
                session_id,
                open.session.is_dirty()
            );
            HttpResponse::Ok().body("Session closed")
        }
        None => session_not_found(),
    }
}

//! # Session Edit Service
//!
//! Applies builder actions to an open session. Commands that name a section or
//! field the session does not have are no-ops, so the reply is always the
//! current status; only an incomplete field spec is refused.

use crate::services::responses::session_not_found;
use crate::session_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::editor::{EditOp, MoveEvent};
use common::requests::{EditResponse, SessionStatus};
use log::{debug, warn};

/// Actix web handler for `POST /api/sessions/{session_id}/ops`.
///
/// # Returns
/// - `200 OK` with an `EditResponse`; `createdId` is set by `addSection` and
///   by an `addField` that found its section.
/// - `400 Bad Request` if an added field's spec is incomplete.
/// - `404 Not Found` if the session does not exist.
pub async fn apply_op(
    session_id: web::Path<String>,
    payload: web::Json<EditOp>,
    state: web::Data<AppState>,
) -> impl Responder {
    let mut sessions = state.sessions.write().await;
    let Some(session) = sessions.get_mut(session_id.as_str()).map(|open| open.touch()) else {
        return session_not_found();
    };

    let op = payload.into_inner();
    debug!("Session {}: {:?}", session_id, op);
    match session.apply(op) {
        Ok(created_id) => HttpResponse::Ok().json(EditResponse {
            created_id,
            status: SessionStatus::of(session_id.as_str(), session),
        }),
        Err(e) => {
            warn!("Session {}: refused edit: {}", session_id, e);
            HttpResponse::BadRequest().body(e.to_string())
        }
    }
}

/// Actix web handler for `POST /api/sessions/{session_id}/move`.
///
/// Drops outside any group, and moves between different sections, leave the
/// template as it was.
pub async fn apply_move(
    session_id: web::Path<String>,
    payload: web::Json<MoveEvent>,
    state: web::Data<AppState>,
) -> impl Responder {
    let mut sessions = state.sessions.write().await;
    match sessions.get_mut(session_id.as_str()).map(|open| open.touch()) {
        Some(session) => {
            session.handle_move(&payload);
            HttpResponse::Ok().json(SessionStatus::of(session_id.as_str(), session))
        }
        None => session_not_found(),
    }
}

//! # Session Exit Service
//!
//! The confirm-on-exit flow. A client first asks whether leaving needs
//! confirmation. A clean session is closed by that check, since the client
//! may leave straight away. Otherwise it posts the user's answer: `discard`
//! and a successful `saveThenExit` close the session; `cancel` and a failed
//! save keep it open.

use crate::services::responses::{form_error, session_not_found};
use crate::session_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::editor::{ExitCheck, ExitOutcome};
use common::requests::{ExitCheckResponse, ExitRequest, SessionStatus};
use log::info;

/// Actix web handler for `GET /api/sessions/{session_id}/exit`.
///
/// Answers `cleanExit` or `confirmationRequired`; on `cleanExit` the session
/// is closed.
pub async fn check(session_id: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let mut sessions = state.sessions.write().await;
    let Some(session) = sessions.get_mut(session_id.as_str()).map(|open| open.touch()) else {
        return session_not_found();
    };

    let exit = session.request_exit();
    if exit == ExitCheck::CleanExit {
        sessions.remove(session_id.as_str());
        info!("Closed clean edit session {}", session_id);
    }
    HttpResponse::Ok().json(ExitCheckResponse { exit })
}

/// Actix web handler for `POST /api/sessions/{session_id}/exit`.
///
/// # Returns
/// - `200 OK` with body "Session closed" when the session leaves.
/// - `200 OK` with the current `SessionStatus` when it stays.
/// - The `form_error` mapping if `saveThenExit` could not save.
pub async fn resolve(
    session_id: web::Path<String>,
    payload: web::Json<ExitRequest>,
    state: web::Data<AppState>,
) -> impl Responder {
    let mut sessions = state.sessions.write().await;
    let Some(session) = sessions.get_mut(session_id.as_str()).map(|open| open.touch()) else {
        return session_not_found();
    };

    let outcome = {
        let mut forms = state.forms.write().await;
        forms.resolve_exit(session, payload.resolution)
    };

    match outcome {
        Ok(ExitOutcome::Leave) => {
            sessions.remove(session_id.as_str());
            info!("Closed edit session {}", session_id);
            HttpResponse::Ok().body("Session closed")
        }
        Ok(ExitOutcome::Stay) => {
            HttpResponse::Ok().json(SessionStatus::of(session_id.as_str(), session))
        }
        Err(e) => form_error(&e),
    }
}

use crate::session_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::submission::SubmissionData;
use common::SubmitOutcome;
use log::error;

/// Actix web handler for `POST /api/submissions/{template_id}`.
///
/// # Returns
/// - `201 Created` with the stored `Submission`.
/// - `422 Unprocessable Entity` with a JSON object mapping each failing field
///   id to its message, in template order. Nothing is stored.
/// - `404 Not Found` if the template does not exist.
/// - `503 Service Unavailable` if the submission could not be written.
pub async fn process(
    template_id: web::Path<String>,
    payload: web::Json<SubmissionData>,
    state: web::Data<AppState>,
) -> impl Responder {
    let mut forms = state.forms.write().await;
    match forms.submit(&template_id, payload.into_inner()) {
        Ok(SubmitOutcome::Accepted(submission)) => HttpResponse::Created().json(submission),
        Ok(SubmitOutcome::Rejected(errors)) => HttpResponse::UnprocessableEntity().json(errors),
        Ok(SubmitOutcome::UnknownTemplate) => HttpResponse::NotFound().body("Template not found"),
        Err(e) => {
            error!("Storing submission for {} failed: {}", template_id, e);
            HttpResponse::ServiceUnavailable().body(format!("Error saving submission: {}", e))
        }
    }
}

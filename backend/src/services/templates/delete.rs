use crate::session_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use log::error;

/// Actix web handler for `DELETE /api/templates/{template_id}`.
///
/// # Returns
/// - `200 OK` once the template and its submissions are gone.
/// - `404 Not Found` if there was no such template.
/// - `503 Service Unavailable` if the deletion could not be written.
pub async fn process(template_id: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    match state.forms.write().await.delete_template(&template_id) {
        Ok(true) => HttpResponse::Ok().body("Template deleted"),
        Ok(false) => HttpResponse::NotFound().body("Template not found"),
        Err(e) => {
            error!("Deleting template {} failed: {}", template_id, e);
            HttpResponse::ServiceUnavailable().body(format!("Error deleting template: {}", e))
        }
    }
}

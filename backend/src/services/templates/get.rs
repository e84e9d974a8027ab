//! # Template Retrieval Service
//!
//! Backend logic for `GET /api/templates/{template_id}`: looks the template up
//! in the template repository and returns it as JSON, or `404 Not Found`.

use crate::session_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};

/// Actix web handler for the `GET /api/templates/{template_id}` endpoint.
///
/// # Arguments
/// * `template_id` - The unique identifier of the template, extracted from the URL path.
/// * `state` - The shared `AppState`.
///
/// # Returns
/// - `200 OK` with the `Template` object as a JSON payload on success.
/// - `404 Not Found` if no saved template has that id.
pub async fn process(template_id: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let forms = state.forms.read().await;
    match forms.templates().get(&template_id) {
        Some(template) => HttpResponse::Ok().json(template),
        None => HttpResponse::NotFound().body("Template not found"),
    }
}

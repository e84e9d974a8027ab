//! Mapping from engine errors to HTTP responses.

use actix_web::HttpResponse;
use common::FormError;
use log::error;

/// - `422 Unprocessable Entity`: the template is not valid to save.
/// - `409 Conflict`: the template limit is reached.
/// - `503 Service Unavailable`: the write to storage failed; retrying may work.
pub fn form_error(err: &FormError) -> HttpResponse {
    match err {
        FormError::InvalidTemplate(_) => HttpResponse::UnprocessableEntity().body(err.to_string()),
        FormError::TemplateLimitReached { .. } => HttpResponse::Conflict().body(err.to_string()),
        FormError::Persistence(e) => {
            error!("Persistence failure: {}", e);
            HttpResponse::ServiceUnavailable().body(format!("Error saving: {}", e))
        }
    }
}

pub fn session_not_found() -> HttpResponse {
    HttpResponse::NotFound().body("Session ID not found")
}

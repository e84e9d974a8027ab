use crate::session_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};

/// Actix web handler for `GET /api/submissions/{template_id}`.
///
/// An unknown template yields an empty list, as does a known one with no
/// submissions.
pub async fn process(template_id: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let forms = state.forms.read().await;
    HttpResponse::Ok().json(forms.submissions().list_by_template(&template_id))
}

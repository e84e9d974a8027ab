use crate::session_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};

/// Actix web handler for `GET /api/templates`.
pub async fn process(state: web::Data<AppState>) -> impl Responder {
    let forms = state.forms.read().await;
    HttpResponse::Ok().json(forms.templates().list())
}

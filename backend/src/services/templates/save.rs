use crate::services::responses::form_error;
use crate::session_controller::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::template::Template;
use common::FormError;

pub async fn process(payload: web::Json<Template>, state: web::Data<AppState>) -> impl Responder {
    match save_template(payload.into_inner(), &state).await {
        Ok(id) => HttpResponse::Ok().body(id),
        Err(e) => form_error(&e),
    }
}

/// Upserts a complete template document, refusing one that is not valid to
/// save. Returns the template id.
async fn save_template(template: Template, state: &AppState) -> Result<String, FormError> {
    if let Some(issue) = template.validity_issue() {
        return Err(FormError::InvalidTemplate(issue));
    }

    let id = template.id.clone();
    state.forms.write().await.upsert_template(template)?;
    Ok(id)
}

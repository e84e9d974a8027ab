//! # Submission Service Module
//!
//! Routes under `/api/submissions` for filling in a saved template and reading
//! back what was stored. A submission is only stored when every field passes
//! validation.

mod list;
mod submit;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all submission-related API endpoints.
const API_PATH: &str = "/api/submissions";

/// Configures and returns the Actix `Scope` for all submission-related routes.
///
/// # Registered Routes:
///
/// *   **`POST /{template_id}`** (`submit::process`): validates and stores a
///     submission. The body maps field ids to values.
/// *   **`GET /{template_id}`** (`list::process`): every stored submission for
///     the template, oldest first.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/{template_id}", post().to(submit::process))
        .route("/{template_id}", get().to(list::process))
}

//! # Template Service Module
//!
//! Routes under `/api/templates` for reading and managing saved templates.
//! Editing does not happen here: the builder edits through a session
//! (`/api/sessions`) and the session commit performs the save.
//!
//! ## Sub-modules:
//! - `list`: all saved templates in insertion order.
//! - `get`: a single template by id.
//! - `save`: direct upsert of a complete template document (import).
//! - `delete`: removes a template together with its submissions.

mod delete;
mod get;
mod list;
mod save;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for all template-related routes.
///
/// # Registered Routes:
///
/// *   **`GET /`** (`list::process`): every saved template.
/// *   **`POST /save`** (`save::process`): creates or replaces a template from a
///     complete JSON document. The document must be valid to save; creating a
///     sixth template is refused with `409 Conflict`.
/// *   **`GET /{template_id}`** (`get::process`): one template, `404` if unknown.
/// *   **`DELETE /{template_id}`** (`delete::process`): deletes the template and
///     every submission filled against it.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/save", post().to(save::process))
        .route("/{template_id}", get().to(get::process))
        .route("/{template_id}", delete().to(delete::process))
}

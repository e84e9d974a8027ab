//! HTTP adapter over the form engine.
//!
//! Each sub-module owns one `/api/...` scope and exposes `configure_routes()`
//! returning it, the same way every service registers itself.

pub mod sessions;
pub mod submissions;
pub mod templates;

mod responses;

use actix_web::web;

/// Registers every API scope on an app or test service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(templates::configure_routes())
        .service(sessions::configure_routes())
        .service(submissions::configure_routes());
}

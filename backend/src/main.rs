mod config;
mod services;
mod session_controller;
mod storage;

use crate::config::ServerConfig;
use crate::session_controller::state::{start_session_reaper, AppState};
use crate::storage::SqliteBlobStore;
use actix_web::{web, App, HttpServer};
use common::FormsState;
use env_logger::Env;
use log::info;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = ServerConfig::from_env();
    let url = config.url();

    let store = SqliteBlobStore::open(&config.database_path).map_err(std::io::Error::other)?;
    info!("Using database {}", config.database_path.display());

    // Templates and submissions are loaded once; every write goes through.
    let app_state = AppState::new(FormsState::open(Arc::new(store)));
    let json_limit = config.json_limit;

    // Close edit sessions abandoned by their clients
    let reaper_state = app_state.clone();
    let session_idle = config.session_idle;
    tokio::spawn(async move {
        start_session_reaper(reaper_state, session_idle).await;
    });

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(app_state.clone()))
            .configure(services::configure)
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}

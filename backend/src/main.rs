mod cache;
mod config;
mod error;
mod remote;
mod services;
mod session;
#[cfg(test)]
mod test_support;

use crate::cache::FormsCache;
use crate::config::AppConfig;
use crate::remote::HttpFormsApi;
use crate::session::{Session, SqliteSessionStore};
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io::Error::other)?;
    let store = SqliteSessionStore::open(&config.session_db).map_err(io::Error::other)?;
    let session = Session::new(Arc::new(store));
    let api = HttpFormsApi::new(config.api_base_url.clone(), config.http_timeout)
        .map_err(io::Error::other)?;
    let cache = web::Data::new(FormsCache::new(Arc::new(api), Arc::new(session.clone())));
    let session = web::Data::new(session);
    let bind = config.bind;
    let config = web::Data::new(config);

    info!(
        "Server running at http://{} (forms API: {})",
        bind, config.api_base_url
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(config.clone())
            .app_data(session.clone())
            .app_data(cache.clone())
            .service(services::session::configure_routes())
            .service(services::forms::configure_routes())
            .service(services::dashboard::configure_routes())
            .service(services::exports::configure_routes())
    })
    .bind(bind)?
    .run()
    .await
}

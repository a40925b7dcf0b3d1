//! HTTP handlers and route configuration.

mod blogs;
mod health;
mod openapi;


use actix_web::web;

use crate::middleware::error::{json_config, path_config};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .route("/health", web::get().to(health::health_check))
        .route("/openapi.json", web::get().to(openapi::openapi_json))
        .service(
            web::scope("/blogs")
                .route("", web::post().to(blogs::create_blog))
                .route("/{id}", web::get().to(blogs::get_blog)),
        );
}

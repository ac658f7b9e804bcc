//! HTTP handlers and route configuration.

mod auth;
mod blog;
mod health;


use actix_web::{Route, http::Method, web};

use crate::middleware::error::AppError;

/// CORS preflight answer for a resource.
fn preflight() -> Route {
    web::method(Method::OPTIONS).to(blog::preflight)
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid request body: {err}")).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid query string: {err}")).into()
    }))
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Blog resource - single path multiplexed by method
            .service(
                web::resource("/blog")
                    .route(web::get().to(blog::list_posts))
                    .route(web::post().to(blog::create_post))
                    .route(web::put().to(blog::update_post))
                    .route(web::delete().to(blog::delete_post))
                    .route(preflight())
                    .default_service(web::to(blog::method_not_allowed)),
            )
            // Admin session routes
            .service(
                web::scope("/auth")
                    .service(
                        web::resource("/login")
                            .route(web::post().to(auth::login))
                            .route(preflight()),
                    )
                    .service(
                        web::resource("/session")
                            .route(web::get().to(auth::session))
                            .route(preflight()),
                    ),
            ),
    );
}

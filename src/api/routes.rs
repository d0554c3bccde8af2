use actix_web::web;

use super::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/patients", web::get().to(handlers::list_patients))
            .route("/dashboard", web::get().to(handlers::dashboard_view))
            .route("/selection", web::put().to(handlers::update_selection))
            .route("/interval", web::put().to(handlers::update_interval)),
    )
    .route("/health", web::get().to(handlers::health));
}

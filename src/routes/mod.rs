use actix_web::web;

use crate::handlers::{
    self,
    shared::{not_found, path_error_handler, query_error_handler},
};

pub mod locations;
pub mod session;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(handlers::hello)
        .service(handlers::health)
        .service(
            web::scope("/api/v1")
                .configure(users::configure)
                .configure(locations::configure)
                .configure(session::configure),
        )
        .default_service(web::to(not_found));
}

use crate::handlers::{session, shared::wrong_request};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/login")
            .route(web::post().to(session::login))
            .default_service(web::to(wrong_request)),
    )
    .service(
        web::resource("/memories")
            .route(web::get().to(session::memories))
            .route(web::post().to(session::memories))
            .route(web::patch().to(session::memories))
            .route(web::delete().to(session::memories))
            .default_service(web::to(wrong_request)),
    );
}

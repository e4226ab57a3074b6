use crate::handlers::{shared::wrong_request, users};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(
                web::resource("")
                    .route(web::get().to(users::get_users))
                    .route(web::post().to(users::create_user))
                    .default_service(web::to(wrong_request)),
            )
            .service(
                web::resource("/{user_id}")
                    .route(web::patch().to(users::update_user))
                    .route(web::delete().to(users::delete_user))
                    .default_service(web::to(wrong_request)),
            ),
    );
}

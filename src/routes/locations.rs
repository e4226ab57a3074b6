use crate::handlers::{locations, shared::wrong_request};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/aoi/{user_id}")
            .route(web::get().to(locations::get_area_of_interest))
            .default_service(web::to(wrong_request)),
    )
    .service(
        web::scope("/locations")
            .service(
                web::resource("")
                    .route(web::get().to(locations::get_locations))
                    .route(web::post().to(locations::create_location))
                    .default_service(web::to(wrong_request)),
            )
            .service(
                web::resource("/{user_id}/{place_title}")
                    .route(web::patch().to(locations::update_location))
                    .route(web::delete().to(locations::delete_location))
                    .default_service(web::to(wrong_request)),
            ),
    );
}

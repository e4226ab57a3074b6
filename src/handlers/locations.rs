use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::{
    database::models::{LocationChanges, LocationInput, HOMEBASE},
    error::AppError,
    handlers::shared::{
        empty_string_as_none, finite_coordinate, optional_finite_coordinate, require_non_empty,
        MessageResponse,
    },
    services::area_of_interest,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateLocationQuery {
    /// Owning user.
    pub id: i64,
    pub place_title: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(deserialize_with = "finite_coordinate")]
    pub latitude: f64,
    #[serde(deserialize_with = "finite_coordinate")]
    pub longitude: f64,
}

/// Fields a PATCH may touch; the owner cannot be reassigned.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateLocationQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub place_title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub zip_code: Option<String>,
    #[serde(default, deserialize_with = "optional_finite_coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "optional_finite_coordinate")]
    pub longitude: Option<f64>,
}

impl From<UpdateLocationQuery> for LocationChanges {
    fn from(query: UpdateLocationQuery) -> Self {
        Self {
            place_title: query.place_title,
            address: query.address,
            city: query.city,
            state: query.state,
            zip_code: query.zip_code,
            latitude: query.latitude,
            longitude: query.longitude,
        }
    }
}

fn validate_place_title(place_title: &str) -> Result<(), AppError> {
    require_non_empty("place_title", place_title)?;
    if place_title == HOMEBASE {
        return Err(AppError::BadRequest(format!(
            "'{}' is reserved and cannot be used as a place title",
            HOMEBASE
        )));
    }
    Ok(())
}

/// GET /aoi/{user_id}
pub async fn get_area_of_interest(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let aoi =
        area_of_interest::for_user(state.users.as_ref(), state.locations.as_ref(), path.into_inner())
            .await?;

    Ok(HttpResponse::Ok().json(aoi))
}

pub async fn get_locations(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let overview =
        area_of_interest::overview(state.users.as_ref(), state.locations.as_ref()).await?;

    Ok(HttpResponse::Ok().json(overview))
}

pub async fn create_location(
    state: web::Data<AppState>,
    query: web::Query<CreateLocationQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    validate_place_title(&query.place_title)?;

    state
        .locations
        .create(LocationInput {
            user_id: query.id,
            place_title: query.place_title,
            address: query.address,
            city: query.city,
            state: query.state,
            zip_code: query.zip_code,
            latitude: query.latitude,
            longitude: query.longitude,
        })
        .await?;

    Ok(MessageResponse::ok())
}

pub async fn update_location(
    state: web::Data<AppState>,
    path: web::Path<(i64, String)>,
    query: web::Query<UpdateLocationQuery>,
) -> Result<HttpResponse, AppError> {
    let (user_id, place_title) = path.into_inner();
    let changes = LocationChanges::from(query.into_inner());

    if changes.is_empty() {
        return Err(AppError::BadRequest("no fields to update".to_string()));
    }
    if let Some(new_title) = &changes.place_title {
        validate_place_title(new_title)?;
    }

    state
        .locations
        .update(user_id, &place_title, changes)
        .await?
        .ok_or_else(|| {
            log::warn!("Location '{}' of user {} not found", place_title, user_id);
            AppError::NotFound(format!("location '{}' of user {}", place_title, user_id))
        })?;

    Ok(MessageResponse::updated())
}

pub async fn delete_location(
    state: web::Data<AppState>,
    path: web::Path<(i64, String)>,
) -> Result<HttpResponse, AppError> {
    let (user_id, place_title) = path.into_inner();

    if !state.locations.delete(user_id, &place_title).await? {
        log::warn!("Location '{}' of user {} not found", place_title, user_id);
        return Err(AppError::NotFound(format!(
            "location '{}' of user {}",
            place_title, user_id
        )));
    }

    Ok(MessageResponse::deleted())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn homebase_is_reserved() {
        assert!(matches!(
            validate_place_title("Homebase"),
            Err(AppError::BadRequest(_))
        ));
        assert!(validate_place_title("").is_err());
        assert!(validate_place_title("Home").is_ok());
    }

    #[test]
    fn patch_rejects_owner_reassignment() {
        let parsed = serde_urlencoded::from_str::<UpdateLocationQuery>("user_id=9&city=Z");
        assert!(parsed.is_err());

        let parsed = serde_urlencoded::from_str::<UpdateLocationQuery>("city=Z").unwrap();
        assert_eq!(parsed.city.as_deref(), Some("Z"));
    }

    #[test]
    fn create_requires_coordinates() {
        let parsed = serde_urlencoded::from_str::<CreateLocationQuery>(
            "id=1&place_title=Home&address=1+Main+St&city=X&state=Y&zip_code=00000",
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn create_rejects_non_finite_coordinates() {
        let parsed = serde_urlencoded::from_str::<CreateLocationQuery>(
            "id=1&place_title=Home&address=1+Main+St&city=X&state=Y&zip_code=00000&latitude=NaN&longitude=1",
        );
        assert!(parsed.is_err());

        let parsed = serde_urlencoded::from_str::<UpdateLocationQuery>("longitude=inf");
        assert!(parsed.is_err());
    }
}

use std::collections::BTreeMap;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::{
    database::models::{UserChanges, UserInput},
    error::AppError,
    handlers::shared::{
        empty_string_as_none, optional_finite_coordinate, require_non_empty, MessageResponse,
    },
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateUserQuery {
    pub display_name: String,
    pub username: String,
    #[serde(default, deserialize_with = "optional_finite_coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "optional_finite_coordinate")]
    pub longitude: Option<f64>,
}

/// Fields a PATCH may touch. Anything else in the query string is rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "optional_finite_coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "optional_finite_coordinate")]
    pub longitude: Option<f64>,
}

impl From<UpdateUserQuery> for UserChanges {
    fn from(query: UpdateUserQuery) -> Self {
        Self {
            display_name: query.display_name,
            username: query.username,
            latitude: query.latitude,
            longitude: query.longitude,
        }
    }
}

pub async fn get_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = state.users.list().await?;

    let listing: BTreeMap<i64, String> = users.iter().map(|u| (u.id, u.label())).collect();

    Ok(HttpResponse::Ok().json(listing))
}

pub async fn create_user(
    state: web::Data<AppState>,
    query: web::Query<CreateUserQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    require_non_empty("display_name", &query.display_name)?;
    require_non_empty("username", &query.username)?;

    state
        .users
        .create(UserInput {
            display_name: query.display_name,
            username: query.username,
            latitude: query.latitude,
            longitude: query.longitude,
        })
        .await?;

    Ok(MessageResponse::ok())
}

pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<UpdateUserQuery>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let changes = UserChanges::from(query.into_inner());

    if changes.is_empty() {
        return Err(AppError::BadRequest("no fields to update".to_string()));
    }
    if let Some(display_name) = &changes.display_name {
        require_non_empty("display_name", display_name)?;
    }
    if let Some(username) = &changes.username {
        require_non_empty("username", username)?;
    }

    state.users.update(user_id, changes).await?.ok_or_else(|| {
        log::warn!("User {} not found", user_id);
        AppError::NotFound(format!("user {}", user_id))
    })?;

    Ok(MessageResponse::updated())
}

pub async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    if !state.users.delete(user_id).await? {
        log::warn!("User {} not found", user_id);
        return Err(AppError::NotFound(format!("user {}", user_id)));
    }

    Ok(MessageResponse::deleted())
}

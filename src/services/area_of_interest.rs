use std::collections::HashMap;

use crate::database::models::{AreaOfInterest, Location, LocationsOverview};
use crate::database::repositories::{LocationStore, UserStore};
use crate::error::AppError;

/// Homebase plus every named location of one user.
pub async fn for_user(
    users: &dyn UserStore,
    locations: &dyn LocationStore,
    user_id: i64,
) -> Result<AreaOfInterest, AppError> {
    let user = users.find_by_id(user_id).await?.ok_or_else(|| {
        log::warn!("User {} not found", user_id);
        AppError::NotFound(format!("user {}", user_id))
    })?;

    let owned = locations.list_for_user(user.id).await?;

    Ok(AreaOfInterest::new(user.homebase(), &owned))
}

/// Area of interest of every user, keyed by `"<username> (id: <id>)"`.
/// Built from two list queries rather than one lookup per user.
pub async fn overview(
    users: &dyn UserStore,
    locations: &dyn LocationStore,
) -> Result<LocationsOverview, AppError> {
    let all_users = users.list().await?;

    let mut by_owner: HashMap<i64, Vec<Location>> = HashMap::new();
    for location in locations.list().await? {
        by_owner.entry(location.user_id).or_default().push(location);
    }

    let entries = all_users
        .iter()
        .map(|user| {
            let owned = by_owner.remove(&user.id).unwrap_or_default();
            (user.overview_key(), AreaOfInterest::new(user.homebase(), &owned))
        })
        .collect();

    Ok(LocationsOverview(entries))
}

use serde::{Deserialize, Serialize};

use super::location::Coordinates;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub display_name: String,
    pub username: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl User {
    /// `"<display_name> (@<username>)"`, as listed by the users endpoint.
    pub fn label(&self) -> String {
        format!("{} (@{})", self.display_name, self.username)
    }

    /// `"<username> (id: <id>)"`, the key used in the locations overview.
    pub fn overview_key(&self) -> String {
        format!("{} (id: {})", self.username, self.id)
    }

    /// The user's own coordinate pair; either half may be unset.
    pub fn homebase(&self) -> Coordinates {
        Coordinates(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserInput {
    pub display_name: String,
    pub username: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Mutable user fields. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.username.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }

    pub fn apply(self, user: &mut User) {
        if let Some(display_name) = self.display_name {
            user.display_name = display_name;
        }
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(latitude) = self.latitude {
            user.latitude = Some(latitude);
        }
        if let Some(longitude) = self.longitude {
            user.longitude = Some(longitude);
        }
    }
}

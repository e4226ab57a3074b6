use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Key of the user's own coordinates in an area of interest. No location
/// may carry this title.
pub const HOMEBASE: &str = "Homebase";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    pub id: i64,
    pub user_id: i64,
    pub place_title: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates(Some(self.latitude), Some(self.longitude))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationInput {
    pub user_id: i64,
    pub place_title: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Mutable location fields. The owner and id are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationChanges {
    pub place_title: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationChanges {
    pub fn is_empty(&self) -> bool {
        self.place_title.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip_code.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }

    pub fn apply(self, location: &mut Location) {
        if let Some(place_title) = self.place_title {
            location.place_title = place_title;
        }
        if let Some(address) = self.address {
            location.address = address;
        }
        if let Some(city) = self.city {
            location.city = city;
        }
        if let Some(state) = self.state {
            location.state = state;
        }
        if let Some(zip_code) = self.zip_code {
            location.zip_code = zip_code;
        }
        if let Some(latitude) = self.latitude {
            location.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            location.longitude = longitude;
        }
    }
}

/// `[latitude, longitude]`, each `null` when unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates(pub Option<f64>, pub Option<f64>);

/// A user's homebase followed by every place they own, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaOfInterest {
    pub homebase: Coordinates,
    pub places: Vec<(String, Coordinates)>,
}

impl AreaOfInterest {
    pub fn new(homebase: Coordinates, locations: &[Location]) -> Self {
        Self {
            homebase,
            places: locations
                .iter()
                .map(|l| (l.place_title.clone(), l.coordinates()))
                .collect(),
        }
    }
}

impl Serialize for AreaOfInterest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.places.len() + 1))?;
        map.serialize_entry(HOMEBASE, &self.homebase)?;
        for (title, coords) in &self.places {
            map.serialize_entry(title, coords)?;
        }
        map.end()
    }
}

/// Every user's area of interest keyed by `"<username> (id: <id>)"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationsOverview(pub Vec<(String, AreaOfInterest)>);

impl Serialize for LocationsOverview {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, aoi) in &self.0 {
            map.serialize_entry(key, aoi)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn place(id: i64, title: &str, lat: f64, lon: f64) -> Location {
        Location {
            id,
            user_id: 1,
            place_title: title.to_string(),
            address: "1 Main St".to_string(),
            city: "X".to_string(),
            state: "Y".to_string(),
            zip_code: "00000".to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn unset_homebase_serialises_as_nulls() {
        let aoi = AreaOfInterest::new(Coordinates(None, None), &[]);
        let json = serde_json::to_string(&aoi).unwrap();
        assert_eq!(json, r#"{"Homebase":[null,null]}"#);
    }

    #[test]
    fn homebase_comes_first_then_places_in_order() {
        let aoi = AreaOfInterest::new(
            Coordinates(Some(37.0), Some(-122.0)),
            &[place(2, "Work", 1.5, 2.5), place(5, "Gym", -3.25, 4.0)],
        );
        let json = serde_json::to_string(&aoi).unwrap();
        assert_eq!(
            json,
            r#"{"Homebase":[37.0,-122.0],"Work":[1.5,2.5],"Gym":[-3.25,4.0]}"#
        );
    }

    #[test]
    fn apply_keeps_owner() {
        let mut location = place(3, "Work", 0.0, 0.0);
        LocationChanges {
            city: Some("Z".to_string()),
            latitude: Some(9.0),
            ..Default::default()
        }
        .apply(&mut location);

        assert_eq!(location.user_id, 1);
        assert_eq!(location.city, "Z");
        assert_eq!(location.latitude, 9.0);
        assert_eq!(location.place_title, "Work");
    }
}

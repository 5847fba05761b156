use serde::{Deserialize, Serialize};

use super::{EntityKind, Model, Station};

/// A bus line: a named, ordered sequence of stations.
///
/// `stations` is output only. Request bodies can't change which stations a
/// route serves, so the field is skipped on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default, skip_deserializing)]
    pub stations: Vec<Station>,
}

impl Route {
    pub fn new(id: i64, name: impl Into<String>, stations: Vec<Station>) -> Self {
        Self {
            id,
            name: name.into(),
            stations,
        }
    }
}

impl Model for Route {
    const KIND: EntityKind = EntityKind::Route;

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_without_stations_serializes_empty_array() {
        let route = Route::new(10, "Line 5", Vec::new());
        let json = serde_json::to_value(&route).unwrap();

        assert_eq!(json["stations"], serde_json::json!([]));
    }

    #[test]
    fn test_route_serializes_stations_in_order() {
        let route = Route::new(
            10,
            "Line 5",
            vec![Station::new(2, "North"), Station::new(1, "Central")],
        );
        let json = serde_json::to_value(&route).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 10,
                "name": "Line 5",
                "stations": [
                    { "id": 2, "name": "North" },
                    { "id": 1, "name": "Central" }
                ]
            })
        );
    }

    #[test]
    fn test_route_body_ignores_stations() {
        let route: Route = serde_json::from_str(
            r#"{"id":3,"name":"Line 7","stations":[{"id":1,"name":"Central"}]}"#,
        )
        .unwrap();

        assert_eq!(route.id, 3);
        assert_eq!(route.name, "Line 7");
        assert!(route.stations.is_empty());
    }

    #[test]
    fn test_model_accessors() {
        let mut route = Route::default();
        route.set_id(42);
        route.set_name("Night Bus".to_string());

        assert_eq!(route.id(), 42);
        assert_eq!(route.name(), "Night Bus");
        assert_eq!(Route::KIND, EntityKind::Route);
    }
}

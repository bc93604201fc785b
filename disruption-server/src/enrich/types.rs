//! Route-planning API DTOs.
//!
//! These types map the parts of the route-planning response this core
//! reads and re-emits. They use `Option` liberally because the upstream
//! omits fields freely; validation failure at this boundary is a typed
//! JSON error, never a silent hole.

use serde::{Deserialize, Serialize};

/// A multi-leg route result.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteResponse {
    /// Route alternatives, best first.
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// One route alternative.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Route {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The legs of this route, in travel order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// One leg of a route.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Leg type (e.g. "transit", "pedestrian").
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    pub departure: TimeAndPlace,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival: Option<TimeAndPlace>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<Transport>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

/// A departure or arrival: when and where.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TimeAndPlace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    pub place: Place,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<i64>,
}

/// A place on a route.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Place type; enrichment only touches `"station"` places.
    #[serde(rename = "type")]
    pub kind: String,

    /// Station identifier attached by enrichment. Absent means the place
    /// was never looked up; `null` means it was looked up and is unknown
    /// to the directory.
    #[serde(
        rename = "evaNr",
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_with::rust::double_option"
    )]
    pub station_id: Option<Option<String>>,
}

/// Transit details of a leg.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headsign: Option<String>,
}

/// Duration and length of a leg.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Summary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "routes": [
            {
                "id": "route-1",
                "sections": [
                    {
                        "id": "section-1",
                        "type": "transit",
                        "departure": {
                            "time": "2023-06-24T13:40:00+02:00",
                            "place": { "name": "Koeln Hbf", "type": "station" }
                        },
                        "arrival": {
                            "time": "2023-06-24T14:00:00+02:00",
                            "place": { "name": "Koeln Messe/Deutz Bf", "type": "station" }
                        },
                        "transport": { "mode": "cityTrain", "name": "S11" }
                    },
                    {
                        "type": "pedestrian",
                        "departure": {
                            "place": { "type": "address", "location": { "lat": 50.94, "lng": 6.96 } }
                        }
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn deserializes_sample_response() {
        let response: RouteResponse = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(response.routes.len(), 1);
        let sections = &response.routes[0].sections;
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].departure.place.kind, "station");
        assert_eq!(sections[0].departure.place.name.as_deref(), Some("Koeln Hbf"));
        assert_eq!(sections[1].departure.place.kind, "address");
    }

    #[test]
    fn station_id_tristate() {
        // Absent: never looked up
        let place: Place = serde_json::from_str(r#"{ "type": "station" }"#).unwrap();
        assert_eq!(place.station_id, None);

        // Null: looked up, unknown
        let place: Place =
            serde_json::from_str(r#"{ "type": "station", "evaNr": null }"#).unwrap();
        assert_eq!(place.station_id, Some(None));

        // Present: resolved
        let place: Place =
            serde_json::from_str(r#"{ "type": "station", "evaNr": "8000207" }"#).unwrap();
        assert_eq!(place.station_id, Some(Some("8000207".to_string())));
    }

    #[test]
    fn station_id_serialization_keeps_the_tristate() {
        let mut place = Place {
            id: None,
            name: Some("Koeln Hbf".to_string()),
            kind: "station".to_string(),
            station_id: None,
        };

        // Never looked up: the field is omitted entirely
        let json = serde_json::to_value(&place).unwrap();
        assert!(json.get("evaNr").is_none());

        // Unknown: the field is an explicit null
        place.station_id = Some(None);
        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json.get("evaNr"), Some(&serde_json::Value::Null));

        // Resolved: the field carries the id
        place.station_id = Some(Some("8000207".to_string()));
        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json["evaNr"], "8000207");
    }
}

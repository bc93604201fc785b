//! Route enrichment against the station lookup.

use futures::future::join_all;
use tracing::warn;

use super::lookup::StationLookup;
use super::types::RouteResponse;

/// Derive the directory lookup key for an upstream place name.
///
/// Upstream names carry a trailing "Bf" station abbreviation that the
/// directory does not, so a trailing suffix is stripped before lookup.
pub fn lookup_key(name: &str) -> &str {
    let trimmed = name.trim_end();
    trimmed
        .strip_suffix("Bf")
        .map(str::trim_end)
        .unwrap_or(trimmed)
}

/// Attach station identifiers to a route result.
///
/// Every leg across every route alternative whose departure place is of
/// type `"station"` and carries a name gets its station id set: to the
/// identifier the lookup resolves, or to the explicit unknown marker when
/// the station is outside the directory. Legs are looked up concurrently
/// and the function returns only once every lookup has resolved; a lookup
/// *error* (as opposed to a miss) degrades only its own leg.
pub async fn enrich<L: StationLookup>(mut result: RouteResponse, lookup: &L) -> RouteResponse {
    let mut targets = Vec::new();
    for (route_index, route) in result.routes.iter().enumerate() {
        for (section_index, section) in route.sections.iter().enumerate() {
            let place = &section.departure.place;
            if place.kind != "station" {
                continue;
            }
            let Some(name) = &place.name else {
                continue;
            };
            targets.push((route_index, section_index, lookup_key(name).to_string()));
        }
    }

    let resolved = join_all(targets.iter().map(|(_, _, key)| async move {
        match lookup.lookup(key).await {
            Ok(found) => found.map(|station| station.id.as_str().to_string()),
            Err(e) => {
                warn!(station = %key, error = %e, "station lookup failed");
                None
            }
        }
    }))
    .await;

    for ((route_index, section_index, _), station_id) in targets.into_iter().zip(resolved) {
        result.routes[route_index].sections[section_index]
            .departure
            .place
            .station_id = Some(station_id);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{StationDirectory, StationRecord};
    use crate::enrich::types::{Place, Route, Section, TimeAndPlace};

    fn directory() -> StationDirectory {
        let records = vec![
            StationRecord {
                name: "Koeln Hbf".to_string(),
                zipcode: Some("50667".to_string()),
                numbers: vec![8000207],
            },
            StationRecord {
                name: "Koeln Messe/Deutz".to_string(),
                zipcode: Some("50679".to_string()),
                numbers: vec![8003368],
            },
        ];
        StationDirectory::from_records(records, &["50".to_string()])
    }

    fn section(kind: &str, name: Option<&str>) -> Section {
        Section {
            id: None,
            kind: Some("transit".to_string()),
            departure: TimeAndPlace {
                time: None,
                place: Place {
                    id: None,
                    name: name.map(str::to_string),
                    kind: kind.to_string(),
                    station_id: None,
                },
                delay: None,
            },
            arrival: None,
            transport: None,
            summary: None,
        }
    }

    fn route(sections: Vec<Section>) -> RouteResponse {
        RouteResponse {
            routes: vec![Route {
                id: None,
                sections,
            }],
        }
    }

    fn station_id_of(result: &RouteResponse, section: usize) -> &Option<Option<String>> {
        &result.routes[0].sections[section].departure.place.station_id
    }

    #[test]
    fn lookup_key_strips_trailing_abbreviation() {
        assert_eq!(lookup_key("Koeln Messe/Deutz Bf"), "Koeln Messe/Deutz");
        assert_eq!(lookup_key("Koeln Messe/Deutz"), "Koeln Messe/Deutz");
        assert_eq!(lookup_key("Bergisch Gladbach Bf "), "Bergisch Gladbach");
        // Only a trailing suffix is stripped
        assert_eq!(lookup_key("Bfarrkirchen"), "Bfarrkirchen");
        assert_eq!(lookup_key("Bf"), "");
    }

    #[tokio::test]
    async fn enriches_station_legs_and_leaves_the_rest() {
        let result = route(vec![
            section("station", Some("Koeln Hbf")),
            section("station", Some("Koeln Messe/Deutz Bf")),
            section("address", Some("Domkloster 4")),
        ]);

        let enriched = enrich(result, &directory()).await;

        assert_eq!(
            station_id_of(&enriched, 0),
            &Some(Some("8000207".to_string()))
        );
        assert_eq!(
            station_id_of(&enriched, 1),
            &Some(Some("8003368".to_string()))
        );
        // The address leg was never looked up
        assert_eq!(station_id_of(&enriched, 2), &None);
    }

    #[tokio::test]
    async fn unknown_station_gets_the_explicit_marker() {
        let result = route(vec![
            section("station", Some("Koeln Hbf")),
            section("station", Some("Hamburg Hbf")),
        ]);

        let enriched = enrich(result, &directory()).await;

        assert_eq!(
            station_id_of(&enriched, 0),
            &Some(Some("8000207".to_string()))
        );
        // Outside the region: looked up, explicitly unknown
        assert_eq!(station_id_of(&enriched, 1), &Some(None));
    }

    #[tokio::test]
    async fn station_leg_without_a_name_is_untouched() {
        let result = route(vec![section("station", None)]);
        let enriched = enrich(result, &directory()).await;
        assert_eq!(station_id_of(&enriched, 0), &None);
    }

    #[tokio::test]
    async fn enriches_across_route_alternatives() {
        let result = RouteResponse {
            routes: vec![
                Route {
                    id: None,
                    sections: vec![section("station", Some("Koeln Hbf"))],
                },
                Route {
                    id: None,
                    sections: vec![section("station", Some("Koeln Messe/Deutz"))],
                },
            ],
        };

        let enriched = enrich(result, &directory()).await;

        assert_eq!(
            enriched.routes[0].sections[0].departure.place.station_id,
            Some(Some("8000207".to_string()))
        );
        assert_eq!(
            enriched.routes[1].sections[0].departure.place.station_id,
            Some(Some("8003368".to_string()))
        );
    }

    #[tokio::test]
    async fn empty_result_passes_through() {
        let result = RouteResponse { routes: Vec::new() };
        let enriched = enrich(result, &directory()).await;
        assert!(enriched.routes.is_empty());
    }
}

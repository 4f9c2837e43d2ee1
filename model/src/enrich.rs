use gtfs::{DirectionID, RouteID, RouteIndex};
use serde::{Deserialize, Serialize};

use crate::{FeedEntity, FeedMessage};

/// A vehicle position joined against the static route index
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnrichedVehicle {
    pub route_id: RouteID,
    /// The short name riders know the route by; empty if the route isn't indexed
    pub route_num: String,
    pub headsign_primary: String,
    pub headsign_secondary: String,
    pub label: String,
    pub direction_id: Option<DirectionID>,
    pub latitude: f64,
    pub longitude: f64,
}

/// One record per vehicle, in feed order. Vehicles on unindexed routes or directions just get
/// empty names.
pub fn enrich(feed: &FeedMessage, index: &RouteIndex) -> Vec<EnrichedVehicle> {
    feed.entity.iter().map(|e| enrich_one(e, index)).collect()
}

fn enrich_one(entity: &FeedEntity, index: &RouteIndex) -> EnrichedVehicle {
    let vehicle = &entity.vehicle;
    let route_id = &vehicle.trip.route_id;
    let direction_id = &vehicle.trip.direction_id;

    let route_num = match index.get(route_id) {
        Some(route) => route.route_short_name.clone(),
        None => {
            debug!("Vehicle {} is on unindexed {route_id}", vehicle.vehicle.label);
            String::new()
        }
    };
    let (headsign_primary, headsign_secondary) = direction_id
        .as_ref()
        .and_then(|direction| index.headsigns(route_id, direction))
        .unwrap_or_default();

    EnrichedVehicle {
        route_id: route_id.clone(),
        route_num,
        headsign_primary,
        headsign_secondary,
        label: vehicle.vehicle.label.clone(),
        direction_id: direction_id.clone(),
        latitude: vehicle.position.latitude,
        longitude: vehicle.position.longitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> RouteIndex {
        RouteIndex::load(
            r#"{
                "100223": {"route_short_name": "70", "directions": {
                    "0": {"trip_headsign": ["UW", "Downtown"]},
                    "1": {"trip_headsign": "Downtown"}
                }},
                "100224": {"route_short_name": "45"}
            }"#
            .as_bytes(),
        )
        .unwrap()
    }

    fn vehicle(label: &str, route: serde_json::Value, direction: serde_json::Value) -> serde_json::Value {
        serde_json::json!({"vehicle": {
            "vehicle": {"label": label},
            "trip": {"route_id": route, "direction_id": direction},
            "position": {"latitude": 47.6, "longitude": -122.3}
        }})
    }

    fn enrich_all(entity: Vec<serde_json::Value>) -> Vec<EnrichedVehicle> {
        let feed: FeedMessage = serde_json::from_value(serde_json::json!({ "entity": entity })).unwrap();
        enrich(&feed, &index())
    }

    #[test]
    fn indexed_route_and_direction() {
        let out = enrich_all(vec![vehicle("123", "100223".into(), 0.into())]);
        assert_eq!(
            out,
            vec![EnrichedVehicle {
                route_id: RouteID::from("100223"),
                route_num: "70".to_string(),
                headsign_primary: "UW".to_string(),
                headsign_secondary: "Downtown".to_string(),
                label: "123".to_string(),
                direction_id: Some(DirectionID::from("0")),
                latitude: 47.6,
                longitude: -122.3,
            }]
        );
    }

    #[test]
    fn unindexed_route() {
        let out = enrich_all(vec![vehicle("9", "102576".into(), "1".into())]);
        assert_eq!(out[0].route_num, "");
        assert_eq!(out[0].headsign_primary, "");
        assert_eq!(out[0].headsign_secondary, "");
        assert_eq!(out[0].label, "9");
        assert_eq!(out[0].route_id, RouteID::from("102576"));
        assert_eq!(out[0].direction_id, Some(DirectionID::from("1")));
        assert_eq!((out[0].latitude, out[0].longitude), (47.6, -122.3));
    }

    #[test]
    fn missing_or_malformed_direction() {
        let out = enrich_all(vec![
            // Numeric IDs still match
            vehicle("1", 100223.into(), 1.into()),
            vehicle("2", "100224".into(), "0".into()),
        ]);
        assert_eq!(out[0].route_num, "70");
        assert_eq!(out[0].headsign_primary, "");
        assert_eq!(out[1].route_num, "45");
        assert_eq!(out[1].headsign_secondary, "");
    }

    #[test]
    fn no_direction_in_feed() {
        let out = enrich_all(vec![vehicle("7", "100223".into(), serde_json::Value::Null)]);
        assert_eq!(out[0].route_num, "70");
        assert_eq!(out[0].headsign_primary, "");
        assert_eq!(out[0].headsign_secondary, "");
        assert_eq!(out[0].direction_id, None);
    }

    #[test]
    fn order_preserved() {
        let out = enrich_all(vec![
            vehicle("c", "100224".into(), "0".into()),
            vehicle("a", "100223".into(), "0".into()),
            vehicle("b", "100224".into(), "1".into()),
        ]);
        let labels: Vec<&str> = out.iter().map(|v| v.label.as_str()).collect();
        assert_eq!(labels, vec!["c", "a", "b"]);
        assert!(enrich(&FeedMessage::empty(), &index()).is_empty());
    }
}

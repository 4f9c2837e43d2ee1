use geojson::{Feature, FeatureCollection, Geometry, Value};

use crate::EnrichedVehicle;

/// One point per vehicle, in the same order, for the map layer to draw.
pub fn to_feature_collection(vehicles: &[EnrichedVehicle]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: vehicles.iter().map(to_feature).collect(),
        foreign_members: None,
    }
}

fn to_feature(vehicle: &EnrichedVehicle) -> Feature {
    let mut feature = Feature {
        bbox: None,
        // GeoJSON is always longitude first
        geometry: Some(Geometry::new(Value::Point(vec![
            vehicle.longitude,
            vehicle.latitude,
        ]))),
        id: None,
        properties: None,
        foreign_members: None,
    };
    feature.set_property("route_id", vehicle.route_id.as_str());
    feature.set_property("route_num", vehicle.route_num.as_str());
    feature.set_property("headsign_primary", vehicle.headsign_primary.as_str());
    feature.set_property("headsign_secondary", vehicle.headsign_secondary.as_str());
    feature.set_property("label", vehicle.label.as_str());
    feature.set_property(
        "direction_id",
        vehicle.direction_id.as_ref().map(|d| d.as_str()).unwrap_or(""),
    );
    feature
}

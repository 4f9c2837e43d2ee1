use std::collections::BTreeSet;

use anyhow::Result;
use geojson::{Feature, FeatureCollection, GeoJson};

use super::{id_from_json, RouteID};

/// Stops GeoJSON exported from GTFS carries every stop in the region. Keep only stops served by
/// at least one of the allowed routes.
pub fn filter_stops(
    stops: FeatureCollection,
    allowed: &BTreeSet<RouteID>,
    preserve_top: bool,
) -> Result<FeatureCollection> {
    if allowed.is_empty() {
        bail!("No route IDs to keep stops for");
    }

    let before = stops.features.len();
    let features: Vec<Feature> = stops
        .features
        .into_iter()
        .filter(|f| served_by_any(f, allowed))
        .collect();
    info!("Kept {} of {} stops", features.len(), before);

    Ok(FeatureCollection {
        bbox: if preserve_top { stops.bbox } else { None },
        features,
        foreign_members: if preserve_top {
            stops.foreign_members
        } else {
            None
        },
    })
}

fn served_by_any(feature: &Feature, allowed: &BTreeSet<RouteID>) -> bool {
    let Some(route_ids) = feature.property("route_ids") else {
        return false;
    };
    let Some(list) = route_ids.as_array() else {
        return false;
    };
    list.iter()
        .filter_map(id_from_json)
        .any(|id| allowed.contains(&RouteID::new(id)))
}

pub fn parse_feature_collection(raw: &str) -> Result<FeatureCollection> {
    match raw.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        _ => bail!("Expected a FeatureCollection of stops"),
    }
}

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod ids;
mod routes;
mod stops;

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use ids::{id_from_json, DirectionID, RouteID, StopID};
pub use routes::{DirectionInfo, Headsigns, RouteMetadata};
pub use stops::{filter_stops, parse_feature_collection};

/// Static metadata about the routes we care about, built offline from GTFS. Read-only once
/// loaded.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteIndex {
    routes: BTreeMap<RouteID, RouteMetadata>,
}

impl RouteIndex {
    pub fn load<R: std::io::Read>(reader: R) -> Result<Self> {
        let index: Self = serde_json::from_reader(reader)?;
        Ok(index)
    }

    // Adds the path in the error message
    pub fn load_file(path: &str) -> Result<Self> {
        let file = fs_err::File::open(path)?;
        let index = Self::load(std::io::BufReader::new(file))
            .map_err(|err| anyhow!("{path}: {err}"))?;
        info!("Loaded {} routes from {path}", index.len());
        Ok(index)
    }

    pub fn get(&self, route: &RouteID) -> Option<&RouteMetadata> {
        self.routes.get(route)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// None if the route or direction isn't indexed, or the headsigns are malformed.
    pub fn headsigns(&self, route: &RouteID, direction: &DirectionID) -> Option<(String, String)> {
        self.get(route)?.direction(direction)?.trip_headsign.pair()
    }

    /// Every stop served by the route in either direction, across all trip patterns.
    pub fn stop_ids_for_route(&self, route: &RouteID) -> Result<BTreeSet<StopID>> {
        let Some(metadata) = self.get(route) else {
            bail!("{route} isn't in the route index");
        };
        let mut ids = BTreeSet::new();
        for direction in DirectionID::both() {
            if let Some(info) = metadata.direction(&direction) {
                for sequence in &info.stops_ordered {
                    ids.extend(sequence.iter().cloned());
                }
            }
        }
        Ok(ids)
    }
}

use gtfs::{DirectionID, RouteID};
use serde::{Deserialize, Serialize};

use crate::FeedError;

/// One snapshot of a GTFS-RT vehicle positions feed, in its JSON encoding. Only the fields we
/// use are decoded; everything else is ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FeedMessage {
    /// Passed through untouched
    #[serde(default)]
    pub header: serde_json::Value,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub entity: Vec<FeedEntity>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedEntity {
    pub vehicle: VehiclePosition,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VehiclePosition {
    pub vehicle: VehicleDescriptor,
    pub trip: TripDescriptor,
    pub position: Position,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VehicleDescriptor {
    #[serde(default)]
    pub label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripDescriptor {
    pub route_id: RouteID,
    /// Optional in GTFS-RT
    #[serde(default)]
    pub direction_id: Option<DirectionID>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl FeedMessage {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FeedError> {
        serde_json::from_slice(bytes).map_err(FeedError::Decode)
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl FeedEntity {
    pub fn route_id(&self) -> &RouteID {
        &self.vehicle.trip.route_id
    }
}

fn null_as_empty<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Vec<FeedEntity>, D::Error> {
    let list: Option<Vec<FeedEntity>> = Option::deserialize(d)?;
    Ok(list.unwrap_or_default())
}

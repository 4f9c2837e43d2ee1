#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod config;
mod enrich;
mod error;
mod features;
mod feed;
mod fetch;
mod filter;
mod pipeline;

pub use self::config::{Config, KCM_VEHICLE_POSITIONS_URL, UW_ROUTES};
pub use self::enrich::{enrich, EnrichedVehicle};
pub use self::error::FeedError;
pub use self::features::to_feature_collection;
pub use self::feed::{
    FeedEntity, FeedMessage, Position, TripDescriptor, VehicleDescriptor, VehiclePosition,
};
pub use self::fetch::{fetch_filtered, FeedSource, FileFeed, HttpFeed};
pub use self::filter::filter_routes;
pub use self::pipeline::{Cycle, LatestCycle, Pipeline};

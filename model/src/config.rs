use std::collections::BTreeSet;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use gtfs::RouteID;

pub const KCM_VEHICLE_POSITIONS_URL: &str =
    "https://s3.amazonaws.com/kcm-alerts-realtime-prod/vehiclepositions_pb.json";

/// The routes serving the UW campus
pub const UW_ROUTES: [&str; 8] = [
    "100223", "100224", "100225", "100228", "100447", "100254", "100259", "100264",
];

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed_url: String,
    pub routes_of_interest: BTreeSet<RouteID>,
    /// Log raw and filtered snapshots at debug level
    pub debug_dump: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: KCM_VEHICLE_POSITIONS_URL.to_string(),
            routes_of_interest: UW_ROUTES.iter().map(|x| RouteID::from(*x)).collect(),
            debug_dump: false,
        }
    }
}

impl Config {
    /// Any field missing from the file keeps its default.
    pub fn load_file(path: &str) -> Result<Self> {
        let raw = fs_err::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|err| anyhow!("{path}: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"routes_of_interest": [100223]}"#).unwrap();
        assert_eq!(config.feed_url, KCM_VEHICLE_POSITIONS_URL);
        assert_eq!(config.routes_of_interest.len(), 1);
        assert!(config.routes_of_interest.contains(&RouteID::from("100223")));
        assert!(!config.debug_dump);
    }

    #[test]
    fn defaults() {
        assert_eq!(Config::default().routes_of_interest.len(), UW_ROUTES.len());
    }
}

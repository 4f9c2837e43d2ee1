use std::collections::BTreeSet;

use gtfs::{RouteID, RouteIndex};
use model::{
    enrich, fetch_filtered, to_feature_collection, Config, FeedError, FeedMessage, FeedSource,
    Pipeline,
};

struct Snapshot(&'static str);

impl FeedSource for Snapshot {
    async fn fetch(&self) -> Result<FeedMessage, FeedError> {
        FeedMessage::from_slice(self.0.as_bytes())
    }

    fn describe(&self) -> String {
        "snapshot".to_string()
    }
}

const FEED: &str = r#"{"entity": [{"vehicle": {
    "vehicle": {"label": "123"},
    "trip": {"route_id": "100223", "direction_id": "0"},
    "position": {"latitude": 47.6, "longitude": -122.3}
}}]}"#;

const INDEX: &str = r#"{"100223": {"route_short_name": "70", "directions": {
    "0": {"trip_headsign": ["UW", "Downtown"]}
}}}"#;

fn index() -> RouteIndex {
    RouteIndex::load(INDEX.as_bytes()).unwrap()
}

#[tokio::test]
async fn single_vehicle() {
    let interest: BTreeSet<RouteID> = vec![RouteID::from("100223")].into_iter().collect();
    let feed = fetch_filtered(&Snapshot(FEED), Some(&interest), &Config::default())
        .await
        .unwrap();
    let fc = to_feature_collection(&enrich(&feed, &index()));

    let json = serde_json::to_value(&fc).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-122.3, 47.6]},
                "properties": {
                    "route_id": "100223",
                    "route_num": "70",
                    "headsign_primary": "UW",
                    "headsign_secondary": "Downtown",
                    "label": "123",
                    "direction_id": "0"
                }
            }]
        })
    );
}

#[tokio::test]
async fn feed_without_entities() {
    let pipeline = Pipeline::new(
        Snapshot(r#"{"header": {"timestamp": 1}}"#),
        index(),
        Config::default(),
    );
    let cycle = pipeline.run_cycle().await.unwrap();
    assert!(cycle.features.features.is_empty());
}

#[tokio::test]
async fn filtered_out_by_interest_set() {
    let interest: BTreeSet<RouteID> = vec![RouteID::from("100224")].into_iter().collect();
    let feed = fetch_filtered(&Snapshot(FEED), Some(&interest), &Config::default())
        .await
        .unwrap();
    assert!(feed.entity.is_empty());
}

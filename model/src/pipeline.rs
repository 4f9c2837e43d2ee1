use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use geojson::FeatureCollection;
use gtfs::RouteIndex;

use crate::{enrich, fetch_filtered, to_feature_collection, Config, FeedError, FeedSource};

/// The result of one fetch-filter-enrich-assemble cycle.
pub struct Cycle {
    /// Cycles are numbered in the order they started, not the order they finished
    pub seq: u64,
    pub fetched_at: DateTime<Utc>,
    pub features: FeatureCollection,
}

pub struct Pipeline<S: FeedSource> {
    source: S,
    index: RouteIndex,
    config: Config,
    next_cycle: AtomicU64,
}

impl<S: FeedSource> Pipeline<S> {
    pub fn new(source: S, index: RouteIndex, config: Config) -> Self {
        Self {
            source,
            index,
            config,
            next_cycle: AtomicU64::new(0),
        }
    }

    /// Cycles may overlap. Each one is tagged when it starts, so whoever consumes the results can
    /// ignore one that finishes after a newer cycle.
    pub async fn run_cycle(&self) -> Result<Cycle, FeedError> {
        let seq = self.next_cycle.fetch_add(1, Ordering::SeqCst);
        let feed = fetch_filtered(&self.source, None, &self.config).await?;
        let fetched_at = Utc::now();
        let vehicles = enrich(&feed, &self.index);
        let features = to_feature_collection(&vehicles);
        info!(
            "Cycle {seq}: {} vehicles on routes of interest at {fetched_at}",
            features.features.len()
        );
        Ok(Cycle {
            seq,
            fetched_at,
            features,
        })
    }

    /// Run a cycle every `interval` until `sink` says to stop. A failed cycle is logged and the
    /// next tick tries again from scratch.
    pub async fn poll<F: FnMut(Cycle) -> bool>(&self, interval: Duration, mut sink: F) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            match self.run_cycle().await {
                Ok(cycle) => {
                    if !sink(cycle) {
                        return;
                    }
                }
                Err(err) => {
                    warn!("Fetching {} failed: {err}", self.source.describe());
                }
            }
        }
    }
}

/// Holds the newest cycle handed to the renderer.
#[derive(Default)]
pub struct LatestCycle {
    current: Option<Cycle>,
}

impl LatestCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false, dropping the cycle, if something newer is already held.
    pub fn offer(&mut self, cycle: Cycle) -> bool {
        if let Some(ref current) = self.current {
            if cycle.seq <= current.seq {
                debug!(
                    "Discarding stale cycle {}; already showing {}",
                    cycle.seq, current.seq
                );
                return false;
            }
        }
        self.current = Some(cycle);
        true
    }

    pub fn get(&self) -> Option<&Cycle> {
        self.current.as_ref()
    }
}

use std::collections::BTreeSet;

use gtfs::RouteID;

use crate::FeedMessage;

/// Keep only vehicles on the given routes, in feed order. The header is untouched.
pub fn filter_routes(feed: FeedMessage, interest: &BTreeSet<RouteID>) -> FeedMessage {
    let before = feed.entity.len();
    let entity: Vec<_> = feed
        .entity
        .into_iter()
        .filter(|e| interest.contains(e.route_id()))
        .collect();
    debug!("{} of {} vehicles are on routes of interest", entity.len(), before);
    FeedMessage {
        header: feed.header,
        entity,
    }
}

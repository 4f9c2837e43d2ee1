use std::collections::BTreeSet;

use gtfs::RouteID;

use crate::{filter_routes, Config, FeedError, FeedMessage};

/// Somewhere a feed snapshot comes from. Fetching is the only step of a cycle that waits.
#[allow(async_fn_in_trait)]
pub trait FeedSource {
    async fn fetch(&self) -> Result<FeedMessage, FeedError>;

    fn describe(&self) -> String;
}

pub struct HttpFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpFeed {
    pub fn new(url: String) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

impl FeedSource for HttpFeed {
    async fn fetch(&self) -> Result<FeedMessage, FeedError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Status(response.status()));
        }
        let bytes = response.bytes().await?;
        debug!("Got {} bytes from {}", bytes.len(), self.url);
        FeedMessage::from_slice(&bytes)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Replays a snapshot saved to disk
pub struct FileFeed {
    path: String,
}

impl FileFeed {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

impl FeedSource for FileFeed {
    async fn fetch(&self) -> Result<FeedMessage, FeedError> {
        let bytes = fs_err::read(&self.path)?;
        FeedMessage::from_slice(&bytes)
    }

    fn describe(&self) -> String {
        self.path.clone()
    }
}

/// Fetch one snapshot and keep only vehicles on the routes of interest. With no explicit set, the
/// configured routes are used.
pub async fn fetch_filtered<S: FeedSource>(
    source: &S,
    interest: Option<&BTreeSet<RouteID>>,
    config: &Config,
) -> Result<FeedMessage, FeedError> {
    let feed = source.fetch().await?;
    if config.debug_dump {
        debug!("Raw feed from {}: {}", source.describe(), dump(&feed));
    }

    let filtered = filter_routes(feed, interest.unwrap_or(&config.routes_of_interest));
    if config.debug_dump {
        debug!("Filtered feed: {}", dump(&filtered));
    }
    Ok(filtered)
}

fn dump(feed: &FeedMessage) -> String {
    serde_json::to_string(feed).unwrap_or_else(|err| format!("<unprintable: {err}>"))
}

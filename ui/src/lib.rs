#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod render;
mod selection;

use std::collections::BTreeSet;
use std::time::Duration;

use anyhow::Result;
use geojson::{FeatureCollection, GeoJson};
use structopt::StructOpt;

use gtfs::{RouteID, RouteIndex};
use model::{Config, FeedSource, FileFeed, HttpFeed, LatestCycle, Pipeline};

pub use self::render::{PaintInstruction, PaintLog, SetPaintProperty};
pub use self::selection::{
    OpacityRule, Renderer, RouteSelection, Selection, OPACITY_PROPERTY, ROUTE_ID_ATTRIBUTE,
    STOPS_LAYER,
};

#[derive(StructOpt)]
#[structopt(name = "uw-bus-map")]
enum Args {
    /// Fetch live vehicle positions on the routes of interest and write them as GeoJSON
    Positions {
        /// The path to the static route index (JSON)
        #[structopt(long)]
        index: String,
        /// A JSON config file; flags below override it
        #[structopt(long)]
        config: Option<String>,
        /// Override the feed URL
        #[structopt(long)]
        url: Option<String>,
        /// Read a saved feed snapshot instead of fetching
        #[structopt(long)]
        feed_file: Option<String>,
        /// Override the routes of interest
        #[structopt(long)]
        routes: Vec<String>,
        /// Where to write the GeoJSON. Defaults to stdout.
        #[structopt(long)]
        output: Option<String>,
        /// Keep fetching every this many seconds
        #[structopt(long)]
        refresh_secs: Option<u64>,
        /// Log raw and filtered feed snapshots
        #[structopt(long)]
        debug_dump: bool,
    },
    /// Replay route button clicks and print the resulting paint instructions
    Select {
        /// The path to the static route index (JSON)
        #[structopt(long)]
        index: String,
        /// Route IDs of the buttons clicked, in order
        #[structopt(long = "click")]
        clicks: Vec<String>,
    },
    /// Keep only stops served by at least one of the given routes
    FilterStops {
        /// Stops GeoJSON. Defaults to stdin.
        #[structopt(short, long)]
        input: Option<String>,
        /// Defaults to stdout
        #[structopt(short, long)]
        output: Option<String>,
        #[structopt(long, required = true)]
        ids: Vec<String>,
        /// Keep extra top-level members of the input
        #[structopt(long)]
        preserve_top: bool,
    },
}

impl Args {
    fn run(self) -> Result<()> {
        match self {
            Args::Positions {
                index,
                config,
                url,
                feed_file,
                routes,
                output,
                refresh_secs,
                debug_dump,
            } => {
                let mut config = match config {
                    Some(path) => Config::load_file(&path)?,
                    None => Config::default(),
                };
                if let Some(url) = url {
                    config.feed_url = url;
                }
                if !routes.is_empty() {
                    config.routes_of_interest = to_route_ids(routes);
                }
                config.debug_dump |= debug_dump;

                let index = RouteIndex::load_file(&index)?;
                let refresh = refresh_secs.map(Duration::from_secs);

                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()?;
                if let Some(path) = feed_file {
                    let pipeline = Pipeline::new(FileFeed::new(path), index, config);
                    runtime.block_on(positions(pipeline, output, refresh))
                } else {
                    let url = config.feed_url.clone();
                    let pipeline = Pipeline::new(HttpFeed::new(url), index, config);
                    runtime.block_on(positions(pipeline, output, refresh))
                }
            }
            Args::Select { index, clicks } => {
                let index = RouteIndex::load_file(&index)?;
                let mut selection = RouteSelection::new(&index, PaintLog::new());
                for route in clicks {
                    let route = RouteID::new(route);
                    if let Some(metadata) = index.get(&route) {
                        info!("Clicked {}", metadata.describe());
                    }
                    let state = selection.click(route)?;
                    let log = selection.renderer();
                    if let Some(instruction) = log.instructions.last() {
                        println!(
                            "{}",
                            serde_json::to_string(&instruction.to_paint_property())?
                        );
                    }
                    info!("Now {:?}, active button {:?}", state, log.active);
                }
                Ok(())
            }
            Args::FilterStops {
                input,
                output,
                ids,
                preserve_top,
            } => {
                let raw = match input {
                    Some(path) => fs_err::read_to_string(path)?,
                    None => std::io::read_to_string(std::io::stdin())?,
                };
                let stops = gtfs::parse_feature_collection(&raw)?;
                let filtered = gtfs::filter_stops(stops, &to_route_ids(ids), preserve_top)?;
                write_geojson(output.as_deref(), filtered)
            }
        }
    }
}

async fn positions<S: FeedSource>(
    pipeline: Pipeline<S>,
    output: Option<String>,
    refresh: Option<Duration>,
) -> Result<()> {
    let Some(interval) = refresh else {
        let cycle = pipeline.run_cycle().await?;
        return write_geojson(output.as_deref(), cycle.features);
    };

    let mut latest = LatestCycle::new();
    let mut result = Ok(());
    pipeline
        .poll(interval, |cycle| {
            if !latest.offer(cycle) {
                return true;
            }
            if let Some(cycle) = latest.get() {
                if let Err(err) = write_geojson(output.as_deref(), cycle.features.clone()) {
                    result = Err(err);
                    return false;
                }
            }
            true
        })
        .await;
    result
}

fn write_geojson(path: Option<&str>, fc: FeatureCollection) -> Result<()> {
    let gj = GeoJson::FeatureCollection(fc);
    match path {
        Some(path) => {
            fs_err::write(path, serde_json::to_string_pretty(&gj)?)?;
            info!("Wrote {path}");
        }
        None => println!("{}", serde_json::to_string(&gj)?),
    }
    Ok(())
}

fn to_route_ids(ids: Vec<String>) -> BTreeSet<RouteID> {
    ids.into_iter()
        .map(|x| RouteID::new(x.trim().to_string()))
        .collect()
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = Args::from_args().run() {
        error!("{err:#}");
        std::process::exit(1);
    }
}

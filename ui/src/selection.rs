use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use serde_json::{json, Value};

use gtfs::{RouteID, RouteIndex, StopID};

pub const STOPS_LAYER: &str = "uw-stops";
pub const OPACITY_PROPERTY: &str = "circle-opacity";
pub const ROUTE_ID_ATTRIBUTE: &str = "data-route-id";

const FULL_OPACITY: f64 = 1.0;
const FADED_OPACITY: f64 = 0.2;

/// How opaque each stop on the stops layer should be
#[derive(Clone, Debug, PartialEq)]
pub enum OpacityRule {
    Uniform(f64),
    /// Stops in the set get `selected`, everything else `other`
    Highlight {
        stops: BTreeSet<StopID>,
        selected: f64,
        other: f64,
    },
}

impl OpacityRule {
    pub fn reset() -> Self {
        OpacityRule::Uniform(FULL_OPACITY)
    }

    pub fn highlight(stops: BTreeSet<StopID>) -> Self {
        OpacityRule::Highlight {
            stops,
            selected: FULL_OPACITY,
            other: FADED_OPACITY,
        }
    }

    pub fn opacity_of(&self, stop: &StopID) -> f64 {
        match self {
            OpacityRule::Uniform(x) => *x,
            OpacityRule::Highlight {
                stops,
                selected,
                other,
            } => {
                if stops.contains(stop) {
                    *selected
                } else {
                    *other
                }
            }
        }
    }

    /// As a map style expression, matching on each stop's `stop_id` property
    pub fn paint_expression(&self) -> Value {
        match self {
            OpacityRule::Uniform(x) => json!(x),
            OpacityRule::Highlight {
                stops,
                selected,
                other,
            } => json!([
                "case",
                ["in", ["get", "stop_id"], ["literal", stops]],
                selected,
                other
            ]),
        }
    }
}

/// Whatever draws the map and the route buttons
pub trait Renderer {
    fn set_opacity_rule(&mut self, layer: &str, rule: &OpacityRule);
    /// None means no button is active
    fn set_active(&mut self, button: Option<&RouteID>);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Unselected,
    Selected(RouteID),
}

/// Tracks which route's stops are highlighted. Clicking the highlighted route again clears it;
/// clicking another route switches straight to it.
pub struct RouteSelection<'a, R: Renderer> {
    index: &'a RouteIndex,
    renderer: R,
    active: Option<RouteID>,
}

impl<'a, R: Renderer> RouteSelection<'a, R> {
    pub fn new(index: &'a RouteIndex, renderer: R) -> Self {
        Self {
            index,
            renderer,
            active: None,
        }
    }

    pub fn current(&self) -> Selection {
        match self.active {
            Some(ref route) => Selection::Selected(route.clone()),
            None => Selection::Unselected,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Buttons are only offered for indexed routes, so an unknown route is an error and changes
    /// nothing.
    pub fn click(&mut self, route: RouteID) -> Result<Selection> {
        if self.active.as_ref() == Some(&route) {
            self.renderer
                .set_opacity_rule(STOPS_LAYER, &OpacityRule::reset());
            self.renderer.set_active(None);
            self.active = None;
            debug!("Cleared selection of {route}");
            return Ok(Selection::Unselected);
        }

        let stops = self.index.stop_ids_for_route(&route)?;
        debug!("Highlighting {} stops of {route}", stops.len());
        self.renderer
            .set_opacity_rule(STOPS_LAYER, &OpacityRule::highlight(stops));
        self.renderer.set_active(Some(&route));
        self.active = Some(route.clone());
        Ok(Selection::Selected(route))
    }

    pub fn click_button(&mut self, attributes: &BTreeMap<String, String>) -> Result<Selection> {
        let route = match attributes.get(ROUTE_ID_ATTRIBUTE) {
            Some(x) => RouteID::new(x.as_str()),
            None => bail!("Button has no {ROUTE_ID_ATTRIBUTE}"),
        };
        self.click(route)
    }
}

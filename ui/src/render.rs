use serde::Serialize;
use serde_json::Value;

use gtfs::RouteID;

use crate::selection::{OpacityRule, Renderer, OPACITY_PROPERTY};

/// Records what the map and buttons were told to do, instead of drawing anything. The command
/// line tool prints these, and tests inspect them.
#[derive(Default)]
pub struct PaintLog {
    pub instructions: Vec<PaintInstruction>,
    pub active: Option<RouteID>,
}

pub struct PaintInstruction {
    pub layer: String,
    pub rule: OpacityRule,
}

/// What a map style API expects
#[derive(Serialize)]
pub struct SetPaintProperty<'a> {
    pub layer: &'a str,
    pub property: &'a str,
    pub value: Value,
}

impl PaintLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PaintInstruction {
    pub fn to_paint_property(&self) -> SetPaintProperty<'_> {
        SetPaintProperty {
            layer: &self.layer,
            property: OPACITY_PROPERTY,
            value: self.rule.paint_expression(),
        }
    }
}

impl Renderer for PaintLog {
    fn set_opacity_rule(&mut self, layer: &str, rule: &OpacityRule) {
        self.instructions.push(PaintInstruction {
            layer: layer.to_string(),
            rule: rule.clone(),
        });
    }

    fn set_active(&mut self, button: Option<&RouteID>) {
        self.active = button.cloned();
    }
}

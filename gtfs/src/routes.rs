use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::{DirectionID, StopID};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub route_short_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub directions: BTreeMap<DirectionID, DirectionInfo>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionInfo {
    #[serde(default)]
    pub trip_headsign: Headsigns,
    /// One list per trip pattern, each in the order the stops are visited
    #[serde(default, deserialize_with = "null_as_default")]
    pub stops_ordered: Vec<Vec<StopID>>,
}

/// Primary and secondary headsign for one direction. The index is built by hand upstream, so
/// anything that isn't a list of at most two entries is kept around but treated as missing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Headsigns {
    Pair(Vec<Option<String>>),
    Malformed(serde_json::Value),
}

impl Default for Headsigns {
    fn default() -> Self {
        Headsigns::Malformed(serde_json::Value::Null)
    }
}

impl Headsigns {
    /// A missing slot is an empty string.
    pub fn pair(&self) -> Option<(String, String)> {
        match self {
            Headsigns::Pair(list) if list.len() <= 2 => {
                let slot = |idx: usize| list.get(idx).cloned().flatten().unwrap_or_default();
                Some((slot(0), slot(1)))
            }
            _ => None,
        }
    }
}

impl RouteMetadata {
    pub fn direction(&self, direction: &DirectionID) -> Option<&DirectionInfo> {
        self.directions.get(direction)
    }

    pub fn describe(&self) -> String {
        let mut headsigns = Vec::new();
        for info in self.directions.values() {
            if let Some((primary, _)) = info.trip_headsign.pair() {
                if !primary.is_empty() {
                    headsigns.push(primary);
                }
            }
        }
        if headsigns.is_empty() {
            self.route_short_name.clone()
        } else {
            format!("{} ({})", self.route_short_name, headsigns.join(" / "))
        }
    }
}

// One hand-edited route shouldn't stop the rest of the index from loading
fn null_as_default<'de, D: Deserializer<'de>, T: Default + Deserialize<'de>>(
    d: D,
) -> Result<T, D::Error> {
    let x: Option<T> = Option::deserialize(d)?;
    Ok(x.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headsigns(json: &str) -> Headsigns {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn well_formed_pairs() {
        assert_eq!(
            headsigns(r#"["UW", "Downtown"]"#).pair(),
            Some(("UW".to_string(), "Downtown".to_string()))
        );
        assert_eq!(
            headsigns(r#"["UW", null]"#).pair(),
            Some(("UW".to_string(), String::new()))
        );
        assert_eq!(
            headsigns(r#"["UW"]"#).pair(),
            Some(("UW".to_string(), String::new()))
        );
    }

    #[test]
    fn malformed_pairs() {
        assert_eq!(headsigns(r#""UW""#).pair(), None);
        assert_eq!(headsigns(r#"["a", "b", "c"]"#).pair(), None);
        assert_eq!(headsigns(r#"{"0": "UW"}"#).pair(), None);
        assert_eq!(Headsigns::default().pair(), None);
    }

    #[test]
    fn missing_fields_default() {
        let info: DirectionInfo = serde_json::from_str("{}").unwrap();
        assert!(info.stops_ordered.is_empty());
        assert_eq!(info.trip_headsign.pair(), None);
    }

    #[test]
    fn null_and_missing_fields() {
        let info: DirectionInfo =
            serde_json::from_str(r#"{"trip_headsign": ["UW"], "stops_ordered": null}"#).unwrap();
        assert!(info.stops_ordered.is_empty());

        let route: RouteMetadata = serde_json::from_str(r#"{"directions": {}}"#).unwrap();
        assert_eq!(route.route_short_name, "");
        let route: RouteMetadata =
            serde_json::from_str(r#"{"route_short_name": null, "directions": null}"#).unwrap();
        assert_eq!(route.route_short_name, "");
        assert!(route.directions.is_empty());
    }

    #[test]
    fn describe_route() {
        let route: RouteMetadata = serde_json::from_str(
            r#"{"route_short_name": "70", "directions": {
                "0": {"trip_headsign": ["U-District", "Eastlake"]},
                "1": {"trip_headsign": ["Downtown", ""]}
            }}"#,
        )
        .unwrap();
        assert_eq!(route.describe(), "70 (U-District / Downtown)");
    }
}

//! Column layout of the NASR legacy TXT records.
//!
//! The defaults follow the published record layouts (`NAV1`, `FIX1`, `APT`).
//! A JSON file with the same shape can replace any record kind when the
//! format is revised.

use crate::error::Result;
use crate::txt_data::Span;
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NavaidLayout {
    pub discriminator: String,
    pub identifier: Span,
    pub facility_type: Span,
    pub name: Span,
    pub city: Span,
    pub state: Span,
    pub latitude: Span,
    pub longitude: Span,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WaypointLayout {
    pub discriminator: String,
    pub identifier: Span,
    pub state: Span,
    pub region: Span,
    pub latitude: Span,
    pub longitude: Span,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AirportLayout {
    pub discriminator: String,
    pub facility_type: Span,
    pub identifier: Span,
    pub state: Span,
    pub city: Span,
    pub name: Span,
    pub latitude: Span,
    pub longitude: Span,
    pub icao: Span,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    pub navaid: NavaidLayout,
    pub waypoint: WaypointLayout,
    pub airport: AirportLayout,
}

impl Default for NavaidLayout {
    fn default() -> Self {
        NavaidLayout {
            discriminator: "NAV1".to_owned(),
            identifier: Span(4, 4),
            facility_type: Span(8, 20),
            name: Span(42, 30),
            city: Span(72, 40),
            state: Span(142, 2),
            latitude: Span(371, 14),
            longitude: Span(396, 14),
        }
    }
}

impl Default for WaypointLayout {
    fn default() -> Self {
        WaypointLayout {
            discriminator: "FIX1".to_owned(),
            identifier: Span(4, 30),
            state: Span(34, 30),
            region: Span(64, 2),
            latitude: Span(66, 14),
            longitude: Span(80, 14),
        }
    }
}

impl Default for AirportLayout {
    fn default() -> Self {
        AirportLayout {
            discriminator: "APT".to_owned(),
            facility_type: Span(14, 13),
            identifier: Span(27, 4),
            state: Span(48, 2),
            city: Span(93, 40),
            name: Span(133, 50),
            latitude: Span(523, 15),
            longitude: Span(550, 15),
            icao: Span(1210, 7),
        }
    }
}

impl Layout {
    pub fn from_json(text: &str) -> Result<Layout> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Layout> {
        let text = std::fs::read_to_string(path)?;
        Layout::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_kinds() {
        let layout = Layout::from_json(
            r#"{
                "waypoint": {
                    "discriminator": "WPT",
                    "identifier": [3, 5],
                    "state": [8, 2],
                    "region": [10, 2],
                    "latitude": [12, 10],
                    "longitude": [22, 11]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(layout.waypoint.discriminator, "WPT");
        assert_eq!(layout.waypoint.identifier, Span(3, 5));
        assert_eq!(layout.navaid, NavaidLayout::default());
        assert_eq!(layout.airport, AirportLayout::default());
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Layout::from_json(r#"{ "runway": {} }"#).is_err());
    }
}

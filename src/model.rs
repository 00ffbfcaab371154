use crate::geo::LatLon;
use derive_builder::Builder;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// The three independent catalogs, one per source file.
#[derive(Clone, Copy, Debug, Serialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Airport,
    Navaid,
    Waypoint,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Airport, Kind::Navaid, Kind::Waypoint];

    pub fn file_name(self) -> &'static str {
        match self {
            Kind::Airport => "APT.txt",
            Kind::Navaid => "NAV.txt",
            Kind::Waypoint => "FIX.txt",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Airport => "airport",
            Kind::Navaid => "navaid",
            Kind::Waypoint => "waypoint",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Kind::Airport => "Airport",
            Kind::Navaid => "NAVAID",
            Kind::Waypoint => "Waypoint",
        })
    }
}

#[derive(Clone, Debug, Builder, Serialize, PartialEq)]
#[builder(setter(into))]
pub struct Navaid {
    pub identifier: String,
    pub name: String,
    #[serde(rename = "type")]
    pub facility_type: String,
    #[builder(default)]
    pub city: String,
    #[builder(default)]
    pub state: String,
    #[serde(flatten)]
    pub latlon: LatLon,
}

/// A fix. Carries nothing beyond its identifier, owner and position.
#[derive(Clone, Debug, Builder, PartialEq)]
#[builder(setter(into))]
pub struct Waypoint {
    pub identifier: String,
    #[builder(default)]
    pub state: String,
    #[builder(default)]
    pub region: String,
    pub latlon: LatLon,
}

#[derive(Clone, Debug, Builder, Serialize, PartialEq)]
#[builder(setter(into))]
pub struct Airport {
    pub identifier: String,
    #[builder(setter(into, strip_option), default)]
    pub icao: Option<String>,
    pub name: String,
    #[builder(default)]
    pub city: String,
    #[builder(default)]
    pub state: String,
    #[serde(rename = "type")]
    pub facility_type: String,
    #[serde(flatten)]
    pub latlon: LatLon,
}

/// A catalog hit. Airports reached through their ICAO alias share the same `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    Airport(Arc<Airport>),
    Navaid(Arc<Navaid>),
    Waypoint(Arc<Waypoint>),
}

impl Entity {
    pub fn kind(&self) -> Kind {
        match self {
            Entity::Airport(_) => Kind::Airport,
            Entity::Navaid(_) => Kind::Navaid,
            Entity::Waypoint(_) => Kind::Waypoint,
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Entity::Airport(a) => &a.identifier,
            Entity::Navaid(n) => &n.identifier,
            Entity::Waypoint(w) => &w.identifier,
        }
    }

    pub fn latlon(&self) -> LatLon {
        match self {
            Entity::Airport(a) => a.latlon,
            Entity::Navaid(n) => n.latlon,
            Entity::Waypoint(w) => w.latlon,
        }
    }
}

#[derive(Serialize)]
struct WaypointDescriptor<'a> {
    identifier: &'a str,
    #[serde(rename = "type")]
    ty: &'static str,
    state: &'a str,
    region: &'a str,
    #[serde(flatten)]
    latlon: LatLon,
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Entity::Airport(a) => a.serialize(serializer),
            Entity::Navaid(n) => n.serialize(serializer),
            Entity::Waypoint(w) => WaypointDescriptor {
                identifier: &w.identifier,
                ty: "FIX",
                state: &w.state,
                region: &w.region,
                latlon: w.latlon,
            }
            .serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn airport_descriptor_fields() {
        let sea = AirportBuilder::default()
            .identifier("SEA")
            .icao("KSEA")
            .name("SEATTLE-TACOMA INTL")
            .city("SEATTLE")
            .state("WA")
            .facility_type("AIRPORT")
            .latlon(LatLon::new(47.449, -122.309))
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_value(Entity::Airport(Arc::new(sea))).unwrap(),
            json!({
                "identifier": "SEA",
                "icao": "KSEA",
                "name": "SEATTLE-TACOMA INTL",
                "city": "SEATTLE",
                "state": "WA",
                "type": "AIRPORT",
                "latitude": 47.449,
                "longitude": -122.309
            })
        );
    }

    #[test]
    fn waypoint_descriptor_is_typed_fix() {
        let bangr = WaypointBuilder::default()
            .identifier("BANGR")
            .state("WASHINGTON")
            .latlon(LatLon::new(47.4625, -122.928611))
            .build()
            .unwrap();
        let value = serde_json::to_value(Entity::Waypoint(Arc::new(bangr))).unwrap();
        assert_eq!(value["type"], "FIX");
        assert_eq!(value["region"], "");
        assert_eq!(value["latitude"], 47.4625);
    }

    #[test]
    fn missing_icao_serializes_as_null() {
        let s43 = AirportBuilder::default()
            .identifier("S43")
            .name("HARVEY FIELD")
            .facility_type("AIRPORT")
            .latlon(LatLon::new(47.908, -122.105))
            .build()
            .unwrap();
        assert_eq!(s43.icao, None);
        assert!(serde_json::to_value(&s43).unwrap()["icao"].is_null());
    }
}

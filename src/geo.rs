use lazy_static::lazy_static;
use regex::Regex;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::QueryError;

/// Mean Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon(f64, f64);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    fn sign_of(self, hemisphere: &str) -> Option<f64> {
        match (self, hemisphere) {
            (Axis::Latitude, "N") | (Axis::Longitude, "E") => Some(1.0),
            (Axis::Latitude, "S") | (Axis::Longitude, "W") => Some(-1.0),
            _ => None,
        }
    }
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        LatLon(lat, lon)
    }

    pub fn lat(self) -> f64 {
        self.0
    }

    pub fn lon(self) -> f64 {
        self.1
    }

    //Ex: 31-53-00.510N, 114813.0000N, -122.309
    pub fn from_txt(lat: &str, lon: &str) -> Option<Self> {
        Some(LatLon(
            parse_degrees(lat, Axis::Latitude)?,
            parse_degrees(lon, Axis::Longitude)?,
        ))
    }

    pub fn rounded(self) -> Self {
        LatLon(round6(self.0), round6(self.1))
    }
}

impl Serialize for LatLon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("LatLon", 2)?;
        s.serialize_field("latitude", &self.0)?;
        s.serialize_field("longitude", &self.1)?;
        s.end()
    }
}

/// Parses one coordinate as published in the TXT files into signed decimal degrees.
pub fn parse_degrees(text: &str, axis: Axis) -> Option<f64> {
    fn to_dd(d: f64, m: f64, s: f64) -> f64 {
        d + m / 60.0 + s / 3600.0
    }

    lazy_static! {
        static ref DMS_REGEX: Regex =
            Regex::new(r"^(\d{1,3})-(\d{1,2})-(\d{1,2}(?:\.\d+)?)([NSEW])$").unwrap();
        static ref SECONDS_REGEX: Regex = Regex::new(r"^(\d+(?:\.\d+)?)([NSEW])$").unwrap();
        static ref DECIMAL_REGEX: Regex = Regex::new(r"^[+-]?\d{1,3}(?:\.\d+)?$").unwrap();
    }

    let text = text.trim();
    let dd = if let Some(cap) = DMS_REGEX.captures(text) {
        let (d, m, s): (f64, f64, f64) =
            (cap[1].parse().ok()?, cap[2].parse().ok()?, cap[3].parse().ok()?);
        if m >= 60.0 || s >= 60.0 {
            return None;
        }
        axis.sign_of(&cap[4])? * to_dd(d, m, s)
    } else if let Some(cap) = SECONDS_REGEX.captures(text) {
        let s: f64 = cap[1].parse().ok()?;
        axis.sign_of(&cap[2])? * s / 3600.0
    } else if DECIMAL_REGEX.is_match(text) {
        text.parse().ok()?
    } else {
        return None;
    };

    if dd.abs() > axis.limit() {
        None
    } else {
        Some(dd)
    }
}

/// Rounds to 6 decimal places through the exact decimal expansion, so every
/// implementation agrees on the last digit.
pub fn round6(x: f64) -> f64 {
    format!("{:.6}", x).parse().unwrap_or(x)
}

/// Spherical direct geodesic: the point `distance_nm` along `bearing` (degrees true)
/// from `origin`, rounded to 6 decimals.
pub fn project(origin: LatLon, bearing: f64, distance_nm: f64) -> Result<LatLon, QueryError> {
    if !(0.0..=360.0).contains(&bearing) {
        return Err(QueryError::InvalidArgument {
            parameter: "bearing",
            reason: "must be between 0 and 360".to_owned(),
        });
    }
    if !distance_nm.is_finite() || distance_nm < 0.0 {
        return Err(QueryError::InvalidArgument {
            parameter: "distance",
            reason: "must not be negative".to_owned(),
        });
    }
    if distance_nm == 0.0 {
        return Ok(origin.rounded());
    }

    let lat = origin.0.to_radians();
    let lon = origin.1.to_radians();
    let bearing = (bearing % 360.0).to_radians();
    let delta = distance_nm / EARTH_RADIUS_NM;

    let dest_lat = (lat.sin() * delta.cos() + lat.cos() * delta.sin() * bearing.cos()).asin();
    let dest_lon = lon
        + (bearing.sin() * delta.sin() * lat.cos()).atan2(delta.cos() - lat.sin() * dest_lat.sin());

    Ok(LatLon(dest_lat.to_degrees(), dest_lon.to_degrees()).rounded())
}

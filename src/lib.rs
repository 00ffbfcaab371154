//! Point lookup and radial/distance projection over the FAA NASR navaid,
//! fix and airport TXT files.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod decode;
pub mod error;
pub mod geo;
pub mod layout;
pub mod model;
pub mod query;
pub mod resolve;
pub mod store;
mod txt_data;
mod zip_util;

pub use catalog::{Catalog, LoadStats};
pub use decode::{Decoded, Decoder, Record};
pub use error::{DecodeError, Error, QueryError, Result};
pub use geo::LatLon;
pub use layout::Layout;
pub use model::{Airport, AirportBuilder, Entity, Kind, Navaid, NavaidBuilder, Waypoint, WaypointBuilder};
pub use query::{Answer, Engine, Health, Projection};
pub use resolve::{resolve, EncodedToken, Scope, Token};
pub use store::{Snapshot, Sources, Store};
pub use txt_data::Span;

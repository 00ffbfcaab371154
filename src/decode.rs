use crate::error::DecodeError;
use crate::geo::{parse_degrees, Axis, LatLon};
use crate::layout::Layout;
use crate::model::*;
use crate::txt_data::Span;

#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    Navaid(Navaid),
    Waypoint(Waypoint),
    Airport(Airport),
}

/// Outcome for a single line.
#[derive(Clone, Debug, PartialEq)]
pub enum Decoded {
    Record(Record),
    /// Not a record of the requested kind (headers, remarks, other record types).
    Ignored,
    Malformed(DecodeError),
}

impl From<Result<Record, DecodeError>> for Decoded {
    fn from(r: Result<Record, DecodeError>) -> Self {
        match r {
            Ok(record) => Decoded::Record(record),
            Err(e) => Decoded::Malformed(e),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Decoder {
    layout: Layout,
}

fn identifier(line: &str, span: Span) -> Result<String, DecodeError> {
    match span.extract(line) {
        "" => Err(DecodeError::MissingIdentifier),
        id => Ok(id.to_ascii_uppercase()),
    }
}

fn incomplete<E: std::fmt::Display>(e: E) -> DecodeError {
    DecodeError::Incomplete {
        reason: e.to_string(),
    }
}

fn latlon(line: &str, lat: Span, lon: Span) -> Result<LatLon, DecodeError> {
    let (lat, lon) = (lat.extract(line), lon.extract(line));
    let lat = parse_degrees(lat, Axis::Latitude).ok_or_else(|| DecodeError::BadCoordinate {
        field: "latitude",
        value: lat.to_owned(),
    })?;
    let lon = parse_degrees(lon, Axis::Longitude).ok_or_else(|| DecodeError::BadCoordinate {
        field: "longitude",
        value: lon.to_owned(),
    })?;
    Ok(LatLon::new(lat, lon))
}

impl Decoder {
    pub fn new(layout: Layout) -> Self {
        Decoder { layout }
    }

    pub fn decode(&self, kind: Kind, line: &str) -> Decoded {
        let discriminator = match kind {
            Kind::Navaid => &self.layout.navaid.discriminator,
            Kind::Waypoint => &self.layout.waypoint.discriminator,
            Kind::Airport => &self.layout.airport.discriminator,
        };
        if !line.starts_with(discriminator.as_str()) {
            return Decoded::Ignored;
        }

        match kind {
            Kind::Navaid => self.navaid(line),
            Kind::Waypoint => self.waypoint(line),
            Kind::Airport => self.airport(line),
        }
        .into()
    }

    fn navaid(&self, line: &str) -> Result<Record, DecodeError> {
        let l = &self.layout.navaid;
        let mut navaid = NavaidBuilder::default();
        navaid
            .identifier(identifier(line, l.identifier)?)
            .name(l.name.extract(line))
            .facility_type(l.facility_type.extract(line))
            .city(l.city.extract(line))
            .state(l.state.extract(line))
            .latlon(latlon(line, l.latitude, l.longitude)?);
        navaid.build().map(Record::Navaid).map_err(incomplete)
    }

    fn waypoint(&self, line: &str) -> Result<Record, DecodeError> {
        let l = &self.layout.waypoint;
        let mut waypoint = WaypointBuilder::default();
        waypoint
            .identifier(identifier(line, l.identifier)?)
            .state(l.state.extract(line))
            .region(l.region.extract(line))
            .latlon(latlon(line, l.latitude, l.longitude)?);
        waypoint.build().map(Record::Waypoint).map_err(incomplete)
    }

    fn airport(&self, line: &str) -> Result<Record, DecodeError> {
        let l = &self.layout.airport;
        let mut airport = AirportBuilder::default();
        airport
            .identifier(identifier(line, l.identifier)?)
            .name(l.name.extract(line))
            .city(l.city.extract(line))
            .state(l.state.extract(line))
            .facility_type(l.facility_type.extract(line))
            .latlon(latlon(line, l.latitude, l.longitude)?);
        match l.icao.extract(line) {
            "" => (),
            icao => {
                airport.icao(icao.to_ascii_uppercase());
            }
        }
        airport.build().map(Record::Airport).map_err(incomplete)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn decodes_navaid_primary_record() {
        let line = nav1("SEA", "VORTAC", "SEATTLE", "47-26-07.000N", "122-18-35.000W");
        match Decoder::default().decode(Kind::Navaid, &line) {
            Decoded::Record(Record::Navaid(n)) => {
                assert_eq!(n.identifier, "SEA");
                assert_eq!(n.facility_type, "VORTAC");
                assert_eq!(n.name, "SEATTLE");
                assert_eq!(n.state, "WA");
                assert_eq!(n.latlon.rounded(), LatLon::new(47.435278, -122.309722));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn decodes_fix_record() {
        let line = fix1("BANGR", "WASHINGTON", "47-27-45.000N", "122-55-43.000W");
        match Decoder::default().decode(Kind::Waypoint, &line) {
            Decoded::Record(Record::Waypoint(w)) => {
                assert_eq!(w.identifier, "BANGR");
                assert_eq!(w.state, "WASHINGTON");
                assert_eq!(w.region, "K1");
                assert_eq!(w.latlon.rounded(), LatLon::new(47.4625, -122.928611));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn decodes_airport_with_and_without_icao() {
        let d = Decoder::default();
        let line = apt("SEA", "KSEA", "SEATTLE-TACOMA INTL", "47-26-56.1000N", "122-18-32.4000W");
        match d.decode(Kind::Airport, &line) {
            Decoded::Record(Record::Airport(a)) => {
                assert_eq!(a.identifier, "SEA");
                assert_eq!(a.icao.as_deref(), Some("KSEA"));
                assert_eq!(a.city, "SEATTLE");
                assert_eq!(a.facility_type, "AIRPORT");
                assert_eq!(a.latlon.rounded(), LatLon::new(47.448917, -122.309));
            }
            other => panic!("unexpected {:?}", other),
        }

        let line = apt("S43", "", "HARVEY FIELD", "47-54-28.0000N", "122-06-10.0000W");
        match d.decode(Kind::Airport, &line) {
            Decoded::Record(Record::Airport(a)) => assert_eq!(a.icao, None),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn other_record_types_are_ignored() {
        let d = Decoder::default();
        assert_eq!(d.decode(Kind::Navaid, "NAV2SEA VORTAC remarks"), Decoded::Ignored);
        assert_eq!(d.decode(Kind::Airport, "RWY26631.*A 16L/34R"), Decoded::Ignored);
        assert_eq!(d.decode(Kind::Waypoint, ""), Decoded::Ignored);
        let nav = nav1("SEA", "VORTAC", "SEATTLE", "47-26-07.000N", "122-18-35.000W");
        assert_eq!(d.decode(Kind::Waypoint, &nav), Decoded::Ignored);
    }

    #[test]
    fn bad_coordinates_are_malformed() {
        let line = nav1("SEA", "VORTAC", "SEATTLE", "47-26-0?.000N", "122-18-35.000W");
        assert_eq!(
            Decoder::default().decode(Kind::Navaid, &line),
            Decoded::Malformed(DecodeError::BadCoordinate {
                field: "latitude",
                value: "47-26-0?.000N".to_owned()
            })
        );
        let line = fix1("BANGR", "WASHINGTON", "47-27-45.000N", "");
        assert!(matches!(
            Decoder::default().decode(Kind::Waypoint, &line),
            Decoded::Malformed(DecodeError::BadCoordinate { field: "longitude", .. })
        ));
    }

    #[test]
    fn missing_identifier_is_malformed() {
        let line = fix1("", "WASHINGTON", "47-27-45.000N", "122-55-43.000W");
        assert_eq!(
            Decoder::default().decode(Kind::Waypoint, &line),
            Decoded::Malformed(DecodeError::MissingIdentifier)
        );
    }

    #[test]
    fn latin1_names_survive() {
        let mut bytes = nav1("YQB", "VOR/DME", "QUEBEC", "46-47-53.000N", "071-23-26.000W").into_bytes();
        bytes[48] = 0xC9;
        let line = crate::txt_data::decode_line(&bytes);
        match Decoder::default().decode(Kind::Navaid, &line) {
            Decoded::Record(Record::Navaid(n)) => assert_eq!(n.name, "QUEBEC\u{c9}"),
            other => panic!("unexpected {:?}", other),
        }
    }
}

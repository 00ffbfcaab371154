use crate::error::QueryError;
use crate::geo::{self, LatLon};
use crate::model::{Entity, Kind};
use crate::resolve::{resolve, Scope, Token};
use crate::store::{Snapshot, Store};
use serde::{Serialize, Serializer};

/// A point projected from a catalog entity.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Projection {
    pub reference: String,
    #[serde(rename = "type")]
    pub kind: Kind,
    #[serde(rename = "radial", serialize_with = "whole_degrees")]
    pub bearing: f64,
    #[serde(rename = "distance_nm")]
    pub distance: f64,
    #[serde(flatten)]
    pub latlon: LatLon,
}

/// Bearings are validated to [0, 360] before a `Projection` exists.
fn whole_degrees<S: Serializer>(bearing: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if bearing.fract() == 0.0 {
        serializer.serialize_u64(*bearing as u64)
    } else {
        serializer.serialize_f64(*bearing)
    }
}

/// What a bare token resolves to.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Entity(Entity),
    Projection(Projection),
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub navaid_count: usize,
    pub fix_count: usize,
    pub airport_count: usize,
}

/// Read side of the service: every query runs against one snapshot.
#[derive(Debug, Default)]
pub struct Engine {
    store: Store,
}

fn find(snapshot: &Snapshot, scope: Scope, identifier: &str) -> Result<Entity, QueryError> {
    scope
        .search_order()
        .iter()
        .find_map(|&kind| snapshot.get(kind, identifier))
        .ok_or_else(|| QueryError::NotFound {
            what: scope.describe(identifier),
        })
}

fn project_from(
    snapshot: &Snapshot,
    scope: Scope,
    identifier: &str,
    bearing: f64,
    distance: f64,
) -> Result<Projection, QueryError> {
    let reference = find(snapshot, scope, identifier)?;
    let latlon = geo::project(reference.latlon(), bearing, distance)?;
    Ok(Projection {
        reference: reference.identifier().to_owned(),
        kind: reference.kind(),
        bearing,
        distance,
        latlon,
    })
}

impl Engine {
    pub fn new(snapshot: Snapshot) -> Self {
        Engine {
            store: Store::new(snapshot),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn lookup_plain(&self, scope: Scope, identifier: &str) -> Result<Entity, QueryError> {
        let identifier = identifier.trim().to_ascii_uppercase();
        find(&self.store.snapshot(), scope, &identifier)
    }

    /// The identifier is looked up first, so a missing reference reports
    /// `NotFound` even when the bearing or distance is also bad.
    pub fn lookup_projected(
        &self,
        scope: Scope,
        identifier: &str,
        bearing: f64,
        distance: f64,
    ) -> Result<Projection, QueryError> {
        let identifier = identifier.trim().to_ascii_uppercase();
        project_from(&self.store.snapshot(), scope, &identifier, bearing, distance)
    }

    /// Bare token with no explicit bearing/distance. Encoded tokens are
    /// projected when the scope allows them, and their reference is searched
    /// across all catalogs in precedence order.
    pub fn lookup_token(&self, scope: Scope, token: &str) -> Result<Answer, QueryError> {
        let snapshot = self.store.snapshot();
        match resolve(token) {
            Token::Encoded(t) if scope.accepts_encoded() => project_from(
                &snapshot,
                Scope::Any,
                &t.reference,
                f64::from(t.bearing),
                f64::from(t.distance),
            )
            .map(Answer::Projection),
            Token::Encoded(t) => find(&snapshot, scope, &t.to_string()).map(Answer::Entity),
            Token::Plain(id) => find(&snapshot, scope, &id).map(Answer::Entity),
        }
    }

    pub fn health(&self) -> Health {
        let snapshot = self.store.snapshot();
        Health {
            status: "ok",
            navaid_count: snapshot.len(Kind::Navaid),
            fix_count: snapshot.len(Kind::Waypoint),
            airport_count: snapshot.len(Kind::Airport),
        }
    }
}

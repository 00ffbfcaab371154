use crate::catalog::{Catalog, Entry};
use crate::decode::Decoder;
use crate::error::Result;
use crate::model::*;
use crate::zip_util::member_to_pseudofile;
use log::warn;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use zip::ZipArchive;

/// All three catalogs from one consistent set of source files.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub airports: Catalog<Airport>,
    pub navaids: Catalog<Navaid>,
    pub waypoints: Catalog<Waypoint>,
}

impl Snapshot {
    pub fn get(&self, kind: Kind, identifier: &str) -> Option<Entity> {
        match kind {
            Kind::Airport => self.airports.entity(identifier),
            Kind::Navaid => self.navaids.entity(identifier),
            Kind::Waypoint => self.waypoints.entity(identifier),
        }
    }

    pub fn len(&self, kind: Kind) -> usize {
        match kind {
            Kind::Airport => self.airports.len(),
            Kind::Navaid => self.navaids.len(),
            Kind::Waypoint => self.waypoints.len(),
        }
    }
}

/// Where the three TXT files come from.
#[derive(Clone, Debug, PartialEq)]
pub enum Sources {
    Directory(PathBuf),
    Archive(PathBuf),
}

fn load_or_empty<T: Entry, R: BufRead>(reader: Option<R>, decoder: &Decoder) -> Result<Catalog<T>> {
    match reader {
        Some(reader) => Ok(Catalog::load(reader, decoder)?.0),
        None => {
            warn!(
                "{} not found, {} catalog is empty",
                T::KIND.file_name(),
                T::KIND.as_str()
            );
            Ok(Catalog::new())
        }
    }
}

fn open_if_present(path: &Path) -> Result<Option<BufReader<File>>> {
    match File::open(path) {
        Ok(f) => Ok(Some(BufReader::new(f))),
        Err(ref e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Sources {
    /// Builds a fresh snapshot. Missing files give empty catalogs, not errors.
    pub fn load(&self, decoder: &Decoder) -> Result<Snapshot> {
        match self {
            Sources::Directory(dir) => {
                let path = |kind: Kind| dir.join(kind.file_name());
                Ok(Snapshot {
                    airports: load_or_empty(open_if_present(&path(Kind::Airport))?, decoder)?,
                    navaids: load_or_empty(open_if_present(&path(Kind::Navaid))?, decoder)?,
                    waypoints: load_or_empty(open_if_present(&path(Kind::Waypoint))?, decoder)?,
                })
            }
            Sources::Archive(zip) => {
                let mut archive = match open_if_present(zip)? {
                    Some(f) => ZipArchive::new(f)?,
                    None => {
                        warn!("{} not found, all catalogs are empty", zip.display());
                        return Ok(Snapshot::default());
                    }
                };
                let mut member = |kind: Kind| member_to_pseudofile(&mut archive, kind.file_name());
                Ok(Snapshot {
                    airports: load_or_empty(member(Kind::Airport)?, decoder)?,
                    navaids: load_or_empty(member(Kind::Navaid)?, decoder)?,
                    waypoints: load_or_empty(member(Kind::Waypoint)?, decoder)?,
                })
            }
        }
    }
}

/// The snapshot queries read from.
///
/// The lock is only held to clone or replace the `Arc`, so a reload built off
/// to the side never makes a reader wait on parsing, and a reader holding the
/// old snapshot keeps it alive until it is done.
#[derive(Debug, Default)]
pub struct Store {
    current: RwLock<Arc<Snapshot>>,
}

impl Store {
    pub fn new(snapshot: Snapshot) -> Self {
        Store {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replaces all three catalogs at once.
    pub fn publish(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }
}

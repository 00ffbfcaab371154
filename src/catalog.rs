use crate::decode::{Decoded, Decoder, Record};
use crate::error::Result;
use crate::model::*;
use crate::txt_data::DataFile;
use log::{debug, info};
use std::collections::HashMap;
use std::io::BufRead;
use std::sync::Arc;

/// Something that can be stored in a [`Catalog`].
pub trait Entry: Sized {
    const KIND: Kind;

    fn from_record(record: Record) -> Option<Self>;

    fn primary_key(&self) -> &str;

    /// A second key the same record answers to.
    fn alias_key(&self) -> Option<&str> {
        None
    }

    fn into_entity(this: Arc<Self>) -> Entity;
}

impl Entry for Navaid {
    const KIND: Kind = Kind::Navaid;

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Navaid(n) => Some(n),
            _ => None,
        }
    }

    fn primary_key(&self) -> &str {
        &self.identifier
    }

    fn into_entity(this: Arc<Self>) -> Entity {
        Entity::Navaid(this)
    }
}

impl Entry for Waypoint {
    const KIND: Kind = Kind::Waypoint;

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Waypoint(w) => Some(w),
            _ => None,
        }
    }

    fn primary_key(&self) -> &str {
        &self.identifier
    }

    fn into_entity(this: Arc<Self>) -> Entity {
        Entity::Waypoint(this)
    }
}

impl Entry for Airport {
    const KIND: Kind = Kind::Airport;

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Airport(a) => Some(a),
            _ => None,
        }
    }

    fn primary_key(&self) -> &str {
        &self.identifier
    }

    fn alias_key(&self) -> Option<&str> {
        self.icao.as_deref().filter(|icao| !icao.is_empty())
    }

    fn into_entity(this: Arc<Self>) -> Entity {
        Entity::Airport(this)
    }
}

/// Per-file load counters, for the log only.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadStats {
    pub loaded: usize,
    pub ignored: usize,
    pub malformed: usize,
}

/// Identifier-keyed mapping of one entity kind. Keys are stored uppercase.
#[derive(Debug)]
pub struct Catalog<T> {
    entries: HashMap<String, Arc<T>>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Catalog {
            entries: HashMap::new(),
        }
    }
}

impl<T: Entry> Catalog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `entry` under its primary key and alias. Later inserts win.
    pub fn insert(&mut self, entry: T) {
        let entry = Arc::new(entry);
        if let Some(alias) = entry.alias_key() {
            self.entries
                .insert(alias.to_ascii_uppercase(), Arc::clone(&entry));
        }
        self.entries
            .insert(entry.primary_key().to_ascii_uppercase(), entry);
    }

    pub fn get(&self, identifier: &str) -> Option<&Arc<T>> {
        self.entries.get(&identifier.to_ascii_uppercase())
    }

    pub fn entity(&self, identifier: &str) -> Option<Entity> {
        self.get(identifier).cloned().map(T::into_entity)
    }

    /// Number of keys, aliases included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decodes every line of `reader` into a new catalog.
    pub fn load<R: BufRead>(reader: R, decoder: &Decoder) -> Result<(Self, LoadStats)> {
        let mut catalog = Catalog::new();
        let mut stats = LoadStats::default();
        let mut file = DataFile::from_reader(reader);
        let mut line_no = 0usize;

        while let Some(line) = file.next_line()? {
            line_no += 1;
            match decoder.decode(T::KIND, &line) {
                Decoded::Record(record) => {
                    if let Some(entry) = T::from_record(record) {
                        catalog.insert(entry);
                        stats.loaded += 1;
                    }
                }
                Decoded::Ignored => stats.ignored += 1,
                Decoded::Malformed(e) => {
                    debug!("{} line {}: {}, skipping", T::KIND.file_name(), line_no, e);
                    stats.malformed += 1;
                }
            }
        }

        info!(
            "Loaded {} {} records ({} keys, {} malformed lines skipped)",
            stats.loaded,
            T::KIND.as_str(),
            catalog.len(),
            stats.malformed
        );
        Ok((catalog, stats))
    }
}

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    departures::model::DepartureQuery,
    foundation::error::{BoardError, BoardResult},
};

/// Supplier of raw departure records, one call per (station, direction).
///
/// Implementations never block on the board's behalf: they hand back already
/// resolved data or an error.
pub trait DepartureSource {
    fn fetch(&mut self, query: &DepartureQuery) -> BoardResult<Vec<serde_json::Value>>;
}

impl<F> DepartureSource for F
where
    F: FnMut(&DepartureQuery) -> BoardResult<Vec<serde_json::Value>>,
{
    fn fetch(&mut self, query: &DepartureQuery) -> BoardResult<Vec<serde_json::Value>> {
        self(query)
    }
}

/// In-memory feeds keyed by station id and direction.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    feeds: HashMap<(String, Option<String>), Vec<serde_json::Value>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(
        mut self,
        station_id: impl Into<String>,
        direction: Option<&str>,
        records: Vec<serde_json::Value>,
    ) -> Self {
        self.insert(station_id, direction, records);
        self
    }

    pub fn insert(
        &mut self,
        station_id: impl Into<String>,
        direction: Option<&str>,
        records: Vec<serde_json::Value>,
    ) {
        self.feeds
            .insert((station_id.into(), direction.map(str::to_string)), records);
    }
}

impl DepartureSource for StaticSource {
    fn fetch(&mut self, query: &DepartureQuery) -> BoardResult<Vec<serde_json::Value>> {
        let key = (query.station_id.clone(), query.direction.clone());
        let records = self.feeds.get(&key).ok_or_else(|| {
            BoardError::source(format!(
                "no feed for station '{}' direction {:?}",
                query.station_id, query.direction
            ))
        })?;
        Ok(admit(records.iter().cloned(), query))
    }
}

/// Feeds stored as JSON files: `DIR/<station-id>.json` or
/// `DIR/<station-id>_<direction>.json`, each either a bare array of records or
/// an object with a `departures` array.
#[derive(Clone, Debug)]
pub struct FeedDirSource {
    dir: PathBuf,
}

impl FeedDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, query: &DepartureQuery) -> PathBuf {
        let name = match &query.direction {
            Some(direction) => format!("{}_{}.json", query.station_id, direction),
            None => format!("{}.json", query.station_id),
        };
        self.dir.join(name)
    }
}

impl DepartureSource for FeedDirSource {
    fn fetch(&mut self, query: &DepartureQuery) -> BoardResult<Vec<serde_json::Value>> {
        let path = self.path_for(query);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read departure feed '{}'", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("parse departure feed '{}'", path.display()))?;
        let records = match value {
            serde_json::Value::Array(items) => items,
            serde_json::Value::Object(mut obj) => match obj.remove("departures") {
                Some(serde_json::Value::Array(items)) => items,
                _ => {
                    return Err(BoardError::source(format!(
                        "feed '{}' has no departures array",
                        path.display()
                    )));
                }
            },
            _ => {
                return Err(BoardError::source(format!(
                    "feed '{}' must be an array or an object",
                    path.display()
                )));
            }
        };
        Ok(admit(records.into_iter(), query))
    }
}

/// Keeps records whose product the query asks for.
///
/// The `results` cap is not applied here: it counts departures inside the
/// time window, which is only known after conversion.
fn admit(
    records: impl Iterator<Item = serde_json::Value>,
    query: &DepartureQuery,
) -> Vec<serde_json::Value> {
    records
        .filter(|record| record_product(record).is_none_or(|p| query.products.contains(p)))
        .collect()
}

/// The line's product, else the top-level one.
fn record_product(record: &serde_json::Value) -> Option<&str> {
    record
        .pointer("/line/product")
        .and_then(serde_json::Value::as_str)
        .or_else(|| record.get("product").and_then(serde_json::Value::as_str))
}

#[cfg(test)]
#[path = "../../tests/unit/departures/source.rs"]
mod tests;

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

use crate::departures::{
    model::{Departure, RawDeparture, Station},
    source::DepartureSource,
};

/// Ordered `(pattern, replacement)` rewrites applied to direction names, followed
/// by whitespace collapsing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")]
pub struct DirectionFilter {
    pairs: Vec<(String, String)>,
}

impl Default for DirectionFilter {
    fn default() -> Self {
        Self::new(
            [
                ("Schienenersatzverkehr", "SEV"),
                ("Ersatzverkehr", "EV"),
                ("(Berlin)", ""),
                ("Bhf", ""),
                ("Flughafen BER", "BER"),
            ]
            .into_iter()
            .map(|(p, r)| (p.to_string(), r.to_string()))
            .collect(),
        )
    }
}

impl DirectionFilter {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn apply(&self, direction: &str) -> String {
        let mut out = direction.to_string();
        for (pattern, replacement) in &self.pairs {
            if !pattern.is_empty() {
                out = out.replace(pattern.as_str(), replacement);
            }
        }
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl From<Vec<(String, String)>> for DirectionFilter {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

impl From<DirectionFilter> for Vec<(String, String)> {
    fn from(filter: DirectionFilter) -> Self {
        filter.pairs
    }
}

/// Fractional minutes from `now` until `when`.
///
/// `when` is RFC 3339; a timestamp without offset is read in `now`'s offset.
pub fn minutes_until(when: &str, now: DateTime<FixedOffset>) -> Option<f64> {
    let at = match DateTime::parse_from_rfc3339(when) {
        Ok(at) => at,
        Err(_) => {
            let naive = NaiveDateTime::parse_from_str(when, "%Y-%m-%dT%H:%M:%S").ok()?;
            now.offset().from_local_datetime(&naive).single()?
        }
    };
    Some((at - now).num_milliseconds() as f64 / 60_000.0)
}

/// Converts one record; `None` when it carries no usable time or falls outside
/// the station's `[min_time, max_time]` window.
pub fn convert_record(
    record: &serde_json::Value,
    station: &Station,
    now: DateTime<FixedOffset>,
    filter: &DirectionFilter,
) -> Option<Departure> {
    let raw: RawDeparture = match serde_json::from_value(record.clone()) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::debug!(%err, "malformed departure record skipped");
            return None;
        }
    };
    let Some(minutes) = raw.when.as_deref().and_then(|w| minutes_until(w, now)) else {
        tracing::debug!(trip = ?raw.trip_id, "departure without parseable time skipped");
        return None;
    };
    if minutes < station.min_time || minutes > station.max_time {
        tracing::debug!(trip = ?raw.trip_id, minutes, "departure outside time window skipped");
        return None;
    }

    let line = raw
        .line
        .as_ref()
        .and_then(|l| l.id.clone().or_else(|| l.name.clone()))
        .unwrap_or_default();
    Some(Departure {
        id: raw.trip_id.clone(),
        product: raw.product().unwrap_or_default().to_string(),
        line,
        direction: filter.apply(raw.direction.as_deref().unwrap_or_default()),
        minutes_until_departure: minutes,
        delay: raw.delay,
        reachable: minutes > station.time_needed,
    })
}

pub fn convert_records(
    records: &[serde_json::Value],
    station: &Station,
    now: DateTime<FixedOffset>,
    filter: &DirectionFilter,
) -> Vec<Departure> {
    records
        .iter()
        .filter_map(|r| convert_record(r, station, now, filter))
        .collect()
}

/// Concatenates the lists in the given order.
pub fn merge(lists: impl IntoIterator<Item = Vec<Departure>>) -> Vec<Departure> {
    lists.into_iter().flatten().collect()
}

/// Drops repeated trip ids, first occurrence wins. Departures without an id are kept.
pub fn dedup_by_id(departures: Vec<Departure>) -> Vec<Departure> {
    let mut seen = HashSet::new();
    departures
        .into_iter()
        .filter(|d| match &d.id {
            Some(id) => seen.insert(id.clone()),
            None => true,
        })
        .collect()
}

/// Stable ascending sort by minutes until departure.
pub fn sort_by_time(departures: &mut [Departure]) {
    departures.sort_by(|a, b| a.minutes_until_departure.total_cmp(&b.minutes_until_departure));
}

/// Merge, de-duplicate and sort in one pass over all lists of a station.
pub fn order_departures(lists: impl IntoIterator<Item = Vec<Departure>>) -> Vec<Departure> {
    let mut out = dedup_by_id(merge(lists));
    sort_by_time(&mut out);
    out
}

/// Exactly `slots` entries: surplus departures are dropped, missing ones are `None`.
pub fn fill_slots(departures: Vec<Departure>, slots: usize) -> Vec<Option<Departure>> {
    let mut out: Vec<Option<Departure>> = departures.into_iter().take(slots).map(Some).collect();
    out.resize(slots, None);
    out
}

/// Fetches every query of `station`, then converts, merges, de-duplicates and
/// sorts the results.
///
/// Each query keeps at most `results` departures from inside the time window.
///
/// A failing query is logged and contributes nothing. `None` when every query
/// failed, so the caller can tell "no data" from "no departures".
pub fn station_departures(
    station: &Station,
    source: &mut dyn DepartureSource,
    now: DateTime<FixedOffset>,
    filter: &DirectionFilter,
) -> Option<Vec<Departure>> {
    let queries = station.queries(now.time());
    let mut lists = Vec::with_capacity(queries.len());
    for query in &queries {
        match source.fetch(query) {
            Ok(records) => {
                let mut list = convert_records(&records, station, now, filter);
                list.truncate(query.results);
                lists.push(list);
            }
            Err(err) => tracing::warn!(
                station = %station.id,
                direction = ?query.direction,
                %err,
                "departure fetch failed"
            ),
        }
    }
    if lists.is_empty() {
        return None;
    }
    Some(order_departures(lists))
}

#[cfg(test)]
#[path = "../../tests/unit/departures/pipeline.rs"]
mod tests;

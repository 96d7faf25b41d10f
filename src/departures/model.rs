use chrono::NaiveTime;

use crate::foundation::error::{BoardError, BoardResult};

/// One upcoming departure, rebuilt every refresh cycle.
///
/// Ordered by `minutes_until_departure`; identified by `id` (the trip id).
#[derive(Clone, Debug, PartialEq)]
pub struct Departure {
    pub id: Option<String>,
    pub line: String,
    pub direction: String,
    pub minutes_until_departure: f64,
    pub delay: Option<f64>,
    pub product: String,
    pub reachable: bool,
}

impl Departure {
    /// Whole minutes left, rounded down.
    pub fn minutes_text(&self) -> String {
        format!("{}", self.minutes_until_departure.floor() as i64)
    }
}

/// Loosely typed departure record as delivered by a feed.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeparture {
    #[serde(default)]
    pub trip_id: Option<String>,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub delay: Option<f64>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub line: Option<RawLine>,
    #[serde(default)]
    pub product: Option<String>,
}

impl RawDeparture {
    /// Product of the record: the line's product, else the top-level one.
    pub fn product(&self) -> Option<&str> {
        self.line
            .as_ref()
            .and_then(|l| l.product.as_deref())
            .or(self.product.as_deref())
    }
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct RawLine {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
}

/// Transport products requested from a feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Products {
    pub suburban: bool,
    pub subway: bool,
    pub tram: bool,
    pub bus: bool,
    pub ferry: bool,
    pub express: bool,
    pub regional: bool,
}

impl Products {
    pub const ALL: Self = Self {
        suburban: true,
        subway: true,
        tram: true,
        bus: true,
        ferry: true,
        express: true,
        regional: true,
    };

    /// Unknown product names are always admitted.
    pub fn contains(&self, product: &str) -> bool {
        match product {
            "suburban" => self.suburban,
            "subway" => self.subway,
            "tram" => self.tram,
            "bus" => self.bus,
            "ferry" => self.ferry,
            "express" => self.express,
            "regional" => self.regional,
            _ => true,
        }
    }
}

/// Static station configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Station {
    pub name: String,
    pub id: String,
    /// Direction station ids; empty means one undirected query.
    #[serde(default)]
    pub directions: Vec<String>,
    pub departure_rows: usize,
    pub departure_cols: usize,
    pub day: Products,
    pub night: Products,
    pub night_start: NaiveTime,
    pub night_stop: NaiveTime,
    /// Minutes.
    pub min_time: f64,
    pub max_time: f64,
    pub time_needed: f64,
}

impl Station {
    pub fn validate(&self) -> BoardResult<()> {
        if self.id.trim().is_empty() {
            return Err(BoardError::validation(format!(
                "station '{}' id must be non-empty",
                self.name
            )));
        }
        if self.departure_rows == 0 || self.departure_cols == 0 {
            return Err(BoardError::validation(format!(
                "station '{}' needs at least one departure row and column",
                self.name
            )));
        }
        for (label, v) in [
            ("min_time", self.min_time),
            ("max_time", self.max_time),
            ("time_needed", self.time_needed),
        ] {
            if !v.is_finite() {
                return Err(BoardError::validation(format!(
                    "station '{}' {label} must be finite",
                    self.name
                )));
            }
        }
        if self.min_time > self.max_time {
            return Err(BoardError::validation(format!(
                "station '{}' min_time must be <= max_time",
                self.name
            )));
        }
        if self.directions.iter().any(|d| d.trim().is_empty()) {
            return Err(BoardError::validation(format!(
                "station '{}' has an empty direction",
                self.name
            )));
        }
        Ok(())
    }

    pub fn slots(&self) -> usize {
        self.departure_rows * self.departure_cols
    }

    pub fn night_service_active(&self, time: NaiveTime) -> bool {
        time_is_between(self.night_start, time, self.night_stop)
    }

    pub fn products_at(&self, time: NaiveTime) -> Products {
        if self.night_service_active(time) {
            self.night
        } else {
            self.day
        }
    }

    /// One query per configured direction, or a single undirected one.
    pub fn queries(&self, time: NaiveTime) -> Vec<DepartureQuery> {
        let products = self.products_at(time);
        let query = |direction: Option<String>| DepartureQuery {
            station_id: self.id.clone(),
            direction,
            products,
            min_time: self.min_time,
            max_time: self.max_time,
            results: self.slots(),
        };
        if self.directions.is_empty() {
            vec![query(None)]
        } else {
            self.directions.iter().cloned().map(Some).map(query).collect()
        }
    }
}

/// Request for one (station, direction) feed.
#[derive(Clone, Debug, PartialEq)]
pub struct DepartureQuery {
    pub station_id: String,
    pub direction: Option<String>,
    pub products: Products,
    pub min_time: f64,
    pub max_time: f64,
    pub results: usize,
}

/// True when `time` lies strictly inside `(start, stop)`, wrapping past midnight
/// when `stop` is not after `start`.
pub fn time_is_between(start: NaiveTime, time: NaiveTime, stop: NaiveTime) -> bool {
    let after_start = start < time;
    let before_stop = time < stop;
    if start < stop {
        after_start && before_stop
    } else {
        after_start || before_stop
    }
}

#[cfg(test)]
#[path = "../../tests/unit/departures/model.rs"]
mod tests;

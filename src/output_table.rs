//! Time-indexed simulation output table.
//!
//! The external simulator produces one row per model time step and an
//! open-ended set of named columns. This crate only interprets a handful of
//! them (`Discharge`, `fountain_froze`, `melted`, `iceV`); everything else
//! passes through to the presentation layer untouched.

use crate::error::{IcestupaError, Result};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Header of the row-timestamp column in exported tables.
pub const TIME_COLUMN: &str = "time";

/// Timestamp format used by the simulator's table exports.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column-major store of the simulator's output, read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutputTable {
    rows: usize,
    /// Row timestamps; empty when the source carried no time column.
    times: Vec<NaiveDateTime>,
    /// Column order as it appeared in the source.
    names: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
}

impl SimulationOutputTable {
    /// Build a table from named, equal-length columns.
    pub fn new(columns: Vec<(&str, Vec<f64>)>) -> Result<SimulationOutputTable> {
        let rows = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        let mut names = Vec::with_capacity(columns.len());
        let mut map = HashMap::new();
        for (name, values) in columns {
            if values.len() != rows {
                return Err(IcestupaError::Malformed {
                    what: "output table",
                    details: format!(
                        "column '{}' has {} rows, expected {}",
                        name,
                        values.len(),
                        rows
                    ),
                });
            }
            names.push(name.to_string());
            map.insert(name.to_string(), values);
        }
        Ok(SimulationOutputTable {
            rows,
            times: Vec::new(),
            names,
            columns: map,
        })
    }

    /// Parse a CSV export of the simulator's output table.
    ///
    /// A `time` column, when present, becomes the row timestamps; every
    /// other column must be numeric. Empty cells read as NaN, matching the
    /// gaps the simulator leaves in derived columns.
    pub fn from_csv<R: Read>(reader: R) -> Result<SimulationOutputTable> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(|e| IcestupaError::Malformed {
                what: "output table csv",
                details: e.to_string(),
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let time_idx = headers.iter().position(|h| h == TIME_COLUMN);
        let names: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != time_idx)
            .map(|(_, h)| h.clone())
            .collect();

        let mut times = Vec::new();
        let mut columns: HashMap<String, Vec<f64>> =
            names.iter().map(|n| (n.clone(), Vec::new())).collect();

        for (row, record) in csv_reader.records().enumerate() {
            let record = record.map_err(|e| IcestupaError::Malformed {
                what: "output table csv",
                details: format!("row {}: {}", row + 1, e),
            })?;
            if record.len() != headers.len() {
                return Err(IcestupaError::Malformed {
                    what: "output table csv",
                    details: format!(
                        "row {}: {} fields, expected {}",
                        row + 1,
                        record.len(),
                        headers.len()
                    ),
                });
            }
            for (i, field) in record.iter().enumerate() {
                if Some(i) == time_idx {
                    let t = NaiveDateTime::parse_from_str(field.trim(), TIME_FORMAT)
                        .map_err(|e| IcestupaError::Malformed {
                            what: "output table csv",
                            details: format!("row {}: bad timestamp '{}': {}", row + 1, field, e),
                        })?;
                    times.push(t);
                } else {
                    let value = if field.trim().is_empty() {
                        f64::NAN
                    } else {
                        field.trim().parse::<f64>().map_err(|_| {
                            IcestupaError::Malformed {
                                what: "output table csv",
                                details: format!(
                                    "row {}: non-numeric value '{}' in column '{}'",
                                    row + 1,
                                    field,
                                    headers[i]
                                ),
                            }
                        })?
                    };
                    columns.get_mut(&headers[i]).unwrap().push(value);
                }
            }
        }

        let rows = names
            .first()
            .map(|n| columns[n].len())
            .unwrap_or(times.len());
        Ok(SimulationOutputTable {
            rows,
            times,
            names,
            columns,
        })
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<SimulationOutputTable> {
        let content = fs::read_to_string(&path).map_err(|e| IcestupaError::Malformed {
            what: "output table csv",
            details: format!("{}: {}", path.as_ref().display(), e),
        })?;
        Self::from_csv(content.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Column names in source order, time column excluded.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Series for `name`, or `MissingField` naming the absent column.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .get(name)
            .map(|v| v.as_slice())
            .ok_or_else(|| IcestupaError::MissingField(name.to_string()))
    }
}

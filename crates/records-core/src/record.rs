//! The record model and its line encoding.

use crate::config::PathsConfig;
use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One stored `(id, name, age)` tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

impl Record {
    /// Build a record, rejecting non-positive numbers, blank names and names
    /// spanning more than one line.
    ///
    /// Names are not escaped: a name containing the field delimiter is
    /// accepted but will not parse back as a single record.
    pub fn new(id: i64, name: impl Into<String>, age: i64) -> Result<Self> {
        let name = name.into();
        if id <= 0 {
            return Err(StoreError::validation("id", "must be a positive integer"));
        }
        if age <= 0 {
            return Err(StoreError::validation("age", "must be a positive integer"));
        }
        if name.trim().is_empty() {
            return Err(StoreError::validation("name", "must not be empty"));
        }
        if name.contains(['\n', '\r']) {
            return Err(StoreError::validation("name", "must not contain a line break"));
        }
        Ok(Self { id, name, age })
    }

    /// Encode as a data-file line (without line ending).
    pub fn to_line(&self) -> String {
        self.to_string()
    }

    /// Parse a data-file line of exactly three fields.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut fields = line.split(PathsConfig::FIELD_DELIMITER);
        let id = fields.next()?.trim().parse().ok()?;
        let name = fields.next()?.to_string();
        let age = fields.next()?.trim().parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(Self { id, name, age })
    }

    /// The seed set written when a store is initialized for the first time.
    pub fn seed() -> Vec<Record> {
        vec![
            Record {
                id: 1,
                name: "Ghias".to_string(),
                age: 30,
            },
            Record {
                id: 2,
                name: "Riaz".to_string(),
                age: 25,
            },
            Record {
                id: 3,
                name: "Ahmed".to_string(),
                age: 40,
            },
        ]
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = PathsConfig::FIELD_DELIMITER;
        write!(f, "{}{d}{}{d}{}", self.id, self.name, self.age)
    }
}

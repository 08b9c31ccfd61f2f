//! Index entries: `name,id` lines derived from `id,name,...` data lines.

use crate::config::PathsConfig;
use std::fmt;

/// One `(name, id)` pair of the name index.
///
/// The id is kept as the text found in the data file so that lookups resolve
/// against exactly what was stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexEntry {
    pub name: String,
    pub id: String,
}

impl IndexEntry {
    /// Derive the entry for a data line.
    ///
    /// Returns `None` for lines with fewer than two fields.
    pub fn from_data_line(line: &str) -> Option<Self> {
        let mut fields = line.split(PathsConfig::FIELD_DELIMITER);
        let id = fields.next()?;
        let name = fields.next()?;
        Some(Self {
            name: name.to_string(),
            id: id.to_string(),
        })
    }

    /// Encode as an index-file line (without line ending).
    pub fn to_line(&self) -> String {
        self.to_string()
    }

    /// The id referenced by an index line if the line is keyed by `name`.
    ///
    /// An index line matches when it starts with `name` followed by the
    /// delimiter; the id is the field after it.
    pub fn id_for<'a>(line: &'a str, name: &str) -> Option<&'a str> {
        let rest = line
            .strip_prefix(name)?
            .strip_prefix(PathsConfig::FIELD_DELIMITER)?;
        rest.split(PathsConfig::FIELD_DELIMITER).next()
    }
}

impl fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, PathsConfig::FIELD_DELIMITER, self.id)
    }
}

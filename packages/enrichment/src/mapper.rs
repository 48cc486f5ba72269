//! Schema normalization for input tables.
//!
//! Operators export contact lists from different CRMs, so headers arrive
//! with arbitrary casing and spacing ("first name", "FirstName",
//! "First  Name"). Mapping is tolerant of that but strict about coverage:
//! a single missing required column fails the whole batch before any row
//! is processed.

use csv::StringRecord;

use crate::error::{EnrichmentError, Result};
use crate::types::ContactRecord;

/// Canonical required columns, in required order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "First Name",
    "Last Name",
    "Email",
    "Website",
    "Title",
    "Person Linkedin URL",
];

/// Lowercase and strip all whitespace, the equivalence under which headers
/// are matched.
fn normalize_header(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Resolved mapping from required fields to actual column indices.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    indices: [usize; 6],
}

impl ColumnMap {
    /// Resolve the six required columns against actual headers.
    ///
    /// Pure: no table data is touched. Fails with
    /// [`EnrichmentError::MissingColumn`] naming the first required field
    /// that has no match; extra columns are ignored.
    pub fn resolve(headers: &StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

        let mut indices = [0usize; 6];
        for (slot, required) in REQUIRED_COLUMNS.iter().enumerate() {
            let wanted = normalize_header(required);
            match normalized.iter().position(|h| *h == wanted) {
                Some(idx) => indices[slot] = idx,
                None => {
                    return Err(EnrichmentError::MissingColumn {
                        field: required.to_string(),
                    })
                }
            }
        }

        Ok(Self { indices })
    }

    /// Project one row onto the required fields.
    pub fn contact(&self, row: &StringRecord) -> ContactRecord {
        let field = |slot: usize| row.get(self.indices[slot]).unwrap_or("").trim().to_string();

        ContactRecord {
            first_name: field(0),
            last_name: field(1),
            email: field(2),
            website: field(3),
            title: field(4),
            profile_url: field(5),
        }
    }
}

/// Normalize a whole table: resolve columns once, then project every row.
/// The output contains only the required columns, in required order.
pub fn map_contacts(headers: &StringRecord, rows: &[StringRecord]) -> Result<Vec<ContactRecord>> {
    let map = ColumnMap::resolve(headers)?;
    Ok(rows.iter().map(|row| map.contact(row)).collect())
}

/// Read contacts from a CSV file, normalizing headers.
pub fn read_contacts(path: impl AsRef<std::path::Path>) -> Result<Vec<ContactRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let rows: Vec<StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;
    map_contacts(&headers, &rows)
}

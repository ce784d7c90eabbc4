//! `history.cursor` interpretation

use crate::error::{Error, Result};
use crate::types::{Row, Table, Value};

/// Reserved name of the per-page bookkeeping table
pub const CURSOR_TABLE: &str = "history.cursor";

/// Bookkeeping reported by one cursor-bearing page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Offset the page started at
    pub index: u64,
    /// Row count of the whole result across all pages
    pub total: u64,
    /// Number of rows in this page
    pub page_size: u64,
}

impl Cursor {
    /// Read the single cursor row of a cursor table
    pub fn from_table(table: &Table) -> Result<Self> {
        match table.as_slice() {
            [row] => Self::from_row(row),
            rows => Err(Error::invalid_cursor(format!(
                "expected exactly one row, got {}",
                rows.len()
            ))),
        }
    }

    /// Read a cursor row
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            index: field(row, "INDEX")?,
            total: field(row, "TOTAL")?,
            page_size: field(row, "PAGESIZE")?,
        })
    }

    /// Check whether rows remain after this page
    pub fn has_more(&self) -> bool {
        self.index.saturating_add(self.page_size) < self.total
    }
}

fn field(row: &Row, name: &str) -> Result<u64> {
    row.get(name)
        .and_then(Value::as_i64)
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(|| Error::invalid_cursor(format!("{name} is missing or not a count: {row:?}")))
}

/// Size of the next block to request, or 0 when this page was the last
///
/// Fails when the cursor table does not hold exactly one row or when the
/// server reports a block other than the one that was requested.
pub fn next_block_size(expected_start: u64, cursor_table: &Table) -> Result<u64> {
    let cursor = Cursor::from_table(cursor_table)?;

    if cursor.index != expected_start {
        return Err(Error::invalid_cursor(format!(
            "INDEX {} does not match requested start {expected_start}",
            cursor.index
        )));
    }

    if expected_start.saturating_add(cursor.page_size) < cursor.total {
        Ok(cursor.page_size)
    } else {
        Ok(0)
    }
}

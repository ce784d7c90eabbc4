//! Table extraction and aggregation helpers

use crate::error::{Error, Result};
use crate::types::{Table, TablesDict};

/// Borrow a named table
pub fn extract<'a>(tables: &'a TablesDict, name: &str) -> Result<&'a Table> {
    tables.get(name).ok_or_else(|| Error::missing_table(name))
}

/// Move a named table out of the result
pub fn take_table(mut tables: TablesDict, name: &str) -> Result<Table> {
    tables
        .shift_remove(name)
        .ok_or_else(|| Error::missing_table(name))
}

/// Append every table of `page` to the same-named table of `all`
pub fn merge_into(all: &mut TablesDict, page: TablesDict) {
    for (name, rows) in page {
        all.entry(name).or_default().extend(rows);
    }
}

//! Pagination types and page-step logic

use super::cursor::{next_block_size, CURSOR_TABLE};
use crate::error::{Error, Result};
use crate::types::{Table, TablesDict};

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// More rows remain, starting at this offset
    Continue {
        /// Offset to request next
        start: u64,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Optional guards on a pagination sequence
///
/// The default applies none of them: a cursor-less sequence runs until the
/// server returns an empty table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Fail once more than this many pages would be fetched
    pub max_pages: Option<usize>,
    /// Cursor-less pages shorter than this end the sequence
    pub page_size_hint: Option<u64>,
}

impl PaginationConfig {
    /// Create a config with no guards
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page limit
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Set the expected full page size for cursor-less responses
    #[must_use]
    pub fn with_page_size_hint(mut self, page_size: u64) -> Self {
        self.page_size_hint = Some(page_size);
        self
    }
}

/// Tracks progress of one pagination sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Offset of the next page to fetch
    pub start: u64,
    /// Pages fetched so far
    pub pages: usize,
    /// Rows yielded so far, cursor tables excluded
    pub rows: u64,
}

impl PaginationState {
    /// Create a state positioned at the first row
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page
    pub fn record_page(&mut self, page: &TablesDict) {
        self.pages += 1;
        self.rows += page.values().map(|t| t.len() as u64).sum::<u64>();
    }

    /// Check whether fetching another page would break the page limit
    pub fn limit_reached(&self, config: &PaginationConfig) -> bool {
        config.max_pages.is_some_and(|max| self.pages >= max)
    }
}

/// Remove the cursor table from a page, returning it
pub fn take_cursor(page: &mut TablesDict) -> Option<Table> {
    page.shift_remove(CURSOR_TABLE)
}

/// Decide where the page after `page` starts
///
/// `cursor` is the cursor table already removed from `page`, if the
/// response carried one.
pub fn next_page(
    start: u64,
    cursor: Option<&Table>,
    page: &TablesDict,
    config: &PaginationConfig,
) -> Result<NextPage> {
    let block_size = match cursor {
        Some(table) => next_block_size(start, table)?,
        None => cursorless_block_size(page, config)?,
    };

    if block_size == 0 {
        Ok(NextPage::Done)
    } else {
        Ok(NextPage::Continue {
            start: start + block_size,
        })
    }
}

fn cursorless_block_size(page: &TablesDict, config: &PaginationConfig) -> Result<u64> {
    let mut tables = page.values();
    let table = match (tables.next(), tables.next()) {
        (Some(table), None) => table,
        _ => {
            return Err(Error::decode(format!(
                "expected exactly one table in a response without {CURSOR_TABLE}, got {}",
                page.len()
            )))
        }
    };

    let len = table.len() as u64;
    match config.page_size_hint {
        Some(hint) if len < hint => Ok(0),
        _ => Ok(len),
    }
}

//! Pagination module
//!
//! # Overview
//!
//! ISS splits long results into numbered blocks and uses two response
//! shapes to describe them:
//!
//! - **Cursor-bearing**: a reserved `history.cursor` table reports the
//!   block's starting index, its size, and the grand total.
//! - **Cursor-less**: a single table is returned, and an empty table at the
//!   next offset marks the end.
//!
//! This module decides, page by page, where the next block starts.

mod cursor;
mod types;

pub use cursor::{next_block_size, Cursor, CURSOR_TABLE};
pub use types::{next_page, take_cursor, NextPage, PaginationConfig, PaginationState};

//! Response decoder module
//!
//! # Overview
//!
//! ISS answers every `iss.json=extended` request with a two-element JSON
//! array: a metadata object followed by an object mapping table names to
//! arrays of rows. The decoder drops the metadata and returns the tables.

mod envelope;

pub use envelope::{decode_envelope, Envelope};

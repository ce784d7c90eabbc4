//! Extended JSON envelope decoding

use crate::error::{Error, Result};
use crate::types::TablesDict;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

/// The `[metadata, tables]` pair returned by ISS
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope(pub Map<String, JsonValue>, pub TablesDict);

impl Envelope {
    /// Parse an envelope from a response body
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::decode(format!("Invalid ISS envelope: {e}")))
    }

    /// Discard the metadata and keep the tables
    pub fn into_tables(self) -> TablesDict {
        self.1
    }
}

/// Decode a response body into its tables
pub fn decode_envelope(body: &str) -> Result<TablesDict> {
    Envelope::parse(body).map(Envelope::into_tables)
}

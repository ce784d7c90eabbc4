//! Common types used throughout the ISS client
//!
//! This module contains the data model of decoded ISS responses
//! and the query parameter types passed to the paginating client.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Cell Values
// ============================================================================

/// A single cell of an ISS table
///
/// ISS extended JSON only carries strings and numbers in rows; absent
/// values come through as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// JSON `null`
    Null,
    /// Integer cell
    Int(i64),
    /// Floating point cell
    Float(f64),
    /// String cell
    Str(String),
}

impl Value {
    /// Get the integer value, if this cell holds one
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the numeric value as f64 (integers are widened)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the string value, if this cell holds one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Check for `null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

// ============================================================================
// Tables
// ============================================================================

/// One record: column name to cell, in server column order
pub type Row = IndexMap<String, Value>;

/// Rows of one named table
pub type Table = Vec<Row>;

/// All tables of one response (or of an aggregated request), keyed by name
pub type TablesDict = IndexMap<String, Table>;

// ============================================================================
// Query Parameters
// ============================================================================

/// Value of a query parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// Integer parameter
    Int(i64),
    /// String parameter
    Str(String),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Int(i) => write!(f, "{i}"),
            QueryValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Int(i64::from(value))
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

/// Query parameters of one logical request
pub type Query = IndexMap<String, QueryValue>;

// ============================================================================
// Backoff Type
// ============================================================================

/// Backoff strategy for transport-level retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_deserialize() {
        let row: Row =
            serde_json::from_str(r#"{"SECID": "SBER", "LOTSIZE": 10, "CLOSE": 301.5, "VALUE": null}"#)
                .unwrap();

        assert_eq!(row["SECID"], Value::Str("SBER".to_string()));
        assert_eq!(row["LOTSIZE"], Value::Int(10));
        assert_eq!(row["CLOSE"], Value::Float(301.5));
        assert!(row["VALUE"].is_null());

        let columns: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(columns, vec!["SECID", "LOTSIZE", "CLOSE", "VALUE"]);
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Int(7).as_i64(), Some(7));
        assert_eq!(Value::Int(7).as_f64(), Some(7.0));
        assert_eq!(Value::Float(1.5).as_i64(), None);
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_query_value_display() {
        assert_eq!(QueryValue::from(24_i64).to_string(), "24");
        assert_eq!(QueryValue::from("on").to_string(), "on");
    }

    #[test]
    fn test_backoff_type_serde() {
        let backoff: BackoffType = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(backoff, BackoffType::Linear);
        assert_eq!(BackoffType::default(), BackoffType::Exponential);
    }
}

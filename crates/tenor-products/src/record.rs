//! Self-describing product records.
//!
//! A record is an ordered JSON object. Every record carries `VERSION` (an
//! integer) and `TYPE` (an upper-case token); the remaining keys belong to the
//! product. Dates are ISO strings, periods use their short form, conventions
//! their tokens, and amounts are JSON numbers written with their exact decimal
//! digits.

use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};

use crate::error::{ProductError, ProductResult};

/// Ordered key/value record.
pub type Record = Map<String, Value>;

/// Schema version key.
pub const VERSION_KEY: &str = "VERSION";

/// Type token key.
pub const TYPE_KEY: &str = "TYPE";

// =============================================================================
// WRITING
// =============================================================================

/// Builds a record in field order.
#[derive(Debug, Clone)]
pub struct RecordWriter {
    record: Record,
}

impl RecordWriter {
    /// Starts a record with its `VERSION` and `TYPE` header.
    #[must_use]
    pub fn new(product_type: &str, version: u32) -> Self {
        let mut record = Record::new();
        record.insert(VERSION_KEY.to_string(), Value::from(version));
        record.insert(TYPE_KEY.to_string(), Value::from(product_type));
        Self { record }
    }

    /// Writes a value through its `Display` form (dates, periods, tokens).
    #[must_use]
    pub fn text(mut self, key: &str, value: impl Display) -> Self {
        self.record
            .insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Writes an amount as a JSON number.
    #[must_use]
    pub fn decimal(mut self, key: &str, value: Decimal) -> Self {
        self.record.insert(key.to_string(), decimal_to_value(value));
        self
    }

    /// Writes a raw JSON value.
    #[must_use]
    pub fn value(mut self, key: &str, value: Value) -> Self {
        self.record.insert(key.to_string(), value);
        self
    }

    /// The finished record.
    #[must_use]
    pub fn finish(self) -> Record {
        self.record
    }
}

/// Amounts are written as JSON numbers carrying the exact decimal text.
#[must_use]
pub fn decimal_to_value(value: Decimal) -> Value {
    let text = value.normalize().to_string();
    Number::from_str(&text).map_or(Value::String(text), Value::Number)
}

// =============================================================================
// READING
// =============================================================================

/// Typed field access with field-named errors.
#[derive(Debug, Clone, Copy)]
pub struct RecordReader<'a> {
    record: &'a Record,
}

impl<'a> RecordReader<'a> {
    /// Wraps a record.
    #[must_use]
    pub fn new(record: &'a Record) -> Self {
        Self { record }
    }

    /// The wrapped record.
    #[must_use]
    pub fn record(&self) -> &'a Record {
        self.record
    }

    /// True if the key is present and not null.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.record.get(key).is_some_and(|v| !v.is_null())
    }

    /// Raw field.
    pub fn field(&self, key: &str) -> ProductResult<&'a Value> {
        match self.record.get(key) {
            Some(Value::Null) | None => Err(ProductError::missing_field(key)),
            Some(value) => Ok(value),
        }
    }

    /// String field.
    pub fn text(&self, key: &str) -> ProductResult<&'a str> {
        self.field(key)?
            .as_str()
            .ok_or_else(|| ProductError::invalid_field(key, "expected a string"))
    }

    /// String field parsed with `FromStr`.
    pub fn parse<T>(&self, key: &str) -> ProductResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.text(key)?
            .parse()
            .map_err(|e: T::Err| ProductError::invalid_field(key, e.to_string()))
    }

    /// Optional string field parsed with `FromStr`.
    pub fn parse_opt<T>(&self, key: &str) -> ProductResult<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        if self.has(key) {
            self.parse(key).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Numeric field.
    pub fn decimal(&self, key: &str) -> ProductResult<Decimal> {
        value_to_decimal(key, self.field(key)?)
    }

    /// Optional numeric field.
    pub fn decimal_opt(&self, key: &str) -> ProductResult<Option<Decimal>> {
        if self.has(key) {
            self.decimal(key).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Array of numbers.
    pub fn decimals(&self, key: &str) -> ProductResult<Vec<Decimal>> {
        self.field(key)?
            .as_array()
            .ok_or_else(|| ProductError::invalid_field(key, "expected an array"))?
            .iter()
            .map(|v| value_to_decimal(key, v))
            .collect()
    }

    /// Nested record.
    pub fn nested(&self, key: &str) -> ProductResult<&'a Record> {
        self.field(key)?
            .as_object()
            .ok_or_else(|| ProductError::invalid_field(key, "expected an object"))
    }

    /// The `TYPE` token.
    pub fn product_type(&self) -> ProductResult<&'a str> {
        self.text(TYPE_KEY)
    }

    /// The `VERSION` number.
    pub fn version(&self) -> ProductResult<u64> {
        self.field(VERSION_KEY)?
            .as_u64()
            .ok_or_else(|| ProductError::invalid_field(VERSION_KEY, "expected a non-negative integer"))
    }
}

/// Reads an amount from a JSON number or numeric string.
pub fn value_to_decimal(key: &str, value: &Value) -> ProductResult<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(ProductError::invalid_field(key, "expected a number")),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| ProductError::invalid_field(key, e.to_string()))
}

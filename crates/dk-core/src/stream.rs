//! Whitespace/tab-delimited record parsing for skill and effect definitions.
//!
//! Records are a registered name followed by a fixed, type-specific number of
//! fields. The record is not self-delimiting; the reader stops when the
//! concrete type has consumed its known field count.

use std::str::{FromStr, SplitAsciiWhitespace};

use thiserror::Error;

/// Error while reading fields out of a definition record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of record")]
    UnexpectedEnd,
    #[error("invalid value '{value}' for field {field}")]
    InvalidValue { field: &'static str, value: String },
}

/// Error while loading a record through a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("unknown registered name '{0}'")]
    UnknownName(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Pull-style reader over the fields of one or more records.
pub struct FieldReader<'a> {
    fields: SplitAsciiWhitespace<'a>,
}

impl<'a> FieldReader<'a> {
    pub fn new(record: &'a str) -> Self {
        Self {
            fields: record.split_ascii_whitespace(),
        }
    }

    /// Next raw field, or `UnexpectedEnd` when the record is exhausted.
    pub fn next_field(&mut self) -> Result<&'a str, ParseError> {
        self.fields.next().ok_or(ParseError::UnexpectedEnd)
    }

    /// Parse the next field as `T`.
    pub fn read<T: FromStr>(&mut self, field: &'static str) -> Result<T, ParseError> {
        let value = self.next_field()?;
        value.parse().map_err(|_| ParseError::InvalidValue {
            field,
            value: value.to_string(),
        })
    }

    /// Next field with the `none` placeholder mapped back to an empty string.
    pub fn read_name(&mut self) -> Result<String, ParseError> {
        let value = self.next_field()?;
        if value == "none" {
            Ok(String::new())
        } else {
            Ok(value.to_string())
        }
    }

    /// True when every field has been consumed.
    pub fn is_empty(&mut self) -> bool {
        self.fields.clone().next().is_none()
    }
}

/// Write a string field, substituting `none` for empty values so the record
/// stays parseable.
pub(crate) fn push_name(out: &mut String, value: &str) {
    out.push('\t');
    if value.is_empty() {
        out.push_str("none");
    } else {
        out.push_str(value);
    }
}

/// Write a numeric field with its tab separator.
pub(crate) fn push_value<T: ToString>(out: &mut String, value: T) {
    out.push('\t');
    out.push_str(&value.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_typed_fields() {
        let mut r = FieldReader::new("Melee\t4\t0\t1.5");
        assert_eq!(r.next_field().unwrap(), "Melee");
        assert_eq!(r.read::<u32>("Cooldown").unwrap(), 4);
        assert_eq!(r.read::<u32>("Warmup").unwrap(), 0);
        assert_eq!(r.read::<f64>("Atk").unwrap(), 1.5);
        assert!(r.is_empty());
    }

    #[test]
    fn test_truncated_record() {
        let mut r = FieldReader::new("Melee 4");
        r.next_field().unwrap();
        r.read::<u32>("Cooldown").unwrap();
        assert_eq!(r.read::<u32>("Warmup"), Err(ParseError::UnexpectedEnd));
    }

    #[test]
    fn test_invalid_value_names_field() {
        let mut r = FieldReader::new("abc");
        let err = r.read::<u32>("LevelMin").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidValue {
                field: "LevelMin",
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_none_placeholder() {
        let mut r = FieldReader::new("none Boulder");
        assert_eq!(r.read_name().unwrap(), "");
        assert_eq!(r.read_name().unwrap(), "Boulder");
    }
}

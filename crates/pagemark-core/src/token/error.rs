use derive_more::Display;
use thiserror::Error as ThisError;

///
/// TokenField
/// Named position inside the token text form.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum TokenField {
    #[display("timestamp")]
    Timestamp,

    #[display("offset")]
    Offset,

    #[display("checksum")]
    Checksum,
}

///
/// TokenParseError
/// Continuation token text decode failures.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TokenParseError {
    #[error("continuation token must have 3 ':'-separated fields, found {found}")]
    FieldCount { found: usize },

    #[error("continuation token {field} is not an unsigned integer: '{value}'")]
    InvalidField { field: TokenField, value: String },

    #[error("continuation token {field} is out of range: '{value}'")]
    OutOfRange { field: TokenField, value: String },
}

impl TokenParseError {
    pub(in crate::token) const fn field_count(found: usize) -> Self {
        Self::FieldCount { found }
    }

    pub(in crate::token) fn invalid_field(field: TokenField, value: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            value: value.into(),
        }
    }

    pub(in crate::token) fn out_of_range(field: TokenField, value: impl Into<String>) -> Self {
        Self::OutOfRange {
            field,
            value: value.into(),
        }
    }
}

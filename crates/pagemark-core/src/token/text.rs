//! Module: token::text
//! Responsibility: the `<timestamp>:<offset>:<checksum>` text form of continuation tokens.
//! Does not own: token derivation or boundary validation.
//! Boundary: the only place token text is produced or parsed.

use crate::token::{ContinuationToken, TokenField, TokenParseError};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr};

/// Field delimiter in the token text form; never valid inside a field.
pub const TOKEN_DELIMITER: char = ':';

impl ContinuationToken {
    /// Parse an optional query value; absent or blank input means "first page".
    ///
    /// Non-blank input goes through [`FromStr`] unchanged, so surrounding
    /// whitespace is rejected here just as it is there.
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, TokenParseError> {
        match raw {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => text.parse().map(Some),
        }
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{TOKEN_DELIMITER}{}{TOKEN_DELIMITER}{}",
            self.timestamp(),
            self.offset(),
            self.checksum()
        )
    }
}

impl FromStr for ContinuationToken {
    type Err = TokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(TOKEN_DELIMITER).collect();
        let [timestamp, offset, checksum] = fields.as_slice() else {
            return Err(TokenParseError::field_count(fields.len()));
        };

        Ok(Self::new(
            parse_field(timestamp, TokenField::Timestamp)?,
            parse_field(offset, TokenField::Offset)?,
            parse_field(checksum, TokenField::Checksum)?,
        ))
    }
}

// Fields are plain ASCII digits; signs, whitespace, and empty fields are rejected
// before integer parsing so only overflow can fail afterwards.
fn parse_field<T: FromStr>(raw: &str, field: TokenField) -> Result<T, TokenParseError> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(TokenParseError::invalid_field(field, raw));
    }

    raw.parse()
        .map_err(|_| TokenParseError::out_of_range(field, raw))
}

impl Serialize for ContinuationToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContinuationToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;

        text.parse().map_err(de::Error::custom)
    }
}

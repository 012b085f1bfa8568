mod build;
mod error;
mod text;


pub use build::{merge_token, token_from};
pub(crate) use build::saturating_u32;
pub use error::{TokenField, TokenParseError};
pub use text::TOKEN_DELIMITER;

use crate::traits::Timestamp;

///
/// ContinuationToken
///
/// Opaque resume marker handed to the client after every page.
///
/// `timestamp` is the latest timestamp already delivered, `offset` counts the
/// delivered entities sharing that timestamp (cumulative across pages that
/// stayed on it), and `checksum` fingerprints their identifiers in ascending
/// identifier order so the next request can tell whether that prefix is still
/// intact.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ContinuationToken {
    timestamp: Timestamp,
    offset: u32,
    checksum: u32,
}

impl ContinuationToken {
    #[must_use]
    pub const fn new(timestamp: Timestamp, offset: u32, checksum: u32) -> Self {
        Self {
            timestamp,
            offset,
            checksum,
        }
    }

    /// Latest timestamp among delivered entities.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Number of delivered entities sharing [`Self::timestamp`].
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    #[must_use]
    pub const fn checksum(&self) -> u32 {
        self.checksum
    }

    // Offset as a slice length; saturates on narrow targets.
    pub(crate) fn offset_len(&self) -> usize {
        usize::try_from(self.offset).unwrap_or(usize::MAX)
    }
}

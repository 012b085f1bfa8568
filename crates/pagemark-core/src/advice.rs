use crate::{page::PageSize, token::ContinuationToken, traits::Timestamp};

///
/// QueryAdvice
///
/// Storage query shape for the next page: every entity with
/// `timestamp >= self.timestamp`, lowest `limit` in canonical order.
///
/// The limit covers the page plus the already-delivered boundary prefix, so
/// that prefix can be re-fetched, validated, and skipped.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct QueryAdvice {
    pub timestamp: Timestamp,
    pub limit: u32,
}

impl QueryAdvice {
    /// Limit as a collection length; saturates on narrow targets.
    #[must_use]
    pub fn limit_len(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(usize::MAX)
    }
}

/// Compute the storage query for the page after `token`.
#[must_use]
pub const fn calculate_query_advice(
    token: Option<&ContinuationToken>,
    page_size: PageSize,
) -> QueryAdvice {
    match token {
        None => QueryAdvice {
            timestamp: 0,
            limit: page_size.get(),
        },
        Some(token) => QueryAdvice {
            timestamp: token.timestamp(),
            limit: page_size.get().saturating_add(token.offset()),
        },
    }
}

///
/// TESTS
///

//! Module: page
//! Responsibility: turn one fetched batch plus the previous token into the next page.
//! Does not own: fetching, token text encoding, or response shaping.
//! Boundary: the only place boundary prefixes are validated and skipped.

mod size;


pub use size::{PageSize, PageSizeError};

use crate::{
    checksum::checksum_of,
    order::sort_pageables,
    token::{ContinuationToken, merge_token, saturating_u32, token_from},
    traits::{Pageable, Timestamp},
};
use derive_more::IntoIterator;

///
/// Page
///
/// One page of entities in canonical order, the token to resume after it, and
/// whether another request may return more.
///
/// `has_next` is true whenever the page came back full; a full final page is
/// indistinguishable from a partial one without a lookahead fetch, so the
/// client pays one extra round trip that may return nothing.
///

#[derive(Clone, Debug, Eq, IntoIterator, PartialEq)]
pub struct Page<E> {
    #[into_iterator(owned, ref)]
    entities: Vec<E>,
    token: Option<ContinuationToken>,
    has_next: bool,
}

impl<E> Page<E> {
    #[must_use]
    pub const fn new(entities: Vec<E>, token: Option<ContinuationToken>, has_next: bool) -> Self {
        Self {
            entities,
            token,
            has_next,
        }
    }

    #[must_use]
    pub const fn entities(&self) -> &[E] {
        self.entities.as_slice()
    }

    #[must_use]
    pub const fn token(&self) -> Option<&ContinuationToken> {
        self.token.as_ref()
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[must_use]
    pub fn into_entities(self) -> Vec<E> {
        self.entities
    }

    /// Consume this page and return `(entities, token, has_next)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<E>, Option<ContinuationToken>, bool) {
        (self.entities, self.token, self.has_next)
    }
}

///
/// FallbackReason
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FallbackReason {
    /// Fewer entities share the token timestamp than the token claims were delivered.
    TooFewEntities,

    /// The delivered prefix no longer hashes to the token checksum.
    ChecksumMismatch,
}

///
/// BoundaryCheck
///
/// Outcome of reconciling a fetched batch with the previous token's boundary.
/// Diagnostic only; the page already reflects the decision.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BoundaryCheck {
    /// No previous token; nothing to validate.
    Unanchored,

    /// The delivered prefix is intact and `skipped` entities were dropped.
    Intact { skipped: u32 },

    /// The prefix could not be confirmed; the whole boundary group of
    /// `boundary_len` entities was kept.
    Fallback {
        reason: FallbackReason,
        boundary_len: u32,
    },
}

impl BoundaryCheck {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Build the next page from a fetched batch.
///
/// `entities` must come from a query shaped by
/// [`calculate_query_advice`](crate::advice::calculate_query_advice) for the
/// same `previous` token and `page_size`; its order does not matter.
#[must_use]
pub fn create_page<E: Pageable>(
    entities: Vec<E>,
    previous: Option<&ContinuationToken>,
    page_size: PageSize,
) -> Page<E> {
    create_page_with_check(entities, previous, page_size).0
}

/// [`create_page`], also reporting how the previous boundary was reconciled.
#[must_use]
pub fn create_page_with_check<E: Pageable>(
    mut entities: Vec<E>,
    previous: Option<&ContinuationToken>,
    page_size: PageSize,
) -> (Page<E>, BoundaryCheck) {
    sort_pageables(&mut entities);

    let Some(previous) = previous else {
        let take = page_size.as_usize().min(entities.len());
        let has_next = entities.len() >= page_size.as_usize();
        entities.truncate(take);
        let token = token_from(&entities);

        return (Page::new(entities, token, has_next), BoundaryCheck::Unanchored);
    };

    // Phase 1: locate the boundary group inside the sorted batch.
    let window = BoundaryWindow::locate(&entities, previous.timestamp());
    if window.start > 0 {
        tracing::debug!(
            stale = window.start,
            token_timestamp = previous.timestamp(),
            "discarding entities older than the continuation token"
        );
    }
    let boundary = &entities[window.start..window.end];

    // Phase 2: skip the delivered prefix only when it is provably unchanged.
    let check = check_boundary(boundary, previous);
    let skipped = match check {
        BoundaryCheck::Intact { .. } => previous.offset_len(),
        _ => 0,
    };

    // Phase 3: slice the page out of the remaining candidates.
    let candidates_start = window.start + skipped;
    let candidates_len = entities.len() - candidates_start;
    let take = page_size.as_usize().min(candidates_len);
    let has_next = candidates_len >= page_size.as_usize();
    let page_slice = &entities[candidates_start..candidates_start + take];

    // Phase 4: derive the next token from what this page actually delivered.
    let token = match page_slice.last() {
        None => Some(*previous),
        Some(last) if last.timestamp() == previous.timestamp() => {
            let delivered = skipped + take;
            Some(merge_token(previous, boundary, saturating_u32(delivered)))
        }
        Some(_) => token_from(page_slice),
    };

    let page_entities: Vec<E> = entities
        .into_iter()
        .skip(candidates_start)
        .take(take)
        .collect();

    (Page::new(page_entities, token, has_next), check)
}

///
/// BoundaryWindow
///
/// Index range of the entities sharing the token timestamp inside a sorted batch.
///

#[derive(Clone, Copy, Debug)]
struct BoundaryWindow {
    start: usize,
    end: usize,
}

impl BoundaryWindow {
    fn locate<E: Pageable>(sorted: &[E], timestamp: Timestamp) -> Self {
        let start = sorted.partition_point(|entity| entity.timestamp() < timestamp);
        let end = sorted.partition_point(|entity| entity.timestamp() <= timestamp);

        Self { start, end }
    }
}

// Validate the previously delivered prefix of the boundary group.
fn check_boundary<E: Pageable>(boundary: &[E], previous: &ContinuationToken) -> BoundaryCheck {
    let offset = previous.offset_len();
    let boundary_len = saturating_u32(boundary.len());

    let reason = if boundary.len() < offset {
        FallbackReason::TooFewEntities
    } else if checksum_of(&boundary[..offset]) != previous.checksum() {
        FallbackReason::ChecksumMismatch
    } else {
        tracing::trace!(
            token_timestamp = previous.timestamp(),
            skipped = previous.offset(),
            "continuation boundary intact"
        );

        return BoundaryCheck::Intact {
            skipped: previous.offset(),
        };
    };

    tracing::debug!(
        token_timestamp = previous.timestamp(),
        token_offset = previous.offset(),
        boundary_len,
        ?reason,
        "continuation boundary changed; keeping the full boundary group"
    );

    BoundaryCheck::Fallback {
        reason,
        boundary_len,
    }
}

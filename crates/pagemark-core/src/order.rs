use crate::traits::Pageable;
use std::cmp::Ordering;

/// Canonical page order: timestamp ascending, then identifier ascending.
///
/// Identifiers compare byte-wise, so two distinct entities only compare equal
/// when both their timestamp and identifier match.
#[must_use]
pub fn compare_pageables<E: Pageable + ?Sized>(left: &E, right: &E) -> Ordering {
    left.timestamp()
        .cmp(&right.timestamp())
        .then_with(|| left.id().as_bytes().cmp(right.id().as_bytes()))
}

/// Stable sort into canonical page order.
pub fn sort_pageables<E: Pageable>(entities: &mut [E]) {
    entities.sort_by(compare_pageables::<E>);
}

// Identifier-only order used inside one timestamp group.
pub(crate) fn compare_ids<E: Pageable + ?Sized>(left: &E, right: &E) -> Ordering {
    left.id().as_bytes().cmp(right.id().as_bytes())
}

///
/// TESTS
///

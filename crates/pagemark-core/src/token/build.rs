use crate::{
    checksum::checksum,
    group::latest_group,
    order::compare_ids,
    token::ContinuationToken,
    traits::Pageable,
};

/// Derive a fresh token from the latest timestamp group of `entities`.
///
/// Returns `None` for empty input. The group is re-sorted by identifier, so the
/// input order does not matter.
#[must_use]
pub fn token_from<E: Pageable>(entities: &[E]) -> Option<ContinuationToken> {
    let mut group = latest_group(entities);
    let timestamp = group.first()?.timestamp();
    group.sort_by(|left, right| compare_ids(*left, *right));

    Some(ContinuationToken::new(
        timestamp,
        saturating_u32(group.len()),
        checksum(group.iter().map(|entity| entity.id())),
    ))
}

/// Extend `previous` after a page that never left its timestamp.
///
/// `boundary` is the full boundary group as re-fetched for this page, sorted
/// by identifier. The checksum is recomputed over the whole delivered prefix
/// (`boundary[..new_offset]`), since every follow-up query sees the full group
/// again. A `new_offset` past the end of `boundary` hashes the whole group.
#[must_use]
pub fn merge_token<E: Pageable>(
    previous: &ContinuationToken,
    boundary: &[E],
    new_offset: u32,
) -> ContinuationToken {
    let prefix_len =
        usize::try_from(new_offset).map_or(boundary.len(), |len| len.min(boundary.len()));
    let prefix = &boundary[..prefix_len];

    ContinuationToken::new(
        previous.timestamp(),
        new_offset,
        checksum(prefix.iter().map(Pageable::id)),
    )
}

// Counts past u32::MAX cannot be carried by a token; clamp rather than wrap.
pub(crate) fn saturating_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

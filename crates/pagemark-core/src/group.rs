use crate::traits::Pageable;

/// Entities sharing the maximum timestamp, in their original relative order.
///
/// Returns an empty vector for empty input.
#[must_use]
pub fn latest_group<E: Pageable>(entities: &[E]) -> Vec<&E> {
    let Some(latest) = entities.iter().map(Pageable::timestamp).max() else {
        return Vec::new();
    };

    entities
        .iter()
        .filter(|entity| entity.timestamp() == latest)
        .collect()
}

///
/// TESTS
///

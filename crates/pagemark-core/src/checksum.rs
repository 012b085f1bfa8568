use crate::traits::Pageable;
use crc32fast::Hasher;

/// Separator placed between identifiers before hashing.
pub const ID_SEPARATOR: &str = "_";

///
/// CRC-32 (IEEE) over an ordered identifier sequence.
///
/// The sequence is hashed as if joined with [`ID_SEPARATOR`], so
/// `checksum(["a", "b"])` equals the CRC of `b"a_b"`. Used only to detect
/// modification of a previously delivered boundary prefix; it is order
/// sensitive and not collision resistant.
///

#[must_use]
pub fn checksum<I, S>(ids: I) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = Hasher::new();

    for (position, id) in ids.into_iter().enumerate() {
        if position > 0 {
            hasher.update(ID_SEPARATOR.as_bytes());
        }
        hasher.update(id.as_ref().as_bytes());
    }

    hasher.finalize()
}

/// Checksum over the identifiers of `entities`, in slice order.
#[must_use]
pub fn checksum_of<E: Pageable>(entities: &[E]) -> u32 {
    checksum(entities.iter().map(Pageable::id))
}

///
/// TESTS
///

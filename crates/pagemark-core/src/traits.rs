/// Modification timestamp carried by pageable entities and continuation tokens.
pub type Timestamp = u64;

///
/// Pageable
///
/// Capability set every paginated record exposes: a stable unique identifier
/// and a modification timestamp.
///
/// The timestamp must never decrease across mutations visible to pagination,
/// and should strictly increase on every write. Records that violate this are
/// still paged without error, but may be skipped or delivered twice.
///

pub trait Pageable {
    fn id(&self) -> &str;

    fn timestamp(&self) -> Timestamp;
}

impl<T: Pageable + ?Sized> Pageable for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn timestamp(&self) -> Timestamp {
        (**self).timestamp()
    }
}

use crate::traits::{Pageable, Timestamp};

///
/// TestPageable
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct TestPageable {
    id: String,
    timestamp: Timestamp,
}

impl TestPageable {
    pub(crate) fn new(id: &str, timestamp: Timestamp) -> Self {
        Self {
            id: id.to_string(),
            timestamp,
        }
    }

    // Id mirrors the timestamp; the common shape for "all keys differ" fixtures.
    pub(crate) fn at(timestamp: Timestamp) -> Self {
        Self {
            id: timestamp.to_string(),
            timestamp,
        }
    }
}

impl Pageable for TestPageable {
    fn id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

// Build one fixture per id, all sharing `timestamp`.
pub(crate) fn same_ts(ids: &[&str], timestamp: Timestamp) -> Vec<TestPageable> {
    ids.iter().map(|id| TestPageable::new(id, timestamp)).collect()
}

// Build fixtures whose ids mirror their timestamps.
pub(crate) fn keyed(timestamps: &[Timestamp]) -> Vec<TestPageable> {
    timestamps.iter().copied().map(TestPageable::at).collect()
}

pub(crate) fn ids<E: Pageable>(entities: &[E]) -> Vec<&str> {
    entities.iter().map(Pageable::id).collect()
}

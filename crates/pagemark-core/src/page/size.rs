use derive_more::Display;
use std::num::NonZeroU32;
use thiserror::Error as ThisError;

///
/// PageSizeError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("page size must be at least 1")]
pub struct PageSizeError;

///
/// PageSize
///
/// Requested number of entities per page. Never zero.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PageSize(NonZeroU32);

impl PageSize {
    pub const MIN: Self = Self(NonZeroU32::MIN);

    #[must_use]
    pub const fn new(size: u32) -> Option<Self> {
        match NonZeroU32::new(size) {
            Some(size) => Some(Self(size)),
            None => None,
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    // Page size as a slice length; saturates on narrow targets.
    pub(crate) fn as_usize(self) -> usize {
        usize::try_from(self.get()).unwrap_or(usize::MAX)
    }
}

impl From<NonZeroU32> for PageSize {
    fn from(size: NonZeroU32) -> Self {
        Self(size)
    }
}

impl TryFrom<u32> for PageSize {
    type Error = PageSizeError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        Self::new(size).ok_or(PageSizeError)
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

///
/// TESTS
///

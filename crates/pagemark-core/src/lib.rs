//! Core runtime for Pagemark: continuation tokens, page construction, query
//! advice, and the checksum-based boundary validation that ties them together.
//!
//! The page/token computation is pure. Storage access lives behind
//! [`source::PageSource`] and is driven by [`session::Paginator`].
#![warn(unreachable_pub)]

pub mod advice;
pub mod checksum;
pub mod group;
pub mod obs;
pub mod order;
pub mod page;
pub mod response;
pub mod session;
pub mod source;
pub mod token;
pub mod traits;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use advice::{QueryAdvice, calculate_query_advice};
pub use page::{
    BoundaryCheck, FallbackReason, Page, PageSize, PageSizeError, create_page,
    create_page_with_check,
};
pub use token::{ContinuationToken, TokenParseError};
pub use traits::{Pageable, Timestamp};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No sources, sessions, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        advice::QueryAdvice,
        page::{Page, PageSize},
        token::ContinuationToken,
        traits::{Pageable, Timestamp},
    };
}

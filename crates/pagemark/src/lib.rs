//! ## Crate layout
//! - `core`: tokens, page construction, query advice, sources, and the paginator.
//! - `config`: TOML-backed pagination policy.
//! - `observability`: logging setup and request spans.
//! - `request`: one client request in, one serialized page view out.
//!
//! The `prelude` module covers what a request handler normally touches.

pub use pagemark_config as config;
pub use pagemark_core as core;

pub mod observability;
pub mod request;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::PaginationConfig,
        core::{
            ContinuationToken, Page, PageSize, Pageable, Timestamp,
            response::PageView,
            session::Paginator,
            source::{MemorySource, PageSource},
        },
        request::{PageRequest, RequestError, serve_page},
    };
    pub use serde::{Deserialize, Serialize};
}

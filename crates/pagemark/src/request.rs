//! Module: request
//! Responsibility: turn a client page request into a serialized page view.
//! Does not own: transport, routing, or entity mapping.
//! Boundary: joins config policy, token text, and the paginator for one request.

use crate::{
    config::{ConfigError, PaginationConfig},
    core::{
        ContinuationToken, TokenParseError,
        response::PageView,
        session::{Paginator, PaginatorError},
        source::PageSource,
    },
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use url::form_urlencoded;

///
/// InvalidPageSize
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("invalid pageSize '{0}'")]
pub struct InvalidPageSize(pub String);

///
/// RequestError
///

#[derive(Debug, ThisError)]
pub enum RequestError<E: std::error::Error + 'static> {
    #[error(transparent)]
    PageSize(#[from] InvalidPageSize),

    #[error(transparent)]
    Token(#[from] TokenParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Paginator(#[from] PaginatorError<E>),
}

impl<E: std::error::Error + 'static> RequestError<E> {
    /// True when the client sent something unusable, as opposed to a server fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::PageSize(_) | Self::Token(_) | Self::Config(ConfigError::ZeroPageSize)
        )
    }
}

///
/// PageRequest
///
/// Client-supplied paging parameters, as they appear in a query string.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageRequest {
    pub page_size: Option<u32>,
    pub continuation_token: Option<String>,
}

impl PageRequest {
    /// Read `pageSize` and `continuationToken` from a raw query string.
    ///
    /// The query is form-decoded (`%3A` and `+` included). A leading `?` is
    /// ignored and unrelated parameters are skipped. The last occurrence of a
    /// repeated key wins.
    pub fn from_query(query: &str) -> Result<Self, InvalidPageSize> {
        let mut request = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "pageSize" if !value.is_empty() => {
                    let size = value
                        .parse()
                        .map_err(|_| InvalidPageSize(value.clone().into_owned()))?;
                    request.page_size = Some(size);
                }
                "continuationToken" => {
                    request.continuation_token = Some(value.into_owned());
                }
                _ => {}
            }
        }

        Ok(request)
    }
}

/// Serve one page: resolve the page size, decode the token, fetch, and map.
pub fn serve_page<S, T>(
    paginator: &Paginator<S>,
    config: &PaginationConfig,
    request: &PageRequest,
    map: impl FnMut(S::Entity) -> T,
) -> Result<PageView<T>, RequestError<S::Error>>
where
    S: PageSource,
{
    let page_size = config.resolve_page_size(request.page_size)?;
    let token = ContinuationToken::parse_optional(request.continuation_token.as_deref())?;

    let span = crate::observability::page_span(page_size.get(), token.is_some());
    let _guard = span.enter();

    let page = paginator.fetch_page(token.as_ref(), page_size)?;
    tracing::debug!(
        entities = page.len(),
        has_next = page.has_next(),
        "serving page"
    );

    Ok(page.into_view(page_size, config.next_page_base(), map))
}

///
/// TESTS
///

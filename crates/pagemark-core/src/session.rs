//! Module: session
//! Responsibility: run page requests against a source (advice, fetch, page build).
//! Does not own: storage semantics or the page algorithm itself.
//! Boundary: the only place source errors and trace events are produced.

use crate::{
    advice::calculate_query_advice,
    obs::{PageTraceSink, TraceScope},
    page::{Page, PageSize, create_page_with_check},
    source::PageSource,
    token::ContinuationToken,
};
use thiserror::Error as ThisError;

///
/// PaginatorError
///

#[derive(Debug, ThisError)]
pub enum PaginatorError<E: std::error::Error + 'static> {
    #[error("page source failed")]
    Source(#[source] E),

    #[error("pagination did not finish within {max_pages} pages")]
    PageLimit { max_pages: u32 },
}

///
/// Paginator
///
/// Request-scoped pagination over one source, with optional tracing policy.
///

pub struct Paginator<S> {
    source: S,
    trace: Option<&'static dyn PageTraceSink>,
}

impl<S: PageSource> Paginator<S> {
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            trace: None,
        }
    }

    #[must_use]
    pub const fn trace_sink(mut self, sink: &'static dyn PageTraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn into_source(self) -> S {
        self.source
    }

    /// Fetch the page after `token` (the first page when `None`).
    pub fn fetch_page(
        &self,
        token: Option<&ContinuationToken>,
        page_size: PageSize,
    ) -> Result<Page<S::Entity>, PaginatorError<S::Error>> {
        let advice = calculate_query_advice(token, page_size);
        let trace = TraceScope::start(self.trace, advice);

        let rows = match self.source.fetch(advice) {
            Ok(rows) => rows,
            Err(err) => {
                tracing::debug!(
                    since = advice.timestamp,
                    limit = advice.limit,
                    error = %err,
                    "page source fetch failed"
                );
                if let Some(trace) = trace {
                    trace.error();
                }

                return Err(PaginatorError::Source(err));
            }
        };

        tracing::debug!(
            since = advice.timestamp,
            limit = advice.limit,
            rows = rows.len(),
            "fetched page batch"
        );
        if let Some(trace) = &trace {
            trace.fetched(rows.len());
        }

        let (page, check) = create_page_with_check(rows, token, page_size);
        if let Some(trace) = trace {
            trace.boundary(check);
            trace.finish(page.len(), page.has_next(), page.token().copied());
        }

        Ok(page)
    }

    /// Walk pages from the start until one reports no successor.
    ///
    /// Entities are returned in delivery order; an entity mutated during the
    /// walk may appear more than once. Fails with
    /// [`PaginatorError::PageLimit`] if `max_pages` requests were not enough.
    pub fn fetch_all(
        &self,
        page_size: PageSize,
        max_pages: u32,
    ) -> Result<Vec<S::Entity>, PaginatorError<S::Error>> {
        let mut delivered = Vec::new();
        let mut token = None;

        for _ in 0..max_pages {
            let page = self.fetch_page(token.as_ref(), page_size)?;
            let (entities, next_token, has_next) = page.into_parts();
            delivered.extend(entities);

            if !has_next {
                return Ok(delivered);
            }
            token = next_token;
        }

        Err(PaginatorError::PageLimit { max_pages })
    }
}

///
/// TESTS
///

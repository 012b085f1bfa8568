//! Structured events for one paginator request: what was fetched, how the
//! previous boundary was reconciled, and what page went back to the client.
//!
//! A sink is only called when one is installed on the [`Paginator`](crate::session::Paginator);
//! the page it returns is the same either way.

use crate::{advice::QueryAdvice, page::BoundaryCheck, token::ContinuationToken};

///
/// PageTraceSink
///

pub trait PageTraceSink: Send + Sync {
    fn on_event(&self, event: PageTraceEvent);
}

///
/// PageTraceEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PageTraceEvent {
    Fetch {
        advice: QueryAdvice,
        rows: u64,
    },
    Boundary {
        advice: QueryAdvice,
        check: BoundaryCheck,
    },
    Finish {
        advice: QueryAdvice,
        entities: u64,
        has_next: bool,
        token: Option<ContinuationToken>,
    },
    Error {
        advice: QueryAdvice,
    },
}

///
/// TraceScope
///
/// One page request's worth of events, all tagged with the same advice.
///

pub(crate) struct TraceScope {
    sink: &'static dyn PageTraceSink,
    advice: QueryAdvice,
}

impl TraceScope {
    pub(crate) fn start(
        sink: Option<&'static dyn PageTraceSink>,
        advice: QueryAdvice,
    ) -> Option<Self> {
        let sink = sink?;

        Some(Self { sink, advice })
    }

    pub(crate) fn fetched(&self, rows: usize) {
        self.sink.on_event(PageTraceEvent::Fetch {
            advice: self.advice,
            rows: count(rows),
        });
    }

    pub(crate) fn boundary(&self, check: BoundaryCheck) {
        self.sink.on_event(PageTraceEvent::Boundary {
            advice: self.advice,
            check,
        });
    }

    pub(crate) fn finish(
        self,
        entities: usize,
        has_next: bool,
        token: Option<ContinuationToken>,
    ) {
        self.sink.on_event(PageTraceEvent::Finish {
            advice: self.advice,
            entities: count(entities),
            has_next,
            token,
        });
    }

    pub(crate) fn error(self) {
        self.sink.on_event(PageTraceEvent::Error {
            advice: self.advice,
        });
    }
}

fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

//! Continuation-passing pipeline.
//!
//! A pipeline is the filter list of a proxy plus one terminal step that hands
//! the request to the transport adapter. Execution is nested, not sequential:
//! each filter gets a [`Next`] that runs everything after it, so filters run
//! their pre-phases outermost-first and their post-phases outermost-last.
//!
//! ```text
//! F1 pre → F2 pre → dispatch(adapter.send) → pass-through
//!                                   ↓
//! F1 post ← F2 post ←───────────── response
//! ```
//!
//! The terminal step is a position of [`Next`] rather than an entry in the
//! filter list, so it always runs last and cannot be registered or reordered.

use std::sync::Arc;

use tracing::trace;

use crate::adapter::BoxedAdapter;
use crate::error::{Error, Result};
use crate::filter::{BoxFuture, BoxedFilter};
use crate::request::Request;
use crate::response::Response;

/// An assembled, immutable chain: filters in registration order followed by
/// the transport dispatch.
pub(crate) struct Pipeline {
    filters: Box<[BoxedFilter]>,
    adapter: BoxedAdapter,
}

impl Pipeline {
    pub(crate) fn new(filters: &[BoxedFilter], adapter: &BoxedAdapter) -> Arc<Self> {
        Arc::new(Self {
            filters: filters.iter().map(Arc::clone).collect(),
            adapter: Arc::clone(adapter),
        })
    }

    /// Runs the whole chain starting from the first filter.
    pub(crate) async fn run(self: Arc<Self>, request: Request, response: Response) -> Result<Response> {
        Next { pipeline: self, position: 0 }.run(request, response).await
    }
}

/// The remainder of a pipeline, handed to each filter.
///
/// Calling [`run`](Next::run) executes every later filter, then the transport,
/// and resolves to the response as it comes back up the chain. Dropping a
/// `Next` without running it short-circuits the pipeline.
pub struct Next {
    pipeline: Arc<Pipeline>,
    position: usize,
}

/// What the cursor of a [`Next`] points at.
enum Step {
    Filter(BoxedFilter),
    Dispatch(BoxedAdapter),
    PassThrough,
}

impl Next {
    fn step(&self) -> Step {
        let filters = &self.pipeline.filters;
        match self.position.cmp(&filters.len()) {
            std::cmp::Ordering::Less => Step::Filter(Arc::clone(&filters[self.position])),
            std::cmp::Ordering::Equal => Step::Dispatch(Arc::clone(&self.pipeline.adapter)),
            std::cmp::Ordering::Greater => Step::PassThrough,
        }
    }

    fn advance(&self) -> Self {
        Self { pipeline: Arc::clone(&self.pipeline), position: self.position + 1 }
    }

    /// Runs the rest of the chain with `request` and `response`.
    pub fn run(self, request: Request, response: Response) -> BoxFuture<Result<Response>> {
        match self.step() {
            Step::Filter(filter) => {
                trace!(position = self.position, "filter");
                filter.call(request, response, self.advance())
            }
            // The dispatch step discards the response handed to it; whatever
            // earlier filters put there is replaced by the adapter's answer.
            Step::Dispatch(adapter) => {
                let next = self.advance();
                Box::pin(async move {
                    trace!(method = %request.method(), uri = %request.uri(), "dispatch");
                    let response = adapter.send(request.clone()).await?;
                    next.run(request, response).await
                })
            }
            Step::PassThrough => Box::pin(async move { Ok::<_, Error>(response) }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bytes::Bytes;
    use http::StatusCode;

    use super::*;

    fn request() -> Request {
        http::Request::get("http://b.internal/").body(Bytes::new()).unwrap().into()
    }

    fn counting_adapter(calls: Arc<AtomicUsize>) -> BoxedAdapter {
        Arc::new(move |_req: Request| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, Error>(Response::text("from backend")) }
        })
    }

    #[tokio::test]
    async fn empty_chain_dispatches_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new(&[], &counting_adapter(Arc::clone(&calls)));

        let res = pipeline.run(request(), Response::new()).await.unwrap();
        assert_eq!(res.body().as_ref(), b"from backend");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dispatch_ignores_incoming_response() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seed: BoxedFilter = Arc::new(|req: Request, _res: Response, next: Next| {
            next.run(req, Response::status_only(StatusCode::IM_A_TEAPOT))
        });
        let pipeline = Pipeline::new(&[seed], &counting_adapter(calls));

        let res = pipeline.run(request(), Response::new()).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.body().as_ref(), b"from backend");
    }

    #[tokio::test]
    async fn adapter_error_propagates() {
        let failing: BoxedAdapter = Arc::new(|_req: Request| async {
            Err::<Response, _>(Error::transport(std::io::Error::other("connection reset")))
        });
        let pipeline = Pipeline::new(&[], &failing);

        let err = pipeline.run(request(), Response::new()).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)), "{err:?}");
    }
}

//! Filter trait and type erasure.
//!
//! # How filters are stored
//!
//! A [`Proxy`](crate::Proxy) holds filters of *different* concrete types in a
//! single `Vec`, so each one is erased behind `Arc<dyn Filter>`:
//!
//! ```text
//! |req, res, next| async { … }          ← user writes this
//!        ↓ proxy.filter(f)
//! Arc::new(f) as BoxedFilter             ← blanket impl over Fn
//!        ↓ at dispatch time
//! filter.call(req, res, next)            ← one vtable dispatch per step
//!        ↓
//! Box::pin(async { … })                  ← BoxFuture
//! ```
//!
//! The `Arc` lets a pipeline snapshot the filter list without copying the
//! filters themselves.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::Result;
use crate::pipeline::Next;
use crate::request::Request;
use crate::response::Response;

/// A heap-allocated, type-erased future.
///
/// `Send + 'static` lets tokio move the future across threads.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// A filter shared between a proxy and the pipelines it builds.
pub type BoxedFilter = Arc<dyn Filter>;

/// One step of the middleware pipeline.
///
/// A filter receives the outbound request, the response produced so far, and
/// [`Next`], the rest of the chain. It may
///
/// - edit the request before calling `next.run(..)`,
/// - edit the response `next.run(..)` resolves to before returning it,
/// - return without calling `next` at all, which skips every later filter and
///   the transport.
///
/// Any `Fn(Request, Response, Next) -> impl Future<Output = Result<Response>>`
/// is a filter, so a plain `async fn` works:
///
/// ```rust
/// use relayer::{DummyAdapter, Next, Proxy, Request, Response, Result};
///
/// async fn proxied_by(req: Request, res: Response, next: Next) -> Result<Response> {
///     let mut res = next.run(req, res).await?;
///     res.headers_mut().insert("x-proxied-by", "relayer".parse().unwrap());
///     Ok(res)
/// }
///
/// let _proxy = Proxy::new(DummyAdapter).filter(proxied_by);
/// ```
pub trait Filter: Send + Sync + 'static {
    fn call(&self, request: Request, response: Response, next: Next) -> BoxFuture<Result<Response>>;
}

impl<F, Fut> Filter for F
where
    F: Fn(Request, Response, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    fn call(&self, request: Request, response: Response, next: Next) -> BoxFuture<Result<Response>> {
        Box::pin((self)(request, response, next))
    }
}

//! Transport adapters.
//!
//! An [`Adapter`] performs the actual network send at the end of the
//! pipeline. relayer ships two:
//!
//! - [`HyperAdapter`]: plain HTTP/1.1 through a pooled `hyper-util` client.
//! - [`DummyAdapter`]: never touches the network, echoes the request body.
//!
//! Anything else (TLS, HTTP/2, a mock in a test) is a closure away:
//!
//! ```rust
//! use relayer::{Proxy, Request, Response, Result};
//!
//! async fn canned(_req: Request) -> Result<Response> {
//!     Ok(Response::text("hello from nowhere"))
//! }
//!
//! let _proxy = Proxy::new(canned);
//! ```

mod client;

use std::future::Future;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::filter::BoxFuture;
use crate::request::Request;
use crate::response::Response;

pub use self::client::{HyperAdapter, HyperAdapterBuilder};

/// An adapter shared between a proxy and the pipelines it builds.
pub type BoxedAdapter = Arc<dyn Adapter>;

/// Sends a request to its (already rewritten) destination.
///
/// Failures are reported as [`Error::Transport`](crate::Error::Transport) and
/// travel through the pipeline unchanged. A non-2xx answer is a response, not
/// a failure.
pub trait Adapter: Send + Sync + 'static {
    fn send(&self, request: Request) -> BoxFuture<Result<Response>>;
}

impl<F, Fut> Adapter for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    fn send(&self, request: Request) -> BoxFuture<Result<Response>> {
        Box::pin((self)(request))
    }
}

/// An adapter that answers every request with `200 OK` and the request body.
#[derive(Clone, Copy, Debug, Default)]
pub struct DummyAdapter;

impl Adapter for DummyAdapter {
    fn send(&self, request: Request) -> BoxFuture<Result<Response>> {
        let body = request.body().clone();
        Box::pin(async move { Ok::<_, Error>(Response::builder().bytes(body)) })
    }
}

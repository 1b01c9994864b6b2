//! The proxy session.

use std::sync::Arc;

use tracing::debug;

use crate::adapter::{Adapter, BoxedAdapter};
use crate::error::{Error, Result};
use crate::filter::{BoxedFilter, Filter};
use crate::pipeline::Pipeline;
use crate::request::Request;
use crate::response::Response;
use crate::rewrite;
use crate::target::Target;

/// Forwards requests to a target through a chain of filters.
///
/// Build it once with an adapter, register filters, then run forward/to
/// cycles. Each [`forward`](Proxy::forward) replaces the bound request.
///
/// ```rust
/// use relayer::{DummyAdapter, Proxy, Request};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> relayer::Result<()> {
/// let mut proxy = Proxy::new(DummyAdapter);
///
/// let req: Request = http::Request::get("http://origin.local/users/42")
///     .body(bytes::Bytes::new())
///     .unwrap()
///     .into();
///
/// let res = proxy.forward(req).to("http://backend.internal:8080/api").await?;
/// assert!(res.status().is_success());
/// # Ok(())
/// # }
/// ```
///
/// Filters are snapshotted when a cycle starts, so a `Proxy` shared behind an
/// `Arc` can serve concurrent [`send`](Proxy::send) calls.
pub struct Proxy {
    request: Option<Request>,
    filters: Vec<BoxedFilter>,
    adapter: BoxedAdapter,
    mount: Option<String>,
}

impl Proxy {
    pub fn new(adapter: impl Adapter) -> Self {
        Self { request: None, filters: Vec::new(), adapter: Arc::new(adapter), mount: None }
    }

    /// Appends a filter. Filters run in registration order on the way in and
    /// in reverse on the way out. Returns `self` for chaining.
    pub fn filter(mut self, filter: impl Filter) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Sets the path the host application serves this proxy under. The prefix
    /// is removed from inbound paths before they are joined with the target's
    /// base path.
    pub fn mount(mut self, prefix: impl Into<String>) -> Self {
        self.mount = Some(prefix.into());
        self
    }

    /// Binds the request the next [`to`](Proxy::to) will forward.
    pub fn forward(&mut self, request: Request) -> &mut Self {
        self.request = Some(request);
        self
    }

    /// The currently bound request, if any.
    pub fn request(&self) -> Option<&Request> {
        self.request.as_ref()
    }

    /// Forwards the bound request to `target` and returns the response.
    ///
    /// Fails with [`Error::MissingRequest`] before doing anything else when no
    /// request is bound.
    pub async fn to(&self, target: &str) -> Result<Response> {
        let request = self.request.clone().ok_or(Error::MissingRequest)?;
        self.send(request, target).await
    }

    /// Forwards `request` to `target` without touching the bound request.
    pub async fn send(&self, request: Request, target: &str) -> Result<Response> {
        let target: Target = target.parse()?;

        let original = match &self.mount {
            Some(mount) => rewrite::strip_mount(request.uri(), mount)?,
            None => request.uri().clone(),
        };
        let uri = rewrite::rewrite(&original, &target)?;
        debug!(%target, from = %request.uri(), to = %uri, "forwarding");

        let outbound = request.with_uri(uri);
        Pipeline::new(&self.filters, &self.adapter)
            .run(outbound, Response::new())
            .await
    }
}

impl std::fmt::Debug for Proxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proxy")
            .field("request", &self.request)
            .field("filters", &self.filters.len())
            .field("mount", &self.mount)
            .finish_non_exhaustive()
    }
}

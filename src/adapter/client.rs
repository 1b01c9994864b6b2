//! Adapter backed by the `hyper-util` legacy client.

use std::time::Duration;

use bytes::Bytes;
use http::Version;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tracing::debug;

use super::Adapter;
use crate::error::{Error, Result};
use crate::filter::BoxFuture;
use crate::request::Request;
use crate::response::Response;

/// Sends requests over plain HTTP/1.1 with a pooled hyper client.
///
/// The response body is collected in full before it enters the pipeline.
/// Cloning shares the connection pool.
///
/// ```rust,no_run
/// use std::time::Duration;
/// use relayer::{HyperAdapter, Proxy};
///
/// let adapter = HyperAdapter::builder()
///     .timeout(Duration::from_secs(10))
///     .build();
/// let _proxy = Proxy::new(adapter);
/// ```
#[derive(Clone, Debug)]
pub struct HyperAdapter {
    client: Client<HttpConnector, Full<Bytes>>,
    timeout: Option<Duration>,
}

impl HyperAdapter {
    /// Adapter with hyper's pool defaults and no timeout.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> HyperAdapterBuilder {
        HyperAdapterBuilder { timeout: None, pool_idle_timeout: None, pool_max_idle_per_host: None }
    }
}

impl Default for HyperAdapter {
    fn default() -> Self { Self::new() }
}

impl Adapter for HyperAdapter {
    fn send(&self, request: Request) -> BoxFuture<Result<Response>> {
        let client = self.client.clone();
        let timeout = self.timeout;

        Box::pin(async move {
            let mut req = request.into_inner().map(Full::new);
            // The outbound leg is always HTTP/1.1, whatever the client spoke.
            *req.version_mut() = Version::HTTP_11;
            debug!(method = %req.method(), uri = %req.uri(), "sending upstream");

            let exchange = async move {
                let res = client.request(req).await.map_err(Error::transport)?;
                let (parts, body) = res.into_parts();
                let body = body.collect().await.map_err(Error::transport)?.to_bytes();
                Ok::<_, Error>(Response::from(http::Response::from_parts(parts, body)))
            };

            match timeout {
                Some(limit) => tokio::time::timeout(limit, exchange)
                    .await
                    .map_err(|_| Error::Timeout(limit))?,
                None => exchange.await,
            }
        })
    }
}

/// Fluent builder for [`HyperAdapter`].
pub struct HyperAdapterBuilder {
    timeout: Option<Duration>,
    pool_idle_timeout: Option<Duration>,
    pool_max_idle_per_host: Option<usize>,
}

impl HyperAdapterBuilder {
    /// Upper bound for one exchange, from connect until the body is read.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = Some(max);
        self
    }

    pub fn build(self) -> HyperAdapter {
        let mut builder = Client::builder(TokioExecutor::new());
        if let Some(timeout) = self.pool_idle_timeout {
            builder.pool_idle_timeout(timeout);
        }
        if let Some(max) = self.pool_max_idle_per_host {
            builder.pool_max_idle_per_host(max);
        }
        HyperAdapter { client: builder.build_http(), timeout: self.timeout }
    }
}

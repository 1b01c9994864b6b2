//! Request type travelling through the pipeline.

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};
use http_body_util::BodyExt;
use hyper::body::Body;

use crate::error::{Error, Result};

/// An HTTP request with a fully collected body.
///
/// Cloning is cheap: the body is reference-counted [`Bytes`]. Rewriting the
/// destination goes through [`with_uri`](Request::with_uri), which leaves the
/// original untouched.
#[derive(Clone, Debug)]
pub struct Request {
    inner: http::Request<Bytes>,
}

impl Request {
    pub fn new(inner: http::Request<Bytes>) -> Self {
        Self { inner }
    }

    /// Collects the body of any `http` request, such as the
    /// `hyper::Request<Incoming>` a hyper service receives.
    ///
    /// A body that fails mid-stream is reported as [`Error::Body`].
    pub async fn collect<B>(req: http::Request<B>) -> Result<Self>
    where
        B: Body,
        B::Error: Into<crate::error::BoxError>,
    {
        let (parts, body) = req.into_parts();
        let body = body.collect().await.map_err(Error::body)?.to_bytes();
        Ok(Self::new(http::Request::from_parts(parts, body)))
    }

    pub fn method(&self) -> &Method { self.inner.method() }
    pub fn uri(&self) -> &Uri { self.inner.uri() }
    pub fn headers(&self) -> &HeaderMap { self.inner.headers() }
    pub fn headers_mut(&mut self) -> &mut HeaderMap { self.inner.headers_mut() }
    pub fn body(&self) -> &Bytes { self.inner.body() }

    /// Case-insensitive header lookup. Non-UTF-8 values are skipped.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a copy of this request pointed at `uri`. Method, headers, body,
    /// and extensions are carried over unchanged.
    pub fn with_uri(&self, uri: Uri) -> Self {
        let mut req = self.clone();
        *req.inner.uri_mut() = uri;
        req
    }

    pub fn into_inner(self) -> http::Request<Bytes> {
        self.inner
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(inner: http::Request<Bytes>) -> Self {
        Self::new(inner)
    }
}

//! Response type travelling back through the pipeline.
//!
//! Filters see the same [`Response`] value on the way out that the adapter
//! produced, and may replace or edit it before handing it up the chain.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};
use http_body_util::Full;

// ── Response ─────────────────────────────────────────────────────────────────

/// An HTTP response with a fully collected body.
///
/// ```rust
/// use relayer::Response;
/// use http::StatusCode;
///
/// let res = Response::builder()
///     .status(StatusCode::FORBIDDEN)
///     .header("x-blocked-by", "relayer")
///     .text("denied");
/// assert_eq!(res.status(), StatusCode::FORBIDDEN);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Response {
    inner: http::Response<Bytes>,
}

impl Response {
    /// Empty `200 OK`. This is the response the pipeline starts from.
    pub fn new() -> Self {
        Self::default()
    }

    /// `200 OK` with `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::builder().text(body)
    }

    /// Response with no body.
    pub fn status_only(code: StatusCode) -> Self {
        Self::builder().status(code).no_body()
    }

    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: HeaderMap::new(), status: StatusCode::OK }
    }

    pub fn status(&self) -> StatusCode { self.inner.status() }
    pub fn headers(&self) -> &HeaderMap { self.inner.headers() }
    pub fn headers_mut(&mut self) -> &mut HeaderMap { self.inner.headers_mut() }
    pub fn body(&self) -> &Bytes { self.inner.body() }

    /// Header lookup. Non-UTF-8 values are skipped.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name).and_then(|v| v.to_str().ok())
    }

    pub fn into_inner(self) -> http::Response<Bytes> {
        self.inner
    }

    /// Converts into the body type a hyper service returns.
    pub fn into_full(self) -> http::Response<Full<Bytes>> {
        self.inner.map(Full::new)
    }
}

impl From<http::Response<Bytes>> for Response {
    fn from(inner: http::Response<Bytes>) -> Self {
        Self { inner }
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `200 OK`. Terminated by a
/// body method. Header names or values that are not valid HTTP are dropped.
pub struct ResponseBuilder {
    headers: HeaderMap,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            self.headers.append(name, value);
        }
        self
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish("text/plain; charset=utf-8", Bytes::from(body.into()))
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: impl Into<Bytes>) -> Response {
        self.finish("application/json", body.into())
    }

    /// Terminate with a raw body and no content type.
    pub fn bytes(self, body: impl Into<Bytes>) -> Response {
        self.build(body.into())
    }

    /// Terminate with no body (e.g. `204 No Content`, redirects).
    pub fn no_body(self) -> Response {
        self.build(Bytes::new())
    }

    fn finish(mut self, content_type: &'static str, body: Bytes) -> Response {
        self.headers
            .entry(http::header::CONTENT_TYPE)
            .or_insert(HeaderValue::from_static(content_type));
        self.build(body)
    }

    fn build(self, body: Bytes) -> Response {
        let mut inner = http::Response::new(body);
        *inner.status_mut() = self.status;
        *inner.headers_mut() = self.headers;
        Response { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_response_is_empty_ok() {
        let res = Response::new();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.body().is_empty());
        assert!(res.headers().is_empty());
    }

    #[test]
    fn builder_keeps_explicit_content_type() {
        let res = Response::builder()
            .header("content-type", "application/problem+json")
            .json(r#"{"title":"nope"}"#);
        assert_eq!(res.header("content-type"), Some("application/problem+json"));
    }

    #[test]
    fn builder_drops_invalid_header() {
        let res = Response::builder().header("bad header", "x").no_body();
        assert!(res.headers().is_empty());
    }

    #[test]
    fn into_full_keeps_status_and_headers() {
        let res = Response::builder()
            .status(StatusCode::CREATED)
            .header("location", "/users/99")
            .no_body()
            .into_full();
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.headers()["location"], "/users/99");
    }
}

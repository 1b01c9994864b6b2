use http::header::LOCATION;
use http::uri::{Authority, Scheme};
use http::{HeaderName, HeaderValue, Uri};

use crate::error::{Error, Result};
use crate::filter::{BoxFuture, Filter};
use crate::pipeline::Next;
use crate::request::Request;
use crate::response::Response;

static X_PROXY_LOCATION: HeaderName = HeaderName::from_static("x-proxy-location");

/// Keeps clients from following backend redirects.
///
/// A `location` header is moved to `x-proxy-location`, so the host
/// application can decide what to do with it.
#[derive(Clone, Copy, Debug, Default)]
pub struct RemoveLocation;

impl Filter for RemoveLocation {
    fn call(&self, request: Request, response: Response, next: Next) -> BoxFuture<Result<Response>> {
        Box::pin(async move {
            let mut res = next.run(request, response).await?;
            if let Some(location) = res.headers_mut().remove(LOCATION) {
                res.headers_mut().insert(X_PROXY_LOCATION.clone(), location);
            }
            Ok::<_, Error>(res)
        })
    }
}

/// Points absolute backend redirects at the public origin.
///
/// A `location` whose host and port match the outbound request is rewritten
/// to the scheme and authority of `public`. Relative locations and redirects
/// to other hosts are left alone.
///
/// ```rust
/// use relayer::middleware::RewriteLocation;
///
/// let _filter = RewriteLocation::new("https://shop.example.com").unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct RewriteLocation {
    scheme: Scheme,
    authority: Authority,
}

impl RewriteLocation {
    /// Fails with [`Error::IncompleteTarget`] unless `public` has a scheme and
    /// an authority.
    pub fn new(public: &str) -> Result<Self> {
        let uri: Uri = public.parse().map_err(|source| Error::MalformedTarget {
            target: public.to_owned(),
            source,
        })?;
        let parts = uri.into_parts();
        match (parts.scheme, parts.authority) {
            (Some(scheme), Some(authority)) => Ok(Self { scheme, authority }),
            _ => Err(Error::IncompleteTarget(public.to_owned())),
        }
    }

    fn rewrite(&self, location: &HeaderValue, backend: &Uri) -> Option<HeaderValue> {
        let location: Uri = location.to_str().ok()?.parse().ok()?;
        let same_host = location.host()?.eq_ignore_ascii_case(backend.host()?);
        if !same_host || effective_port(&location) != effective_port(backend) {
            return None;
        }

        let mut parts = location.into_parts();
        parts.scheme = Some(self.scheme.clone());
        parts.authority = Some(self.authority.clone());
        let rewritten = Uri::from_parts(parts).ok()?;
        HeaderValue::try_from(rewritten.to_string()).ok()
    }
}

impl Filter for RewriteLocation {
    fn call(&self, request: Request, response: Response, next: Next) -> BoxFuture<Result<Response>> {
        let this = self.clone();
        let backend = request.uri().clone();
        Box::pin(async move {
            let mut res = next.run(request, response).await?;
            let rewritten = res.headers().get(LOCATION).and_then(|l| this.rewrite(l, &backend));
            if let Some(location) = rewritten {
                res.headers_mut().insert(LOCATION, location);
            }
            Ok::<_, Error>(res)
        })
    }
}

fn effective_port(uri: &Uri) -> Option<u16> {
    uri.port_u16().or(match uri.scheme_str() {
        Some("http") => Some(80),
        Some("https") => Some(443),
        _ => None,
    })
}

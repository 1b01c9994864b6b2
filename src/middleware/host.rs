use http::HeaderValue;
use http::header::HOST;

use crate::error::Result;
use crate::filter::{BoxFuture, Filter};
use crate::pipeline::Next;
use crate::request::Request;
use crate::response::Response;

/// Points the `host` header at the backend.
///
/// Rewriting only replaces the URI; without this filter the backend sees the
/// `host` the client sent to the proxy. Ports that are the default for the
/// scheme are left out of the header.
#[derive(Clone, Copy, Debug, Default)]
pub struct SetHost;

impl Filter for SetHost {
    fn call(&self, mut request: Request, response: Response, next: Next) -> BoxFuture<Result<Response>> {
        if let Some(value) = host_header(&request) {
            request.headers_mut().insert(HOST, value);
        }
        next.run(request, response)
    }
}

fn host_header(request: &Request) -> Option<HeaderValue> {
    let uri = request.uri();
    let host = uri.host()?;
    let value = match (uri.scheme_str(), uri.port_u16()) {
        (Some("http"), Some(80)) | (Some("https"), Some(443)) | (_, None) => host.to_owned(),
        (_, Some(port)) => format!("{host}:{port}"),
    };
    HeaderValue::try_from(value).ok()
}

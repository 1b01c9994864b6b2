use http::header::TRANSFER_ENCODING;

use crate::error::{Error, Result};
use crate::filter::{BoxFuture, Filter};
use crate::pipeline::Next;
use crate::request::Request;
use crate::response::Response;

/// Removes `transfer-encoding` from responses.
///
/// Adapters hand back a fully collected body, so the backend's hop-by-hop
/// framing no longer describes what the client receives. The body is still
/// in the backend's content coding: `content-encoding` is left alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct RemoveEncoding;

impl Filter for RemoveEncoding {
    fn call(&self, request: Request, response: Response, next: Next) -> BoxFuture<Result<Response>> {
        Box::pin(async move {
            let mut res = next.run(request, response).await?;
            res.headers_mut().remove(TRANSFER_ENCODING);
            Ok::<_, Error>(res)
        })
    }
}

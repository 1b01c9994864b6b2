use std::time::Instant;

use tracing::{info, warn};

use crate::error::Result;
use crate::filter::{BoxFuture, Filter};
use crate::pipeline::Next;
use crate::request::Request;
use crate::response::Response;

/// Logs every forwarded request.
///
/// Register it first so the measured latency covers the other filters too.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl Filter for Trace {
    fn call(&self, request: Request, response: Response, next: Next) -> BoxFuture<Result<Response>> {
        Box::pin(async move {
            let method = request.method().clone();
            let uri = request.uri().clone();
            let started = Instant::now();

            let result = next.run(request, response).await;
            let latency_ms = started.elapsed().as_millis() as u64;

            match &result {
                Ok(res) => info!(%method, %uri, status = res.status().as_u16(), latency_ms, "forwarded"),
                Err(e) => warn!(%method, %uri, latency_ms, error = %e, "forward failed"),
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::StatusCode;

    use crate::{DummyAdapter, Proxy};

    use super::*;

    #[tokio::test]
    async fn passes_response_through() {
        let mut proxy = Proxy::new(DummyAdapter).filter(Trace);
        let req: Request = http::Request::post("/echo").body(Bytes::from_static(b"hi")).unwrap().into();

        let res = proxy.forward(req).to("http://b.internal").await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.body().as_ref(), b"hi");
    }
}

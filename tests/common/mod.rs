//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use relayer::{BoxFuture, Error, Next, Request, Response, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Builds an inbound request with an empty body.
pub fn get(uri: &str) -> Request {
    http::Request::get(uri).body(Bytes::new()).unwrap().into()
}

/// Shared, ordered record of pipeline events.
pub type Trace = Arc<Mutex<Vec<String>>>;

/// A filter that records `<name>:pre` and `<name>:post` around `next`.
pub fn tracer(
    name: &'static str,
    trace: Trace,
) -> impl Fn(Request, Response, Next) -> BoxFuture<Result<Response>> + Send + Sync + 'static {
    move |req: Request, res: Response, next: Next| -> BoxFuture<Result<Response>> {
        let trace = Arc::clone(&trace);
        Box::pin(async move {
            trace.lock().unwrap().push(format!("{name}:pre"));
            let res = next.run(req, res).await?;
            trace.lock().unwrap().push(format!("{name}:post"));
            Ok::<_, Error>(res)
        })
    }
}

/// An adapter that counts calls, records the outbound URI and answers `200`.
#[derive(Clone, Default)]
pub struct RecordingAdapter {
    pub calls: Arc<AtomicUsize>,
    pub uris: Arc<Mutex<Vec<String>>>,
    pub trace: Option<Trace>,
}

impl RecordingAdapter {
    pub fn traced(trace: Trace) -> Self {
        Self { trace: Some(trace), ..Self::default() }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_uri(&self) -> Option<String> {
        self.uris.lock().unwrap().last().cloned()
    }
}

impl relayer::Adapter for RecordingAdapter {
    fn send(&self, request: Request) -> BoxFuture<Result<Response>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.uris.lock().unwrap().push(request.uri().to_string());
        if let Some(trace) = &self.trace {
            trace.lock().unwrap().push("transport".to_owned());
        }
        Box::pin(async { Ok::<_, Error>(Response::text("from backend")) })
    }
}

/// Start a one-shot raw HTTP backend on an ephemeral port.
///
/// Returns the address and a receiver for the request head it saw.
pub async fn start_mock_backend(status: &'static str, body: &'static str) -> (std::net::SocketAddr, oneshot::Receiver<String>) {
    start_mock_backend_with(status, &[], body.as_bytes()).await
}

/// Like [`start_mock_backend`], with extra response headers and a raw body.
pub async fn start_mock_backend_with(
    status: &'static str,
    headers: &'static [(&'static str, &'static str)],
    body: &'static [u8],
) -> (std::net::SocketAddr, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        let _ = tx.send(String::from_utf8_lossy(&head).into_owned());

        let mut response = format!("HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n", body.len());
        for (name, value) in headers {
            response.push_str(&format!("{name}: {value}\r\n"));
        }
        response.push_str("\r\n");

        let mut response = response.into_bytes();
        response.extend_from_slice(body);
        let _ = socket.write_all(&response).await;
        let _ = socket.shutdown().await;
    });

    (addr, rx)
}

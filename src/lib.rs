//! # relayer
//!
//! The request-forwarding core of an HTTP reverse proxy. Nothing more.
//!
//! Give it an inbound request and a target such as
//! `https://backend.internal/base`. relayer rewrites the destination, runs
//! the request through your filters, sends it with a transport adapter and
//! hands the response back through the same filters in reverse.
//!
//! What the host application owns, and relayer ignores:
//!
//! - **Listening**: accept loops, TLS termination, graceful shutdown
//! - **Backend selection**: one call forwards to exactly one target
//! - **Retries and caching**: a filter or an adapter can add them
//!
//! What's left for relayer:
//!
//! - URI rewriting: scheme, host, port and base path from the target
//! - An onion pipeline: filters wrap each other and the transport
//! - Pluggable transport: [`HyperAdapter`], [`DummyAdapter`], or any closure
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use relayer::{HyperAdapter, Next, Proxy, Request, Response, Result, middleware};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut proxy = Proxy::new(HyperAdapter::new())
//!         .mount("/shop")
//!         .filter(middleware::Trace)
//!         .filter(tag);
//!
//!     // Usually handed over by your server, e.g. via `Request::collect`.
//!     let req: Request = http::Request::get("http://origin.local/shop/items?x=1")
//!         .body(bytes::Bytes::new())
//!         .unwrap()
//!         .into();
//!
//!     // Sent to http://backend.internal:80/base/items?x=1
//!     let res = proxy.forward(req).to("http://backend.internal/base").await?;
//!     println!("{}", res.status());
//!     Ok(())
//! }
//!
//! async fn tag(req: Request, res: Response, next: Next) -> Result<Response> {
//!     let mut res = next.run(req, res).await?;
//!     res.headers_mut().insert("x-proxied-by", "relayer".parse().unwrap());
//!     Ok(res)
//! }
//! ```

mod error;
mod filter;
mod pipeline;
mod proxy;
mod request;
mod response;
mod target;

pub mod adapter;
pub mod middleware;
pub mod rewrite;

pub use adapter::{Adapter, DummyAdapter, HyperAdapter};
pub use error::{BoxError, Error, Result};
pub use filter::{BoxFuture, Filter};
pub use pipeline::Next;
pub use proxy::Proxy;
pub use request::Request;
pub use response::{Response, ResponseBuilder};
pub use target::Target;

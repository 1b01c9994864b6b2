//! Bundled filters.
//!
//! Filters intercept the outbound request and the backend response and are
//! the right place for cross-cutting concerns: structured tracing, header
//! hygiene, redirect handling.
//!
//! | Filter | Phase | Effect |
//! |---|---|---|
//! | [`Trace`] | both | one `info!` per request with method, uri, status, latency |
//! | [`SetHost`] | request | `host` header ← outbound authority |
//! | [`RemoveEncoding`] | response | drops `transfer-encoding`, keeps `content-encoding` |
//! | [`RemoveLocation`] | response | moves `location` to `x-proxy-location` |
//! | [`RewriteLocation`] | response | points backend redirects at a public base |
//!
//! ```rust
//! use relayer::{HyperAdapter, Proxy, middleware};
//!
//! let _proxy = Proxy::new(HyperAdapter::new())
//!     .filter(middleware::Trace)
//!     .filter(middleware::SetHost)
//!     .filter(middleware::RemoveEncoding);
//! ```

mod encoding;
mod host;
mod location;
mod trace;

pub use self::encoding::RemoveEncoding;
pub use self::host::SetHost;
pub use self::location::{RemoveLocation, RewriteLocation};
pub use self::trace::Trace;

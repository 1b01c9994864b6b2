//! Forward a single request through relayer and print the response.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example forward -- http://localhost:8080/api /users/42
//!
//! The first argument is the target, the second the inbound path as it would
//! arrive at the host application under `/shop`.

use bytes::Bytes;
use relayer::{HyperAdapter, Next, Proxy, Request, Response, Result, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let target = args.next().unwrap_or_else(|| "http://localhost:8080".to_owned());
    let path = args.next().unwrap_or_else(|| "/".to_owned());

    let mut proxy = Proxy::new(HyperAdapter::new())
        .mount("/shop")
        .filter(middleware::Trace)
        .filter(middleware::SetHost)
        .filter(middleware::RemoveEncoding)
        .filter(proxied_by);

    let req: Request = http::Request::get(format!("http://origin.local/shop{path}"))
        .header("host", "origin.local")
        .body(Bytes::new())
        .expect("valid request")
        .into();

    let res = proxy.forward(req).to(&target).await?;

    println!("{}", res.status());
    for (name, value) in res.headers() {
        println!("{name}: {}", value.to_str().unwrap_or("<binary>"));
    }
    println!();
    println!("{}", String::from_utf8_lossy(res.body()));
    Ok(())
}

// Tag every response so clients can tell it went through the proxy.
async fn proxied_by(req: Request, res: Response, next: Next) -> Result<Response> {
    let mut res = next.run(req, res).await?;
    res.headers_mut().insert("x-proxied-by", http::HeaderValue::from_static("relayer"));
    Ok(res)
}

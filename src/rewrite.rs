//! URI rewriting.
//!
//! Merges an inbound request URI with a [`Target`]. The steps run in a fixed
//! order:
//!
//! 1. scheme ← target scheme
//! 2. host ← target host
//! 3. port ← explicit non-zero target port, else 80 for `http`, 443 for
//!    `https`, else none. The inbound port is never consulted.
//! 4. path ← `rtrim(base, '/') + '/' + ltrim(path, '/')` when the target has a
//!    base path, otherwise untouched
//!
//! Query and user-info come from the inbound URI unchanged.

use http::Uri;
use http::uri::{Authority, PathAndQuery, Scheme};

use crate::error::Result;
use crate::target::Target;

/// Returns the URI `original` is forwarded to. `original` is not modified.
pub fn rewrite(original: &Uri, target: &Target) -> Result<Uri> {
    let mut parts = original.clone().into_parts();

    parts.scheme = Some(Scheme::try_from(target.scheme())?);
    parts.authority = Some(authority(original, target)?);

    if !target.path().is_empty() {
        let path = join(target.path(), original.path());
        let path_and_query = match original.query() {
            Some(query) => format!("{path}?{query}"),
            None => path,
        };
        parts.path_and_query = Some(PathAndQuery::try_from(path_and_query.as_str())?);
    } else if parts.path_and_query.is_none() {
        parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }

    Ok(Uri::from_parts(parts)?)
}

/// Removes a mount prefix from the path of `uri`.
///
/// `/shop/items` under mount `/shop` becomes `/items`, `/shop` becomes `/`.
/// Paths outside the mount (`/shopping`) are returned unchanged.
pub fn strip_mount(uri: &Uri, mount: &str) -> Result<Uri> {
    let mount = mount.trim_end_matches('/');
    if mount.is_empty() {
        return Ok(uri.clone());
    }

    let rest = match uri.path().strip_prefix(mount) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return Ok(uri.clone()),
    };
    let path = if rest.is_empty() { "/" } else { rest };

    let mut parts = uri.clone().into_parts();
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_owned(),
    };
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query.as_str())?);
    Ok(Uri::from_parts(parts)?)
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn authority(original: &Uri, target: &Target) -> Result<Authority> {
    let userinfo = original
        .authority()
        .and_then(|a| a.as_str().rsplit_once('@'))
        .map(|(userinfo, _)| userinfo);

    let mut authority = String::new();
    if let Some(userinfo) = userinfo {
        authority.push_str(userinfo);
        authority.push('@');
    }
    authority.push_str(target.host());
    if let Some(port) = target.effective_port() {
        authority.push(':');
        authority.push_str(&port.to_string());
    }
    Ok(Authority::try_from(authority.as_str())?)
}

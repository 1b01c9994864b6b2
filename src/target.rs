//! Target descriptor: where a request is forwarded to.

use std::fmt;
use std::str::FromStr;

use http::Uri;

use crate::error::Error;

/// The scheme, host, optional port and optional base path of a backend,
/// parsed from a target string such as `https://backend.internal:8443/api`.
///
/// Query and fragment of the target string are ignored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Target {
    scheme: String,
    host: String,
    port: Option<u16>,
    path: String,
}

impl Target {
    pub fn scheme(&self) -> &str { &self.scheme }
    pub fn host(&self) -> &str { &self.host }
    pub fn port(&self) -> Option<u16> { self.port }

    /// Base path prefix. Empty when the target string has none.
    pub fn path(&self) -> &str { &self.path }

    /// The port the rewritten URI carries: the explicit one, else the
    /// well-known port of `http`/`https`, else none. Port `0` counts as absent.
    pub fn effective_port(&self) -> Option<u16> {
        self.port.filter(|&port| port != 0).or(match self.scheme.as_str() {
            "http" => Some(80),
            "https" => Some(443),
            _ => None,
        })
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uri: Uri = s.parse().map_err(|source| Error::MalformedTarget {
            target: s.to_owned(),
            source,
        })?;

        let (Some(scheme), Some(host)) = (uri.scheme_str(), uri.host()) else {
            return Err(Error::IncompleteTarget(s.to_owned()));
        };
        if host.is_empty() {
            return Err(Error::IncompleteTarget(s.to_owned()));
        }

        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            host: host.to_owned(),
            port: uri.port_u16(),
            path: base_path(s, &uri).to_owned(),
        })
    }
}

// `Uri::path` reports `/` for `http://host` as well as `http://host/`; only
// the latter names a base path.
fn base_path<'a>(raw: &str, uri: &'a Uri) -> &'a str {
    let after_authority = raw
        .split_once("://")
        .zip(uri.authority())
        .and_then(|((_, rest), authority)| rest.strip_prefix(authority.as_str()));

    match after_authority {
        Some(rest) if rest.starts_with('/') => uri.path(),
        _ => "",
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        f.write_str(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_parts() {
        let t: Target = "https://backend.internal:8443/api/?debug=1".parse().unwrap();
        assert_eq!(t.scheme(), "https");
        assert_eq!(t.host(), "backend.internal");
        assert_eq!(t.port(), Some(8443));
        assert_eq!(t.path(), "/api/");
        assert_eq!(t.to_string(), "https://backend.internal:8443/api/");
    }

    #[test]
    fn bare_origin_has_no_path() {
        let t: Target = "https://a.example".parse().unwrap();
        assert_eq!(t.path(), "");

        let t: Target = "https://a.example/".parse().unwrap();
        assert_eq!(t.path(), "/");
    }

    #[test]
    fn default_ports() {
        let http: Target = "http://a.example".parse().unwrap();
        let https: Target = "https://a.example".parse().unwrap();
        let ftp: Target = "ftp://a.example".parse().unwrap();

        assert_eq!(http.port(), None);
        assert_eq!(http.effective_port(), Some(80));
        assert_eq!(https.effective_port(), Some(443));
        assert_eq!(ftp.effective_port(), None);
    }

    #[test]
    fn explicit_port_beats_default() {
        let t: Target = "http://a.example:8080".parse().unwrap();
        assert_eq!(t.effective_port(), Some(8080));
    }

    #[test]
    fn zero_port_falls_back_to_default() {
        let t: Target = "http://a.example:0".parse().unwrap();
        assert_eq!(t.port(), Some(0));
        assert_eq!(t.effective_port(), Some(80));

        let t: Target = "ftp://a.example:0".parse().unwrap();
        assert_eq!(t.effective_port(), None);
    }

    #[test]
    fn scheme_is_lowercased() {
        let t: Target = "HTTPS://a.example".parse().unwrap();
        assert_eq!(t.scheme(), "https");
        assert_eq!(t.effective_port(), Some(443));
    }

    #[test]
    fn rejects_garbage() {
        let err = "http://bad host/".parse::<Target>().unwrap_err();
        assert!(matches!(err, Error::MalformedTarget { .. }), "{err:?}");
    }

    #[test]
    fn rejects_target_without_scheme() {
        let err = "backend.internal:8080".parse::<Target>().unwrap_err();
        assert!(matches!(err, Error::IncompleteTarget(_)), "{err:?}");

        let err = "/just/a/path".parse::<Target>().unwrap_err();
        assert!(matches!(err, Error::IncompleteTarget(_)), "{err:?}");
    }
}

//! Server Configuration

use std::path::PathBuf;

use anyhow::Context;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SITE_URL: &str = "http://localhost:3000";
const DEFAULT_STATIC_DIR: &str = "static";

/// Process-wide settings read once at startup
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,

    /// Public origin used for payment callbacks when a request has no `Origin`
    pub site_url: String,

    /// Built frontend (index.html + wasm bundle)
    pub static_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.into());
        let raw_site_url = lookup("SITE_URL").unwrap_or_else(|| DEFAULT_SITE_URL.into());
        let site_url = parse_http_origin(&raw_site_url).with_context(|| {
            format!("SITE_URL '{raw_site_url}' must be an http(s) origin without path or query")
        })?;

        Ok(Self {
            bind_addr,
            site_url,
            static_dir: PathBuf::from(static_dir),
        })
    }
}

/// Serialized origin (`scheme://host[:port]`) of an http(s) URL.
///
/// Payment callbacks are built by appending a path to this value, so
/// anything beyond the origin (path, query, fragment, credentials) is
/// rejected rather than dropped.
pub fn parse_http_origin(value: &str) -> Option<String> {
    let url = Url::parse(value).ok()?;

    if !matches!(url.scheme(), "http" | "https") || url.host().is_none() {
        return None;
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return None;
    }
    if !url.username().is_empty() || url.password().is_some() {
        return None;
    }

    Some(url.origin().ascii_serialization())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.site_url, "http://localhost:3000");
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn test_site_url_trailing_slash_trimmed() {
        let config = ServerConfig::from_lookup(|key| {
            (key == "SITE_URL").then(|| "https://course.example/".to_string())
        })
        .unwrap();
        assert_eq!(config.site_url, "https://course.example");
    }

    #[test]
    fn test_rejects_non_http_site_url() {
        let result = ServerConfig::from_lookup(|key| {
            (key == "SITE_URL").then(|| "course.example".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_site_url_with_path() {
        let result = ServerConfig::from_lookup(|key| {
            (key == "SITE_URL").then(|| "https://course.example/shop?ref=1".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_http_origin() {
        assert_eq!(
            parse_http_origin("http://localhost:3000").as_deref(),
            Some("http://localhost:3000")
        );
        assert_eq!(
            parse_http_origin("HTTPS://Shop.Example:443/").as_deref(),
            Some("https://shop.example")
        );
        assert_eq!(parse_http_origin("https://"), None);
        assert_eq!(parse_http_origin("javascript:alert(1)"), None);
        assert_eq!(parse_http_origin("ftp://files.example"), None);
        assert_eq!(parse_http_origin("https://shop.example/a?b=1#c"), None);
        assert_eq!(parse_http_origin("https://shop.example/#top"), None);
        assert_eq!(parse_http_origin("https://user:pw@shop.example"), None);
    }
}

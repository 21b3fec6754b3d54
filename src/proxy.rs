//! Forward-proxy descriptor.

use std::fmt;
use std::net::Ipv6Addr;

use serde::{Deserialize, Serialize};

use crate::error::ProberError;

/// Where probe requests are sent.
///
/// `None` connects directly. Proxy environment variables are never
/// consulted, so the setting here is the only thing that decides the route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProxySetting {
    #[default]
    None,
    /// HTTP forward proxy; https targets are tunnelled with CONNECT.
    Http { host: String, port: u16 },
    /// SOCKS5 proxy.
    Socks { host: String, port: u16 },
}

impl ProxySetting {
    pub fn http(host: impl Into<String>, port: u16) -> Self {
        ProxySetting::Http {
            host: host.into(),
            port,
        }
    }

    pub fn socks(host: impl Into<String>, port: u16) -> Self {
        ProxySetting::Socks {
            host: host.into(),
            port,
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, ProxySetting::None)
    }

    /// Proxy URL, or `None` for a direct connection.
    pub fn url(&self) -> Option<String> {
        match self {
            ProxySetting::None => None,
            ProxySetting::Http { host, port } => Some(format!("http://{}:{}", url_host(host), port)),
            ProxySetting::Socks { host, port } => {
                Some(format!("socks5://{}:{}", url_host(host), port))
            }
        }
    }

    /// Semantic problems with the descriptor, if any.
    pub fn problem(&self) -> Option<&'static str> {
        match self {
            ProxySetting::None => None,
            ProxySetting::Http { host, port } | ProxySetting::Socks { host, port } => {
                if host.trim().is_empty() {
                    Some("host is empty")
                } else if *port == 0 {
                    Some("port must be non-zero")
                } else {
                    None
                }
            }
        }
    }

    /// Translate into the client-side proxy, `None` meaning direct.
    pub(crate) fn to_reqwest(&self) -> Result<Option<reqwest::Proxy>, ProberError> {
        if let Some(reason) = self.problem() {
            return Err(ProberError::InvalidProxy {
                proxy: self.to_string(),
                reason: reason.to_string(),
            });
        }
        let Some(url) = self.url() else {
            return Ok(None);
        };
        reqwest::Proxy::all(&url)
            .map(Some)
            .map_err(|e| ProberError::InvalidProxy {
                proxy: url,
                reason: e.to_string(),
            })
    }
}

/// IPv6 literals need brackets inside a URL authority.
fn url_host(host: &str) -> String {
    if host.parse::<Ipv6Addr>().is_ok() {
        format!("[{}]", host)
    } else {
        host.to_string()
    }
}

impl fmt::Display for ProxySetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.url() {
            Some(url) => f.write_str(&url),
            None => f.write_str("none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_has_no_proxy() {
        assert!(ProxySetting::None.is_direct());
        assert!(ProxySetting::None.to_reqwest().unwrap().is_none());
        assert_eq!(ProxySetting::None.to_string(), "none");
    }

    #[test]
    fn test_proxy_urls() {
        assert_eq!(
            ProxySetting::http("10.0.0.1", 3128).url().as_deref(),
            Some("http://10.0.0.1:3128")
        );
        assert_eq!(
            ProxySetting::socks("localhost", 1080).url().as_deref(),
            Some("socks5://localhost:1080")
        );
        assert!(ProxySetting::http("10.0.0.1", 3128).to_reqwest().unwrap().is_some());
    }

    #[test]
    fn test_ipv6_host_is_bracketed() {
        let proxy = ProxySetting::http("::1", 3128);
        assert_eq!(proxy.url().as_deref(), Some("http://[::1]:3128"));
        assert!(proxy.to_reqwest().unwrap().is_some());

        let proxy = ProxySetting::socks("fe80::1", 1080);
        assert_eq!(proxy.url().as_deref(), Some("socks5://[fe80::1]:1080"));
        assert!(proxy.to_reqwest().unwrap().is_some());

        // Already bracketed hosts are left alone.
        let proxy = ProxySetting::http("[::1]", 3128);
        assert_eq!(proxy.url().as_deref(), Some("http://[::1]:3128"));
    }

    #[test]
    fn test_invalid_proxy_rejected() {
        let err = ProxySetting::http("", 3128).to_reqwest().unwrap_err();
        assert!(matches!(err, ProberError::InvalidProxy { .. }));

        let err = ProxySetting::socks("proxy.local", 0).to_reqwest().unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_deserialize_tagged() {
        #[derive(Deserialize)]
        struct Wrapper {
            proxy: ProxySetting,
        }

        let w: Wrapper = toml::from_str(
            r#"
            [proxy]
            kind = "http"
            host = "proxy.corp"
            port = 8080
            "#,
        )
        .unwrap();
        assert_eq!(w.proxy, ProxySetting::http("proxy.corp", 8080));

        let w: Wrapper = toml::from_str("proxy = { kind = \"none\" }").unwrap();
        assert!(w.proxy.is_direct());
    }
}

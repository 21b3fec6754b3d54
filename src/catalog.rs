//! Built-in beacon servers.
//!
//! Every entry answers a plain-HTTP GET with a small fixed response and is
//! operated for the purpose of connectivity and captive-portal detection.

use std::borrow::Cow;
use std::fmt;

/// A probe target: display name plus the URL to GET.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CheckServer {
    name: Cow<'static, str>,
    url: Cow<'static, str>,
}

impl CheckServer {
    /// Create a server entry from owned or borrowed strings.
    pub fn new(name: impl Into<Cow<'static, str>>, url: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Const constructor for the compiled-in table.
    pub const fn builtin(name: &'static str, url: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            url: Cow::Borrowed(url),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for CheckServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

/// The fixed catalog, in rotation order.
pub static CATALOG: [CheckServer; 5] = [
    CheckServer::builtin("Google", "http://clients3.google.com/generate_204"),
    CheckServer::builtin("Cloudflare", "http://cp.cloudflare.com/generate_204"),
    CheckServer::builtin("Microsoft", "http://www.msftconnecttest.com/connecttest.txt"),
    CheckServer::builtin("Apple", "http://captive.apple.com/hotspot-detect.html"),
    CheckServer::builtin("Mozilla", "http://detectportal.firefox.com/success.txt"),
];

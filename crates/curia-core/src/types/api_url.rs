//! Admin API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::Error;

/// A validated base URL for the admin REST API.
///
/// Network URLs must use HTTPS; plain HTTP is allowed for localhost so the
/// toolkit can be pointed at a dev server.
///
/// # Example
///
/// ```
/// use curia_core::ApiUrl;
///
/// let api = ApiUrl::new("https://api.example.com").unwrap();
/// assert_eq!(api.endpoint("user/all"), "https://api.example.com/user/all");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns a precondition error if the URL is relative, has no host, or
    /// uses HTTP against a non-localhost host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| Error::precondition(format!("invalid API URL '{s}': {e}")))?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the full URL for a path below the API root.
    pub fn endpoint(&self, path: &str) -> String {
        // The url crate always adds a trailing slash to root paths, so trim
        // before joining.
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(Error::precondition(format!(
                "invalid API URL '{original}': must be an absolute URL"
            )));
        }

        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        let scheme = url.scheme();
        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(Error::precondition(format!(
                "invalid API URL '{original}': must use HTTPS (HTTP allowed only for localhost)"
            )));
        }

        if url.host_str().is_none() {
            return Err(Error::precondition(format!(
                "invalid API URL '{original}': must have a host"
            )));
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

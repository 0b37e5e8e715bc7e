//! Bearer token newtype.

use serde::{Deserialize, Serialize};

/// An opaque bearer token for the admin API.
///
/// The engine never inspects or refreshes it; when a call comes back with an
/// authentication error the token is simply surfaced as stale.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for AccessToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(\"[REDACTED]\")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_the_token() {
        let token = AccessToken::new("secret-bearer-value");
        let printed = format!("{token:?}");
        assert!(!printed.contains("secret"));
    }
}

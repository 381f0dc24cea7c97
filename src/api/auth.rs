use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use std::fmt;

use crate::domain::Credentials;

/// Unpadded URL-safe base64 (`-` and `_` instead of `+` and `/`, no `=`).
pub fn encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Value of the `Authorization` header: `{encoded username}.{encoded password}`.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn derive(credentials: &Credentials) -> Self {
        let username = encode(credentials.username.as_bytes());
        let password = encode(credentials.password.as_bytes());

        let mut token = String::with_capacity(username.len() + 1 + password.len());
        token.push_str(&username);
        token.push('.');
        token.push_str(&password);
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are reversible, keep them out of logs.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

use std::fmt;

/// Opaque bearer token issued by the session manager
#[derive(Clone, PartialEq, Eq)]
pub struct AuthCredential(String);

impl AuthCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header, e.g. `Bearer <token>`
    pub fn authorization_header(&self, prefix: &str) -> String {
        format!("{} {}", prefix, self.0)
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthCredential(***)")
    }
}

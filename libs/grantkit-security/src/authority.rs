use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An authority (role, permission name, ...) granted to a principal.
///
/// Authorities are opaque: two authorities are equal when their names are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantedAuthority(String);

impl GrantedAuthority {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The authority name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GrantedAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GrantedAuthority {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for GrantedAuthority {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// Lets `HashMap<GrantedAuthority, _>` be queried with a plain `&str`.
impl Borrow<str> for GrantedAuthority {
    fn borrow(&self) -> &str {
        &self.0
    }
}

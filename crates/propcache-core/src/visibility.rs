//! Visibility of property accessors and the table visibility policy.

use std::fmt;

/// Visibility modifier for a property's getter or setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// Check if this is `Public`.
    #[inline]
    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// Which declared properties a type table admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityPolicy {
    /// Public and non-public instance properties.
    All,
    /// Properties that are public overall.
    PublicOnly,
}

impl VisibilityPolicy {
    /// Select the policy from the `public_only` flag used by the provider API.
    #[inline]
    pub fn from_public_only(public_only: bool) -> Self {
        if public_only {
            VisibilityPolicy::PublicOnly
        } else {
            VisibilityPolicy::All
        }
    }
}

impl fmt::Display for VisibilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisibilityPolicy::All => write!(f, "all"),
            VisibilityPolicy::PublicOnly => write!(f, "public"),
        }
    }
}

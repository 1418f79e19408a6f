//! Category acceptance policy

use std::collections::BTreeSet;

use crate::error::IngestError;

/// Which categories an ingested command may use
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryPolicy {
    /// Any non-empty category is accepted
    #[default]
    Open,
    /// Only categories in the set are accepted (exact match)
    Restricted(BTreeSet<String>),
}

impl CategoryPolicy {
    /// Build a restricted policy from category names
    pub fn restricted<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Restricted(allowed.into_iter().map(Into::into).collect())
    }

    /// Check a category against the policy
    pub fn check(&self, category: &str) -> Result<(), IngestError> {
        match self {
            Self::Open => Ok(()),
            Self::Restricted(allowed) if allowed.contains(category) => Ok(()),
            Self::Restricted(allowed) => Err(IngestError::UnknownCategory {
                category: category.to_string(),
                allowed: allowed.iter().cloned().collect(),
            }),
        }
    }

    /// Categories named by the policy (empty when open)
    pub fn allowed(&self) -> Vec<String> {
        match self {
            Self::Open => Vec::new(),
            Self::Restricted(allowed) => allowed.iter().cloned().collect(),
        }
    }

    /// Mode name for display
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Restricted(_) => "restricted",
        }
    }
}

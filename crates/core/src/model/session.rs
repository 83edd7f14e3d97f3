use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for one continuous quiz-taking run.
///
/// Stamped as `%Y%m%d%H%M%S`, a fixed-width numeric string, so lexicographic
/// order equals chronological order. The trend query relies on this.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps an existing identifier, e.g. one read back from the store.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Mints an identifier from a start timestamp.
    #[must_use]
    pub fn at(started: DateTime<Utc>) -> Self {
        Self(started.format("%Y%m%d%H%M%S").to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn stamp_is_fixed_width_numeric() {
        let id = SessionId::at(fixed_now());
        assert_eq!(id.as_str(), "20240101000000");
        assert_eq!(id.as_str().len(), 14);
        assert!(id.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn lexicographic_order_is_chronological() {
        let earlier = SessionId::at(fixed_now());
        let later = SessionId::at(fixed_now() + chrono::Duration::days(1));
        assert!(earlier < later);
    }
}

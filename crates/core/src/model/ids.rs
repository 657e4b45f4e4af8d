use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Stable key of one gated question inside a problem, e.g. `"compute.gamma"`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubcheckId(String);

impl SubcheckId {
    /// Creates a new `SubcheckId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying key
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a problem definition in the catalog, e.g. `"force-triangle"`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemId(String);

impl ProblemId {
    /// Creates a new `ProblemId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying key
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for one learner attempt
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a fresh random `SessionId`
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID
    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Borrow<str> for SubcheckId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SubcheckId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&str> for ProblemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for SubcheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubcheckId({})", self.0)
    }
}

impl fmt::Debug for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProblemId({})", self.0)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for SubcheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn subcheck_id_lookup_by_str() {
        let mut flags = HashMap::new();
        flags.insert(SubcheckId::new("compute.gamma"), true);
        assert_eq!(flags.get("compute.gamma"), Some(&true));
        assert_eq!(SubcheckId::from("a").to_string(), "a");
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&ProblemId::new("moment")).unwrap();
        assert_eq!(json, "\"moment\"");
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Process-unique identity of a drawable.
///
/// Ids are handed out by [`crate::kernel::IdentityRegistry`] from a monotonic
/// counter starting at 1 and are never reused, even after the drawable is
/// destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawableId(u64);

impl DrawableId {
    pub const fn raw(v: u64) -> Self {
        Self(v)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DrawableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<DrawableId> for serde_json::Value {
    fn from(id: DrawableId) -> Self {
        serde_json::Value::from(id.0)
    }
}

impl DrawableId {
    /// Reads an id back out of an event payload value.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        value.as_u64().filter(|v| *v > 0).map(Self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/id.rs"]
mod tests;

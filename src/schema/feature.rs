use compact_str::CompactString;
use rustc_hash::FxHashSet;

use super::style::StyleDescriptor;
use crate::core::{DrawError, Result};

/// Feature tags every build knows about, even when no style references them.
pub const BUILTIN_FEATURES: &[&str] = &["html", "scarpe"];

/// Capability tags the running app asked for and the bridge can honor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureSet {
    enabled: FxHashSet<CompactString>,
}

impl FeatureSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with<'a>(tags: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            enabled: tags.into_iter().map(CompactString::new).collect(),
        }
    }

    /// Builds the app's feature set from the requested tags.
    ///
    /// Unknown tags are logged and dropped; known tags the bridge cannot
    /// provide fail with `UnsupportedFeature`.
    pub fn from_request<S: AsRef<str>>(
        requested: &[S],
        known: &FxHashSet<CompactString>,
        supported: &[&str],
    ) -> Result<Self> {
        let mut enabled = FxHashSet::default();
        for tag in requested {
            let tag = tag.as_ref();
            if !known.contains(tag) && !BUILTIN_FEATURES.contains(&tag) {
                tracing::warn!(feature = %tag, "ignoring unknown feature");
                continue;
            }
            if !supported.contains(&tag) {
                return Err(DrawError::UnsupportedFeature {
                    feature: tag.to_string(),
                    context: "not supported by the display bridge".to_string(),
                });
            }
            enabled.insert(CompactString::new(tag));
        }
        Ok(Self { enabled })
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.enabled.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(|t| t.as_str())
    }
}

/// Which feature-gated styles a name resolution should include.
#[derive(Clone, Copy, Debug)]
pub enum FeatureFilter<'a> {
    /// Every declared style regardless of gating; diagnostics only.
    All,
    Only(&'a FeatureSet),
}

impl FeatureFilter<'_> {
    pub fn admits(&self, descriptor: &StyleDescriptor) -> bool {
        match self {
            FeatureFilter::All => true,
            FeatureFilter::Only(features) => descriptor.available_with(features),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/feature.rs"]
mod tests;

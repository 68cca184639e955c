//! Style descriptors and schema resolution across the class hierarchy.

use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;

use super::feature::{FeatureFilter, FeatureSet};
use super::{ClassId, ClassRegistry};
use crate::core::{DrawError, Result, Value};

/// Maps a raw input value to its canonical form, or rejects it.
pub type Validator = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

#[derive(Clone)]
pub struct StyleDescriptor {
    name: CompactString,
    validator: Option<Validator>,
    feature: Option<CompactString>,
}

impl StyleDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            name: CompactString::new(name),
            validator: None,
            feature: None,
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_feature(mut self, feature: &str) -> Self {
        self.feature = Some(CompactString::new(feature));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn feature(&self) -> Option<&str> {
        self.feature.as_deref()
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Runs the validator, or passes the value through unchanged.
    pub fn apply(&self, value: &Value) -> Result<Value> {
        match &self.validator {
            Some(validate) => validate(value),
            None => Ok(value.clone()),
        }
    }

    pub fn available_with(&self, features: &FeatureSet) -> bool {
        self.feature.as_deref().map_or(true, |f| features.contains(f))
    }
}

impl fmt::Debug for StyleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleDescriptor")
            .field("name", &self.name)
            .field("validator", &self.validator.is_some())
            .field("feature", &self.feature)
            .finish()
    }
}

impl ClassRegistry {
    /// Declares a style on `class`. Returns `false` (and changes nothing) if the
    /// name is already visible on the class, either declared by the class itself
    /// or by one of its ancestors.
    pub fn declare_style(&mut self, class: ClassId, descriptor: StyleDescriptor) -> bool {
        if self.style_descriptor(class, descriptor.name()).is_some() {
            tracing::debug!(
                class = %self.get(class).name(),
                style = %descriptor.name(),
                "style already declared, keeping first declaration"
            );
            return false;
        }
        if let Some(feature) = descriptor.feature() {
            self.known_features.insert(CompactString::new(feature));
        }
        self.class_mut(class).styles.push(descriptor);
        true
    }

    /// Nearest descriptor for `name`, walking from `class` up to the root class.
    pub fn style_descriptor(&self, class: ClassId, name: &str) -> Option<&StyleDescriptor> {
        self.ancestors(class)
            .find_map(|c| self.get(c).styles.iter().find(|d| d.name() == name))
    }

    /// Ordered union of style names across the ancestor chain, ancestors first.
    pub fn resolve_names(&self, class: ClassId, filter: FeatureFilter<'_>) -> Vec<CompactString> {
        let mut chain: Vec<ClassId> = self.ancestors(class).collect();
        chain.reverse();

        let mut names: Vec<CompactString> = Vec::new();
        for c in chain {
            for descriptor in &self.get(c).styles {
                if !filter.admits(descriptor) {
                    continue;
                }
                if !names.iter().any(|n| n == descriptor.name()) {
                    names.push(descriptor.name.clone());
                }
            }
        }
        names
    }

    pub fn validate_style(&self, class: ClassId, name: &str, value: &Value) -> Result<Value> {
        self.check_class(class)?;
        let descriptor = self
            .style_descriptor(class, name)
            .ok_or_else(|| DrawError::NoSuchStyle {
                class: self.get(class).name().to_string(),
                style: name.to_string(),
            })?;
        descriptor.apply(value)
    }

    /// Like [`Self::validate_style`], but also rejects feature-gated styles the
    /// app did not request.
    pub fn validate_style_with(
        &self,
        class: ClassId,
        name: &str,
        value: &Value,
        features: &FeatureSet,
    ) -> Result<Value> {
        self.check_style_feature(class, name, features)?;
        self.validate_style(class, name, value)
    }

    pub fn check_style_feature(
        &self,
        class: ClassId,
        name: &str,
        features: &FeatureSet,
    ) -> Result<()> {
        match self.style_descriptor(class, name) {
            Some(descriptor) if !descriptor.available_with(features) => {
                Err(DrawError::UnsupportedFeature {
                    feature: descriptor.feature().unwrap_or_default().to_string(),
                    context: format!("style `{}` on {}", name, self.get(class).name()),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn is_style(&self, class: ClassId, name: &str) -> bool {
        self.style_descriptor(class, name).is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/style.rs"]
mod tests;

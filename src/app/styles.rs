//! Uniform style accessors routed through the class schema.

use super::App;
use crate::core::value::single;
use crate::core::{DrawError, DrawableId, Result, StyleMap, Value};
use crate::event::names;
use crate::schema::FeatureFilter;

const HIDDEN: &str = "hidden";

impl App {
    /// Current value of a declared style; `None` if it was never given one.
    pub fn style(&self, id: impl Into<DrawableId>, name: &str) -> Result<Option<Value>> {
        let drawable = self.registry.lookup(id.into())?;
        if !self.classes.is_style(drawable.class(), name) {
            return Err(DrawError::NoSuchStyle {
                class: self.classes.get(drawable.class()).name().to_string(),
                style: name.to_string(),
            });
        }
        Ok(drawable.style(name).cloned())
    }

    pub fn styles(&self, id: impl Into<DrawableId>) -> Result<StyleMap> {
        Ok(self.registry.lookup(id.into())?.styles().clone())
    }

    /// Style names usable on this drawable under the app's features.
    pub fn style_names(&self, id: impl Into<DrawableId>) -> Result<Vec<String>> {
        let class = self.registry.lookup(id.into())?.class();
        Ok(self
            .classes
            .resolve_names(class, FeatureFilter::Only(&self.features))
            .into_iter()
            .map(|n| n.to_string())
            .collect())
    }

    /// Validates and stores one style, then dispatches `prop_change`. Returns
    /// the canonical value.
    pub fn set_style(
        &mut self,
        id: impl Into<DrawableId>,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<Value> {
        let id = id.into();
        let value = value.into();
        let changed = self.set_styles(id, single(name, value))?;
        Ok(changed.get(name).cloned().unwrap_or(Value::Null))
    }

    /// Validates every entry first, so either all of them are stored or none
    /// is; one `prop_change` carries the whole batch.
    pub fn set_styles(&mut self, id: impl Into<DrawableId>, styles: StyleMap) -> Result<StyleMap> {
        let id = id.into();
        let drawable = self.registry.lookup(id)?;
        if drawable.is_destroyed() {
            return Err(DrawError::NotFound(id));
        }
        let class = drawable.class();

        let mut changed = StyleMap::new();
        for (name, raw) in &styles {
            let value = self
                .classes
                .validate_style_with(class, name, raw, &self.features)?;
            changed.insert(name.clone(), value);
        }
        if changed.is_empty() {
            return Ok(changed);
        }

        let drawable = self.registry.lookup_mut(id)?;
        for (name, value) in &changed {
            drawable.styles.insert(name.clone(), value.clone());
        }
        self.send_event(
            class,
            names::PROP_CHANGE,
            Some(id),
            vec![Value::Object(changed.clone())],
        )?;
        Ok(changed)
    }

    pub fn hide(&mut self, id: impl Into<DrawableId>) -> Result<()> {
        self.set_style(id, HIDDEN, true).map(|_| ())
    }

    pub fn show(&mut self, id: impl Into<DrawableId>) -> Result<()> {
        self.set_style(id, HIDDEN, false).map(|_| ())
    }

    /// Flips `hidden`; returns the new value.
    pub fn toggle(&mut self, id: impl Into<DrawableId>) -> Result<bool> {
        let id = id.into();
        let hidden = self
            .style(id, HIDDEN)?
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        self.set_style(id, HIDDEN, !hidden)?;
        Ok(!hidden)
    }

    pub fn is_hidden(&self, id: impl Into<DrawableId>) -> Result<bool> {
        Ok(self
            .style(id, HIDDEN)?
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }

    /// App-wide default for a style of `class_name` and its subclasses;
    /// applies to drawables created afterwards.
    pub fn set_default_style(
        &mut self,
        class_name: &str,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        let class = self.classes.by_name(class_name)?;
        let value = self
            .classes
            .validate_style_with(class, name, &value.into(), &self.features)?;
        self.classes.set_default(class, name, value)
    }
}

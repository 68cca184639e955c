//! Identity allocation and the id -> drawable map.

use rustc_hash::FxHashMap;

use super::drawable::Drawable;
use crate::core::{DrawError, DrawableId, Result};

#[derive(Debug, Default)]
pub struct IdentityRegistry {
    last: u64,
    live: FxHashMap<DrawableId, Drawable>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh id, strictly greater than every id handed out before.
    pub fn allocate(&mut self) -> DrawableId {
        self.last += 1;
        DrawableId::raw(self.last)
    }

    pub fn register(&mut self, drawable: Drawable) -> Result<()> {
        let id = drawable.id();
        if id.get() == 0 || id.get() > self.last {
            return Err(DrawError::invalid_value(format!(
                "{} was not allocated by this registry",
                id
            )));
        }
        if self.live.contains_key(&id) {
            return Err(DrawError::invalid_value(format!("{} is already registered", id)));
        }
        self.live.insert(id, drawable);
        Ok(())
    }

    pub fn unregister(&mut self, id: DrawableId) -> Option<Drawable> {
        self.live.remove(&id)
    }

    pub fn lookup(&self, id: DrawableId) -> Result<&Drawable> {
        self.live.get(&id).ok_or(DrawError::NotFound(id))
    }

    /// Missing ids are fine here.
    pub fn try_lookup(&self, id: DrawableId) -> Option<&Drawable> {
        self.live.get(&id)
    }

    pub fn lookup_mut(&mut self, id: DrawableId) -> Result<&mut Drawable> {
        self.live.get_mut(&id).ok_or(DrawError::NotFound(id))
    }

    pub fn contains(&self, id: DrawableId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Registered ids in allocation order.
    pub fn ids(&self) -> Vec<DrawableId> {
        let mut ids: Vec<DrawableId> = self.live.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn last_allocated(&self) -> Option<DrawableId> {
        (self.last > 0).then(|| DrawableId::raw(self.last))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/registry.rs"]
mod tests;

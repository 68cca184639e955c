//! Parent/child structure over the registry.
//!
//! Only links are touched here; events and schema checks live in the app
//! controller.

use std::collections::VecDeque;

use super::registry::IdentityRegistry;
use crate::core::{DrawError, DrawableId, Result};

/// Moves `child` under `new_parent` (or detaches it when `None`) and returns
/// the previous parent.
pub fn reparent(
    registry: &mut IdentityRegistry,
    child: DrawableId,
    new_parent: Option<DrawableId>,
) -> Result<Option<DrawableId>> {
    if registry.lookup(child)?.is_destroyed() {
        return Err(DrawError::NotFound(child));
    }
    if let Some(parent) = new_parent {
        let node = registry.lookup(parent)?;
        if node.is_destroyed() {
            return Err(DrawError::NotFound(parent));
        }
        if parent == child || is_ancestor(registry, child, parent) {
            return Err(DrawError::InvalidParent {
                child,
                parent,
                reason: "target is inside the drawable's own subtree",
            });
        }
    }

    let old = detach(registry, child)?;
    if let Some(parent) = new_parent {
        registry.lookup_mut(parent)?.children.push(child);
        registry.lookup_mut(child)?.parent = Some(parent);
    }
    Ok(old)
}

/// Removes `child` from its parent's children; returns the old parent.
pub fn detach(registry: &mut IdentityRegistry, child: DrawableId) -> Result<Option<DrawableId>> {
    let old = registry.lookup_mut(child)?.parent.take();
    if let Some(old) = old {
        // The old parent may already be gone during a cascading destroy.
        if let Ok(node) = registry.lookup_mut(old) {
            node.children.retain(|c| *c != child);
        }
    }
    Ok(old)
}

/// Whether `ancestor` appears on the parent chain of `node`.
pub fn is_ancestor(registry: &IdentityRegistry, ancestor: DrawableId, node: DrawableId) -> bool {
    let mut current = registry.try_lookup(node).and_then(|d| d.parent());
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = registry.try_lookup(id).and_then(|d| d.parent());
    }
    false
}

/// Breadth-first walk from `root`, `root` included. Destroyed drawables and
/// everything under them are skipped.
pub fn breadth_first(registry: &IdentityRegistry, root: DrawableId) -> Vec<DrawableId> {
    let mut out = Vec::new();
    let mut queue = VecDeque::from([root]);
    while let Some(id) = queue.pop_front() {
        let Some(node) = registry.try_lookup(id) else {
            continue;
        };
        if node.is_destroyed() {
            continue;
        }
        out.push(id);
        queue.extend(node.children().iter().copied());
    }
    out
}

/// Checks the parent/child links of every registered drawable agree.
pub fn is_consistent(registry: &IdentityRegistry) -> bool {
    registry.ids().into_iter().all(|id| {
        let Some(node) = registry.try_lookup(id) else {
            return false;
        };
        let parent_ok = match node.parent() {
            Some(p) => registry
                .try_lookup(p)
                .map_or(false, |parent| parent.children().contains(&id)),
            None => true,
        };
        let children_ok = node.children().iter().all(|c| {
            registry
                .try_lookup(*c)
                .map_or(false, |child| child.parent() == Some(id))
        });
        parent_ok && children_ok
    })
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/tree.rs"]
mod tests;

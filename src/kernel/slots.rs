use crate::core::DrawableId;

/// Attachment context for newly constructed drawables. The bottom entry (the
/// document root) is never popped.
#[derive(Debug, Clone)]
pub struct SlotStack {
    stack: Vec<DrawableId>,
}

impl SlotStack {
    pub fn new(root: DrawableId) -> Self {
        Self { stack: vec![root] }
    }

    pub fn push(&mut self, slot: DrawableId) {
        self.stack.push(slot);
    }

    /// Pops the top slot; no-op (returning `None`) once only the root is left.
    pub fn pop(&mut self) -> Option<DrawableId> {
        if self.stack.len() <= 1 {
            return None;
        }
        self.stack.pop()
    }

    pub fn current(&self) -> DrawableId {
        // Never empty: `new` seeds the root and `pop` keeps it.
        self.stack[self.stack.len() - 1]
    }

    pub fn root(&self) -> DrawableId {
        self.stack[0]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Drops entries above `depth`; the root always stays.
    pub fn truncate(&mut self, depth: usize) {
        self.stack.truncate(depth.max(1));
    }

    /// Removes a destroyed slot wherever it sits; the root is kept.
    pub fn forget(&mut self, slot: DrawableId) {
        let root = self.stack[0];
        if slot != root {
            self.stack.retain(|s| *s != slot);
        }
    }

    pub fn contains(&self, slot: DrawableId) -> bool {
        self.stack.contains(&slot)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/slots.rs"]
mod tests;

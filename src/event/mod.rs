//! Addressed, synchronous event bus.
//!
//! Subscriptions bind a handler to an event name and optionally a target id.
//! Dispatch runs every live matching handler in subscription order before
//! returning; handlers may dispatch further events, re-entrantly.

pub mod emitter;
pub mod names;

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::core::{DrawableId, Result, Value};
use crate::schema::{ClassId, ClassRegistry};

pub use emitter::{AppHandle, DrawableHandle, EventEmitter};

new_key_type! {
    /// Opaque handle returned by subscribe; stale handles never alias new ones.
    pub struct SubscriptionId;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub name: CompactString,
    pub target: Option<DrawableId>,
    pub args: Vec<Value>,
}

impl Event {
    pub fn new(name: &str, target: Option<DrawableId>, args: Vec<Value>) -> Self {
        Self {
            name: CompactString::new(name),
            target,
            args,
        }
    }

    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }
}

/// Handlers are shared, not exclusive: a handler may be re-entered by a
/// dispatch it triggered itself, so mutable state lives in `Cell`/`RefCell`.
pub type Handler<C> = Rc<dyn Fn(&mut C, &Event) -> Result<()>>;

struct Subscription<C> {
    event: CompactString,
    target: Option<DrawableId>,
    owner: Option<DrawableId>,
    handler: Handler<C>,
}

/// What the bus needs from its dispatch context.
pub trait DispatchContext: Sized {
    fn bus(&self) -> &EventBus<Self>;
    fn classes(&self) -> &ClassRegistry;
}

pub struct EventBus<C> {
    subscriptions: SlotMap<SubscriptionId, Subscription<C>>,
    by_event: FxHashMap<CompactString, Vec<SubscriptionId>>,
    by_owner: FxHashMap<DrawableId, Vec<SubscriptionId>>,
    by_target: FxHashMap<DrawableId, Vec<SubscriptionId>>,
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        Self {
            subscriptions: SlotMap::with_key(),
            by_event: FxHashMap::default(),
            by_owner: FxHashMap::default(),
            by_target: FxHashMap::default(),
        }
    }

    /// Subscribes `handler` to `event` as seen by `class`.
    ///
    /// `target` restricts the subscription to events addressed at that id;
    /// `owner` ties it to a drawable so [`Self::cancel_all`] removes it when the
    /// drawable is destroyed.
    pub fn subscribe<F>(
        &mut self,
        classes: &ClassRegistry,
        class: ClassId,
        event: &str,
        target: Option<DrawableId>,
        owner: Option<DrawableId>,
        handler: F,
    ) -> Result<SubscriptionId>
    where
        F: Fn(&mut C, &Event) -> Result<()> + 'static,
    {
        classes.check_event(class, event)?;

        let event = CompactString::new(event);
        let handler: Handler<C> = Rc::new(handler);
        let id = self.subscriptions.insert(Subscription {
            event: event.clone(),
            target,
            owner,
            handler,
        });
        self.by_event.entry(event).or_default().push(id);
        if let Some(owner) = owner {
            self.by_owner.entry(owner).or_default().push(id);
        }
        if let Some(target) = target {
            self.by_target.entry(target).or_default().push(id);
        }
        Ok(id)
    }

    /// Returns `false` if the subscription was already gone.
    pub fn cancel(&mut self, id: SubscriptionId) -> bool {
        let Some(sub) = self.subscriptions.remove(id) else {
            return false;
        };
        unindex(&mut self.by_event, &sub.event, id);
        if let Some(owner) = sub.owner {
            unindex(&mut self.by_owner, &owner, id);
        }
        if let Some(target) = sub.target {
            unindex(&mut self.by_target, &target, id);
        }
        true
    }

    /// Cancels every subscription owned by `owner`; returns how many were live.
    pub fn cancel_all(&mut self, owner: DrawableId) -> usize {
        let ids = self.by_owner.get(&owner).cloned().unwrap_or_default();
        ids.into_iter().filter(|id| self.cancel(*id)).count()
    }

    /// Cancels every subscription addressed at `target`, whoever owns it.
    pub fn cancel_targeting(&mut self, target: DrawableId) -> usize {
        let ids = self.by_target.get(&target).cloned().unwrap_or_default();
        ids.into_iter().filter(|id| self.cancel(*id)).count()
    }

    pub fn is_live(&self, id: SubscriptionId) -> bool {
        self.subscriptions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn owned_by(&self, owner: DrawableId) -> usize {
        self.by_owner.get(&owner).map_or(0, Vec::len)
    }

    pub fn targeting(&self, target: DrawableId) -> usize {
        self.by_target.get(&target).map_or(0, Vec::len)
    }

    /// Snapshot of handlers that would fire for `event` addressed at `target`,
    /// in subscription order.
    fn matching(&self, event: &str, target: Option<DrawableId>) -> Vec<(SubscriptionId, Handler<C>)> {
        let Some(ids) = self.by_event.get(event) else {
            return Vec::new();
        };
        ids.iter()
            .filter_map(|id| {
                let sub = self.subscriptions.get(*id)?;
                let hit = match sub.target {
                    None => true,
                    Some(wanted) => target == Some(wanted),
                };
                hit.then(|| (*id, Rc::clone(&sub.handler)))
            })
            .collect()
    }
}

fn unindex<K: Hash + Eq>(
    index: &mut FxHashMap<K, Vec<SubscriptionId>>,
    key: &K,
    id: SubscriptionId,
) {
    if let Some(ids) = index.get_mut(key) {
        ids.retain(|s| *s != id);
        if ids.is_empty() {
            index.remove(key);
        }
    }
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.len())
            .field("events", &self.by_event.len())
            .finish()
    }
}

/// Dispatches `event` with the vocabulary of `class`; returns how many
/// handlers ran.
///
/// Handlers cancelled by an earlier handler in the same dispatch are skipped.
/// Handlers may dispatch further events, including ones that reach
/// themselves again.
pub fn dispatch<C: DispatchContext>(ctx: &mut C, class: ClassId, event: Event) -> Result<usize> {
    ctx.classes().check_event(class, &event.name)?;

    let matched = ctx.bus().matching(&event.name, event.target);
    let mut fired = 0;
    for (id, handler) in matched {
        if !ctx.bus().is_live(id) {
            continue;
        }
        handler(ctx, &event)?;
        fired += 1;
    }
    Ok(fired)
}

#[cfg(test)]
#[path = "../../tests/unit/event/bus.rs"]
mod tests;

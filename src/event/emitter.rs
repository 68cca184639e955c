//! Shared event capability of the App and of drawables.

use super::{names, Event, SubscriptionId};
use crate::app::App;
use crate::core::{DrawableId, Result, Value};
use crate::schema::ClassId;

/// Something that owns an identity and a class, and can therefore bind and
/// emit events addressed at itself.
pub trait EventEmitter {
    /// Fails with `NoLinkableId` before the emitter has been registered.
    fn linkable_id(&self) -> Result<DrawableId>;

    fn emitter_class(&self) -> ClassId;

    /// Handler for `event` addressed at this emitter. The subscription is
    /// cancelled when the emitter is destroyed.
    fn bind<F>(&self, app: &mut App, event: &str, handler: F) -> Result<SubscriptionId>
    where
        F: Fn(&mut App, &Event) -> Result<()> + 'static,
    {
        let id = self.linkable_id()?;
        app.subscribe_owned(self.emitter_class(), event, Some(id), Some(id), handler)
    }

    /// Handler for `event` whatever its target, owned by this emitter.
    fn bind_any<F>(&self, app: &mut App, event: &str, handler: F) -> Result<SubscriptionId>
    where
        F: Fn(&mut App, &Event) -> Result<()> + 'static,
    {
        let id = self.linkable_id()?;
        app.subscribe_owned(self.emitter_class(), event, None, Some(id), handler)
    }

    fn emit(&self, app: &mut App, event: &str, args: Vec<Value>) -> Result<usize> {
        let id = self.linkable_id()?;
        app.send_event(self.emitter_class(), event, Some(id), args)
    }

    fn unbind_all(&self, app: &mut App) -> Result<usize> {
        let id = self.linkable_id()?;
        Ok(app.cancel_all(id))
    }

    fn click<F>(&self, app: &mut App, handler: F) -> Result<SubscriptionId>
    where
        F: Fn(&mut App, &Event) -> Result<()> + 'static,
    {
        self.bind(app, names::CLICK, handler)
    }

    fn hover<F>(&self, app: &mut App, handler: F) -> Result<SubscriptionId>
    where
        F: Fn(&mut App, &Event) -> Result<()> + 'static,
    {
        self.bind(app, names::HOVER, handler)
    }

    fn leave<F>(&self, app: &mut App, handler: F) -> Result<SubscriptionId>
    where
        F: Fn(&mut App, &Event) -> Result<()> + 'static,
    {
        self.bind(app, names::LEAVE, handler)
    }

    fn motion<F>(&self, app: &mut App, handler: F) -> Result<SubscriptionId>
    where
        F: Fn(&mut App, &Event) -> Result<()> + 'static,
    {
        self.bind(app, names::MOTION, handler)
    }

    fn release<F>(&self, app: &mut App, handler: F) -> Result<SubscriptionId>
    where
        F: Fn(&mut App, &Event) -> Result<()> + 'static,
    {
        self.bind(app, names::RELEASE, handler)
    }
}

/// Typed handle to a registered drawable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrawableHandle {
    id: DrawableId,
    class: ClassId,
}

impl DrawableHandle {
    pub(crate) fn new(id: DrawableId, class: ClassId) -> Self {
        Self { id, class }
    }

    pub fn id(&self) -> DrawableId {
        self.id
    }

    pub fn class(&self) -> ClassId {
        self.class
    }
}

impl From<DrawableHandle> for DrawableId {
    fn from(handle: DrawableHandle) -> Self {
        handle.id
    }
}

impl From<&DrawableHandle> for DrawableId {
    fn from(handle: &DrawableHandle) -> Self {
        handle.id
    }
}

impl EventEmitter for DrawableHandle {
    fn linkable_id(&self) -> Result<DrawableId> {
        Ok(self.id)
    }

    fn emitter_class(&self) -> ClassId {
        self.class
    }
}

/// The App controller's own identity on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AppHandle {
    id: DrawableId,
    class: ClassId,
}

impl AppHandle {
    pub(crate) fn new(id: DrawableId, class: ClassId) -> Self {
        Self { id, class }
    }

    pub fn id(&self) -> DrawableId {
        self.id
    }

    pub fn class(&self) -> ClassId {
        self.class
    }
}

impl From<AppHandle> for DrawableId {
    fn from(handle: AppHandle) -> Self {
        handle.id
    }
}

impl EventEmitter for AppHandle {
    fn linkable_id(&self) -> Result<DrawableId> {
        Ok(self.id)
    }

    fn emitter_class(&self) -> ClassId {
        self.class
    }
}

#[cfg(test)]
#[path = "../../tests/unit/event/emitter.rs"]
mod tests;

//! App controller: owns the class registry, identity registry, event bus, slot
//! stack and display bridge, and drives the app lifecycle.
//!
//! Exactly one `App` may exist per process at a time.

pub mod config;
mod construct;
mod lifecycle;
mod styles;

use std::sync::atomic::{AtomicBool, Ordering};

use crate::bridge::{bridge_channel, BridgeLink, BridgeReceiver, BridgeSender, DisplayBridge};
use crate::core::{DrawError, DrawableId, Result, StyleMap, Value};
use crate::event::{
    self, names, AppHandle, DispatchContext, DrawableHandle, Event, EventBus, SubscriptionId,
};
use crate::kernel::{tree, Drawable, IdentityRegistry, SlotStack};
use crate::schema::{builtin, ClassId, ClassRegistry, FeatureSet, Reconciled};

pub use config::{load_app_config, AppConfig, LogConfig};
pub use construct::DrawableBuilder;
pub use lifecycle::RunMode;

static INSTANCE_CLAIMED: AtomicBool = AtomicBool::new(false);

/// Holds the process-wide App slot; releasing happens on drop.
#[derive(Debug)]
struct InstanceGuard(());

impl InstanceGuard {
    fn claim() -> Result<Self> {
        INSTANCE_CLAIMED
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InstanceGuard(()))
            .map_err(|_| DrawError::TooManyInstances)
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        INSTANCE_CLAIMED.store(false, Ordering::Release);
    }
}

pub struct App {
    config: AppConfig,
    classes: ClassRegistry,
    features: FeatureSet,
    registry: IdentityRegistry,
    bus: EventBus<App>,
    slots: SlotStack,
    bridge: Box<dyn DisplayBridge>,
    sender: BridgeSender,
    inbox: BridgeReceiver,
    app: AppHandle,
    root: DrawableHandle,
    run_mode: Option<String>,
    do_shutdown: bool,
    _instance: InstanceGuard,
}

impl App {
    pub fn new(config: AppConfig, bridge: Box<dyn DisplayBridge>) -> Result<Self> {
        Self::with_classes(config, ClassRegistry::with_builtins()?, bridge)
    }

    /// Builds the app around a registry the caller already extended with its
    /// own drawable classes. The registry must contain the built-ins.
    pub fn with_classes(
        config: AppConfig,
        classes: ClassRegistry,
        bridge: Box<dyn DisplayBridge>,
    ) -> Result<Self> {
        let instance = InstanceGuard::claim()?;

        let app_class = classes.by_name(builtin::APP)?;
        let root_class = classes.by_name(builtin::DOCUMENT_ROOT)?;
        let features = FeatureSet::from_request(
            &config.features,
            classes.known_features(),
            bridge.supported_features(),
        )?;

        let mut registry = IdentityRegistry::new();
        let app_id = registry.allocate();
        let root_id = registry.allocate();
        let (sender, inbox) = bridge_channel();

        let mut app = App {
            config,
            classes,
            features,
            registry,
            bus: EventBus::new(),
            slots: SlotStack::new(root_id),
            bridge,
            sender,
            inbox,
            app: AppHandle::new(app_id, app_class),
            root: DrawableHandle::new(root_id, root_class),
            run_mode: None,
            do_shutdown: false,
            _instance: instance,
        };

        app.bus.subscribe(
            &app.classes,
            app_class,
            names::CUSTOM_EVENT_LOOP,
            None,
            Some(app_id),
            |app: &mut App, event: &Event| {
                let mode = event
                    .arg(0)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                tracing::debug!(%mode, "display bridge chose run-loop mode");
                app.run_mode = Some(mode);
                Ok(())
            },
        )?;

        let link = BridgeLink::new(&mut app.bus, &app.classes, app.sender.clone());
        app.bridge.connect(link)?;

        let mut app_styles = StyleMap::new();
        app_styles.insert("title".into(), Value::from(app.config.title.clone()));
        app_styles.insert("resizable".into(), Value::from(app.config.resizable));
        app_styles.insert("width".into(), Value::from(app.config.width));
        app_styles.insert("height".into(), Value::from(app.config.height));
        let app_init = construct::reconcile_for(&app, app_class, &[], &app_styles)?;
        app.materialize(app_class, app_id, app_init, None)?;

        let root_init = construct::reconcile_for(&app, root_class, &[], &StyleMap::new())?;
        app.materialize(root_class, root_id, root_init, None)?;

        tracing::info!(
            title = %app.config.title,
            features = ?app.features.iter().collect::<Vec<_>>(),
            "app created"
        );
        Ok(app)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    /// Registers an extra drawable class after startup.
    pub fn register_class(&mut self, spec: crate::schema::ClassSpec) -> Result<ClassId> {
        self.classes.register(spec)
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    pub fn app_handle(&self) -> AppHandle {
        self.app
    }

    pub fn root(&self) -> DrawableHandle {
        self.root
    }

    /// Handle for a registered id.
    pub fn handle(&self, id: DrawableId) -> Result<DrawableHandle> {
        let drawable = self.registry.lookup(id)?;
        Ok(DrawableHandle::new(id, drawable.class()))
    }

    pub fn drawable(&self, id: impl Into<DrawableId>) -> Result<&Drawable> {
        self.registry.lookup(id.into())
    }

    pub fn class_name(&self, id: impl Into<DrawableId>) -> Result<&str> {
        let class = self.registry.lookup(id.into())?.class();
        Ok(self.classes.get(class).name())
    }

    pub fn sender(&self) -> BridgeSender {
        self.sender.clone()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.do_shutdown
    }

    // ---- events ----------------------------------------------------------

    pub fn subscribe<F>(
        &mut self,
        class: ClassId,
        event: &str,
        target: Option<DrawableId>,
        handler: F,
    ) -> Result<SubscriptionId>
    where
        F: Fn(&mut App, &Event) -> Result<()> + 'static,
    {
        self.bus
            .subscribe(&self.classes, class, event, target, None, handler)
    }

    pub fn subscribe_owned<F>(
        &mut self,
        class: ClassId,
        event: &str,
        target: Option<DrawableId>,
        owner: Option<DrawableId>,
        handler: F,
    ) -> Result<SubscriptionId>
    where
        F: Fn(&mut App, &Event) -> Result<()> + 'static,
    {
        self.bus
            .subscribe(&self.classes, class, event, target, owner, handler)
    }

    pub fn cancel(&mut self, subscription: SubscriptionId) -> bool {
        self.bus.cancel(subscription)
    }

    pub fn cancel_all(&mut self, owner: DrawableId) -> usize {
        self.bus.cancel_all(owner)
    }

    pub fn bus(&self) -> &EventBus<App> {
        &self.bus
    }

    /// Dispatches with the vocabulary of `class`; returns how many handlers ran.
    pub fn send_event(
        &mut self,
        class: ClassId,
        event: &str,
        target: Option<DrawableId>,
        args: Vec<Value>,
    ) -> Result<usize> {
        event::dispatch(self, class, Event::new(event, target, args))
    }

    /// Entry point for backend-originated events. The target's class decides
    /// the vocabulary; untargeted events (and events for ids that are already
    /// gone) use the App's.
    pub fn dispatch_bridge_event(
        &mut self,
        event: &str,
        target: Option<DrawableId>,
        args: Vec<Value>,
    ) -> Result<usize> {
        let class = target
            .and_then(|id| self.registry.try_lookup(id))
            .map_or(self.app.class(), |d| d.class());
        self.send_event(class, event, target, args)
    }

    // ---- tree ------------------------------------------------------------

    /// Moves `child` under `new_parent`, or detaches it when `None`, then
    /// dispatches `parent` addressed at the child.
    pub fn set_parent(
        &mut self,
        child: impl Into<DrawableId>,
        new_parent: Option<DrawableId>,
    ) -> Result<()> {
        let child = child.into();
        let class = self.registry.lookup(child)?.class();
        if let Some(parent) = new_parent {
            let parent_class = self.registry.lookup(parent)?.class();
            if !self.classes.get(parent_class).is_slot() {
                return Err(DrawError::InvalidParent {
                    child,
                    parent,
                    reason: "target is not a slot",
                });
            }
        }
        tree::reparent(&mut self.registry, child, new_parent)?;
        let payload = new_parent.map_or(Value::Null, Value::from);
        self.send_event(class, names::PARENT, Some(child), vec![payload])?;
        Ok(())
    }

    pub fn parent(&self, id: impl Into<DrawableId>) -> Result<Option<DrawableHandle>> {
        match self.registry.lookup(id.into())?.parent() {
            Some(parent) => self.handle(parent).map(Some),
            None => Ok(None),
        }
    }

    pub fn contents(&self, slot: impl Into<DrawableId>) -> Result<Vec<DrawableHandle>> {
        self.registry
            .lookup(slot.into())?
            .children()
            .iter()
            .map(|id| self.handle(*id))
            .collect()
    }

    /// Detaches, cancels owned subscriptions, dispatches `destroy` and
    /// unregisters. Children go first. Later calls for the same id are no-ops.
    ///
    /// Subscriptions addressed at the id are dropped after the `destroy`
    /// dispatch, so targeted destroy handlers still run once.
    pub fn destroy(&mut self, id: impl Into<DrawableId>) -> Result<()> {
        let id = id.into();
        let Some(drawable) = self.registry.try_lookup(id) else {
            tracing::debug!(%id, "destroy: already gone");
            return Ok(());
        };
        if drawable.is_destroyed() {
            return Ok(());
        }
        let class = drawable.class();
        let children = drawable.children().to_vec();

        let mut first_err = None;
        for child in children {
            if let Err(err) = self.destroy(child) {
                first_err.get_or_insert(err);
            }
        }

        tree::detach(&mut self.registry, id)?;
        self.registry.lookup_mut(id)?.mark_destroyed();
        self.bus.cancel_all(id);
        let dispatched = self.send_event(class, names::DESTROY, Some(id), Vec::new());
        self.bus.cancel_targeting(id);
        self.registry.unregister(id);
        self.slots.forget(id);
        tracing::trace!(%id, "drawable destroyed");

        match (first_err, dispatched) {
            (Some(err), _) | (None, Err(err)) => Err(err),
            (None, Ok(_)) => Ok(()),
        }
    }

    pub fn remove(&mut self, id: impl Into<DrawableId>) -> Result<()> {
        self.destroy(id)
    }

    /// Destroys every child of `slot`, keeping the slot itself.
    pub fn clear(&mut self, slot: impl Into<DrawableId>) -> Result<()> {
        let children = self.registry.lookup(slot.into())?.children().to_vec();
        for child in children {
            self.destroy(child)?;
        }
        Ok(())
    }

    /// Every live drawable reachable from the document root, breadth-first.
    pub fn drawables(&self) -> Vec<DrawableHandle> {
        tree::breadth_first(&self.registry, self.root.id())
            .into_iter()
            .filter_map(|id| self.handle(id).ok())
            .collect()
    }

    /// Reachable drawables whose class is `class_name` or inherits from it.
    pub fn find_by_class(&self, class_name: &str) -> Result<Vec<DrawableHandle>> {
        let wanted = self.classes.by_name(class_name)?;
        Ok(self
            .drawables()
            .into_iter()
            .filter(|h| self.classes.is_a(h.class(), wanted))
            .collect())
    }

    // ---- slots -----------------------------------------------------------

    pub fn current_slot(&self) -> DrawableId {
        self.slots.current()
    }

    pub fn push_slot(&mut self, slot: impl Into<DrawableId>) -> Result<()> {
        let slot = slot.into();
        let class = self.registry.lookup(slot)?.class();
        if !self.classes.get(class).is_slot() {
            return Err(DrawError::invalid_value(format!(
                "{} ({}) is not a slot",
                slot,
                self.classes.get(class).name()
            )));
        }
        self.slots.push(slot);
        Ok(())
    }

    pub fn pop_slot(&mut self) -> Option<DrawableId> {
        self.slots.pop()
    }

    /// Runs `body` with `slot` as the attachment point, popping it again on
    /// every exit path.
    pub fn with_slot<T, F>(&mut self, slot: impl Into<DrawableId>, body: F) -> Result<T>
    where
        F: FnOnce(&mut App) -> Result<T>,
    {
        let base = self.slots.depth();
        self.push_slot(slot)?;
        let result = body(self);
        self.slots.truncate(base);
        result
    }

    pub fn append<T, F>(&mut self, slot: impl Into<DrawableId>, body: F) -> Result<T>
    where
        F: FnOnce(&mut App) -> Result<T>,
    {
        self.with_slot(slot, body)
    }

    // ---- internal --------------------------------------------------------

    /// Registers a reconciled drawable, announces it to the bridge and attaches
    /// it under `parent`.
    fn materialize(
        &mut self,
        class: ClassId,
        id: DrawableId,
        init: Reconciled,
        parent: Option<DrawableId>,
    ) -> Result<()> {
        let info = self.classes.get(class);
        let class_name = info.name().to_string();
        let is_widget = info.is_widget();

        self.registry
            .register(Drawable::new(id, class, init.styles, init.extras))?;
        let styles = self.registry.lookup(id)?.styles().clone();
        if let Err(err) = self
            .bridge
            .create_display_drawable_for(&class_name, id, &styles, is_widget)
        {
            self.registry.unregister(id);
            return Err(err);
        }
        if let Some(parent) = parent {
            if let Err(err) = self.set_parent(id, Some(parent)) {
                if let Err(cleanup) = self.destroy(id) {
                    tracing::warn!(%id, error = %cleanup, "rollback of failed attach");
                }
                return Err(err);
            }
        }
        self.registry.lookup_mut(id)?.activate();
        tracing::trace!(class = %class_name, %id, "drawable created");
        Ok(())
    }
}

impl DispatchContext for App {
    fn bus(&self) -> &EventBus<Self> {
        &self.bus
    }

    fn classes(&self) -> &ClassRegistry {
        &self.classes
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("title", &self.config.title)
            .field("drawables", &self.registry.len())
            .field("subscriptions", &self.bus.len())
            .field("slot_depth", &self.slots.depth())
            .field("run_mode", &self.run_mode)
            .field("do_shutdown", &self.do_shutdown)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/app.rs"]
mod tests;

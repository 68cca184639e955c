//! Drawable construction: factory lookup by DSL name, argument
//! reconciliation, registration and attachment under the current slot.

use super::App;
use crate::core::{DrawError, DrawableId, Result, StyleMap, Value};
use crate::event::{DrawableHandle, EventEmitter};
use crate::schema::{reconcile, ClassId, Reconciled};

pub(super) fn reconcile_for(
    app: &App,
    class: ClassId,
    args: &[Value],
    kwargs: &StyleMap,
) -> Result<Reconciled> {
    reconcile(
        &app.classes,
        class,
        &app.features,
        args,
        kwargs,
        app.config.strict_styles,
    )
}

impl App {
    /// Creates a drawable of the class registered under `dsl_name`.
    pub fn create(
        &mut self,
        dsl_name: &str,
        args: Vec<Value>,
        kwargs: StyleMap,
    ) -> Result<DrawableHandle> {
        let class = self.classes.by_dsl_name(dsl_name)?;
        self.create_class(class, args, kwargs)
    }

    pub fn create_class(
        &mut self,
        class: ClassId,
        args: Vec<Value>,
        kwargs: StyleMap,
    ) -> Result<DrawableHandle> {
        self.classes.check_class(class)?;
        let init = reconcile_for(self, class, &args, &kwargs)?;
        let parent = if self.classes.get(class).attaches() {
            let slot = self.slots.current();
            if !self.registry.contains(slot) {
                return Err(DrawError::NotFound(slot));
            }
            Some(slot)
        } else {
            None
        };

        let id = self.registry.allocate();
        self.materialize(class, id, init, parent)?;
        Ok(DrawableHandle::new(id, class))
    }

    pub fn build(&self, dsl_name: &str) -> Result<DrawableBuilder> {
        let class = self.classes.by_dsl_name(dsl_name)?;
        Ok(DrawableBuilder {
            class,
            class_name: self.classes.get(class).name().to_string(),
            args: Vec::new(),
            kwargs: StyleMap::new(),
        })
    }
}

/// A drawable still being described. It has no identity until
/// [`DrawableBuilder::create`], so binding events on it fails with
/// `NoLinkableId`.
#[derive(Debug, Clone)]
pub struct DrawableBuilder {
    class: ClassId,
    class_name: String,
    args: Vec<Value>,
    kwargs: StyleMap,
}

impl DrawableBuilder {
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn style(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.kwargs.insert(name.to_string(), value.into());
        self
    }

    pub fn styles(mut self, styles: StyleMap) -> Self {
        self.kwargs.extend(styles);
        self
    }

    pub fn create(self, app: &mut App) -> Result<DrawableHandle> {
        app.create_class(self.class, self.args, self.kwargs)
    }

    /// Creates the drawable and runs `body` with it as the current slot.
    pub fn create_with<F>(self, app: &mut App, body: F) -> Result<DrawableHandle>
    where
        F: FnOnce(&mut App) -> Result<()>,
    {
        let handle = self.create(app)?;
        app.with_slot(handle, body)?;
        Ok(handle)
    }
}

impl EventEmitter for DrawableBuilder {
    fn linkable_id(&self) -> Result<DrawableId> {
        Err(DrawError::NoLinkableId(self.class_name.clone()))
    }

    fn emitter_class(&self) -> ClassId {
        self.class
    }
}

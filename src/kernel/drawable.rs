use crate::core::{DrawableId, StyleMap, Value};
use crate::schema::ClassId;

/// `Constructing -> Active -> Destroyed`; `Destroyed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Constructing,
    Active,
    Destroyed,
}

/// Application-side record of one drawable.
#[derive(Clone, Debug)]
pub struct Drawable {
    id: DrawableId,
    class: ClassId,
    pub(crate) styles: StyleMap,
    extras: Vec<Value>,
    pub(crate) parent: Option<DrawableId>,
    pub(crate) children: Vec<DrawableId>,
    state: Lifecycle,
}

impl Drawable {
    pub fn new(id: DrawableId, class: ClassId, styles: StyleMap, extras: Vec<Value>) -> Self {
        Self {
            id,
            class,
            styles,
            extras,
            parent: None,
            children: Vec::new(),
            state: Lifecycle::Constructing,
        }
    }

    pub fn id(&self) -> DrawableId {
        self.id
    }

    pub fn class(&self) -> ClassId {
        self.class
    }

    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    pub fn style(&self, name: &str) -> Option<&Value> {
        self.styles.get(name)
    }

    /// Positional constructor arguments that were not styles.
    pub fn extras(&self) -> &[Value] {
        &self.extras
    }

    pub fn parent(&self) -> Option<DrawableId> {
        self.parent
    }

    pub fn children(&self) -> &[DrawableId] {
        &self.children
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == Lifecycle::Destroyed
    }

    pub(crate) fn activate(&mut self) {
        if self.state == Lifecycle::Constructing {
            self.state = Lifecycle::Active;
        }
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.state = Lifecycle::Destroyed;
    }
}

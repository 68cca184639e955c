//! Class registry: per-class style schema, event vocabulary and constructor
//! argument shape, with single inheritance.

pub mod builtin;
pub mod feature;
pub mod reconcile;
pub mod style;
pub mod validators;

use compact_str::CompactString;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::{DrawError, Result, StyleMap, Value};

pub use feature::{FeatureFilter, FeatureSet};
pub use reconcile::{reconcile, Reconciled};
pub use style::{StyleDescriptor, Validator};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One positional constructor argument: a style name, or `None` for a
/// position reserved for a non-style argument.
pub type ArgSlot = Option<CompactString>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgShape {
    /// Accept any positional arguments; none of them are assigned to styles.
    Any,
    Exact(Vec<ArgSlot>),
}

impl Default for ArgShape {
    fn default() -> Self {
        ArgShape::Exact(Vec::new())
    }
}

#[derive(Debug)]
pub struct ClassInfo {
    name: CompactString,
    dsl_name: CompactString,
    parent: Option<ClassId>,
    pub(crate) styles: Vec<StyleDescriptor>,
    defaults: StyleMap,
    own_events: Vec<CompactString>,
    events: Vec<CompactString>,
    required: ArgShape,
    optional: Vec<ArgSlot>,
    slot: bool,
    attaches: bool,
    widget: bool,
}

impl ClassInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dsl_name(&self) -> &str {
        &self.dsl_name
    }

    pub fn parent(&self) -> Option<ClassId> {
        self.parent
    }

    pub fn required_args(&self) -> &ArgShape {
        &self.required
    }

    pub fn optional_args(&self) -> &[ArgSlot] {
        &self.optional
    }

    /// Can hold children and act as an attachment point.
    pub fn is_slot(&self) -> bool {
        self.slot
    }

    /// New instances attach under the current slot.
    pub fn attaches(&self) -> bool {
        self.attaches
    }

    pub fn is_widget(&self) -> bool {
        self.widget
    }

    pub fn own_styles(&self) -> &[StyleDescriptor] {
        &self.styles
    }

    pub fn own_events(&self) -> &[CompactString] {
        &self.own_events
    }
}

/// Declarative description of a drawable class, consumed by
/// [`ClassRegistry::register`].
#[derive(Debug, Clone)]
pub struct ClassSpec {
    name: CompactString,
    dsl_name: Option<CompactString>,
    parent: Option<CompactString>,
    styles: Vec<StyleDescriptor>,
    defaults: StyleMap,
    events: Vec<CompactString>,
    required: ArgShape,
    optional: Vec<ArgSlot>,
    slot: Option<bool>,
    attaches: Option<bool>,
}

impl ClassSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: CompactString::new(name),
            dsl_name: None,
            parent: Some(CompactString::new(builtin::DRAWABLE)),
            styles: Vec::new(),
            defaults: StyleMap::new(),
            events: Vec::new(),
            required: ArgShape::default(),
            optional: Vec::new(),
            slot: None,
            attaches: None,
        }
    }

    /// A class with no parent. Only the hierarchy root should use this.
    pub fn root(name: &str) -> Self {
        Self {
            parent: None,
            ..Self::new(name)
        }
    }

    pub fn parent(mut self, parent: &str) -> Self {
        self.parent = Some(CompactString::new(parent));
        self
    }

    pub fn dsl_name(mut self, dsl_name: &str) -> Self {
        self.dsl_name = Some(CompactString::new(dsl_name));
        self
    }

    pub fn style(mut self, name: &str) -> Self {
        self.styles.push(StyleDescriptor::new(name));
        self
    }

    pub fn validated_style(mut self, name: &str, validator: Validator) -> Self {
        self.styles
            .push(StyleDescriptor::new(name).with_validator(validator));
        self
    }

    pub fn descriptor(mut self, descriptor: StyleDescriptor) -> Self {
        self.styles.push(descriptor);
        self
    }

    pub fn default_style(mut self, name: &str, value: Value) -> Self {
        self.defaults.insert(name.to_string(), value);
        self
    }

    pub fn event(mut self, name: &str) -> Self {
        self.events.push(CompactString::new(name));
        self
    }

    pub fn events(mut self, names: &[&str]) -> Self {
        self.events.extend(names.iter().map(|n| CompactString::new(n)));
        self
    }

    /// Required positional arguments; an empty string reserves a position for a
    /// non-style argument.
    pub fn required_args(mut self, names: &[&str]) -> Self {
        self.required = ArgShape::Exact(names.iter().map(|n| arg_slot(n)).collect());
        self
    }

    pub fn optional_args(mut self, names: &[&str]) -> Self {
        self.optional = names.iter().map(|n| arg_slot(n)).collect();
        self
    }

    pub fn any_args(mut self) -> Self {
        self.required = ArgShape::Any;
        self
    }

    pub fn slot(mut self, slot: bool) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn attaches(mut self, attaches: bool) -> Self {
        self.attaches = Some(attaches);
        self
    }
}

fn arg_slot(name: &str) -> ArgSlot {
    if name.is_empty() {
        None
    } else {
        Some(CompactString::new(name))
    }
}

/// `DocumentRoot` -> `document_root`
pub fn snake_case(name: &str) -> CompactString {
    let mut out = CompactString::default();
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: Vec<ClassInfo>,
    by_name: FxHashMap<CompactString, ClassId>,
    by_dsl: FxHashMap<CompactString, ClassId>,
    pub(crate) known_features: FxHashSet<CompactString>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in class hierarchy.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        builtin::register_builtins(&mut registry)?;
        Ok(registry)
    }

    pub fn register(&mut self, spec: ClassSpec) -> Result<ClassId> {
        if self.by_name.contains_key(&spec.name) {
            return Err(DrawError::invalid_value(format!(
                "class `{}` is already registered",
                spec.name
            )));
        }
        let parent = match &spec.parent {
            Some(name) => Some(self.by_name(name)?),
            None => None,
        };
        let dsl_name = spec.dsl_name.clone().unwrap_or_else(|| snake_case(&spec.name));
        if self.by_dsl.contains_key(&dsl_name) {
            return Err(DrawError::invalid_value(format!(
                "dsl name `{}` is already taken",
                dsl_name
            )));
        }

        let inherited = parent.map(|p| self.get(p));
        let slot = spec
            .slot
            .unwrap_or_else(|| inherited.map_or(false, |p| p.slot));
        let attaches = spec
            .attaches
            .unwrap_or_else(|| inherited.map_or(true, |p| p.attaches));
        let widget = spec.name == builtin::WIDGET || inherited.map_or(false, |p| p.widget);

        let id = ClassId(self.classes.len() as u32);
        self.classes.push(ClassInfo {
            name: spec.name.clone(),
            dsl_name: dsl_name.clone(),
            parent,
            styles: Vec::new(),
            defaults: StyleMap::new(),
            own_events: Vec::new(),
            events: Vec::new(),
            required: spec.required,
            optional: spec.optional,
            slot,
            attaches,
            widget,
        });
        self.by_name.insert(spec.name, id);
        self.by_dsl.insert(dsl_name, id);

        for descriptor in spec.styles {
            self.declare_style(id, descriptor);
        }
        for (name, value) in spec.defaults {
            self.set_default(id, &name, value)?;
        }
        for event in spec.events {
            self.push_event(id, event);
        }
        self.refresh_events(id);
        Ok(id)
    }

    /// # Panics
    ///
    /// If `id` was not issued by this registry. Ids that come from outside
    /// go through [`Self::try_get`] or [`Self::check_class`] first.
    pub fn get(&self, id: ClassId) -> &ClassInfo {
        &self.classes[id.index()]
    }

    pub fn try_get(&self, id: ClassId) -> Option<&ClassInfo> {
        self.classes.get(id.index())
    }

    pub fn check_class(&self, id: ClassId) -> Result<()> {
        match self.try_get(id) {
            Some(_) => Ok(()),
            None => Err(DrawError::UnknownDrawableClass(format!("{:?}", id))),
        }
    }

    pub(crate) fn class_mut(&mut self, id: ClassId) -> &mut ClassInfo {
        &mut self.classes[id.index()]
    }

    pub fn by_name(&self, name: &str) -> Result<ClassId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| DrawError::UnknownDrawableClass(name.to_string()))
    }

    /// Factory lookup by DSL name (`"para"`, `"stack"`). Unknown names fail closed.
    pub fn by_dsl_name(&self, dsl_name: &str) -> Result<ClassId> {
        self.by_dsl
            .get(dsl_name)
            .copied()
            .ok_or_else(|| DrawError::UnknownDrawableClass(dsl_name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &ClassInfo)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, c)| (ClassId(i as u32), c))
    }

    /// `class` itself, then each ancestor up to the root.
    pub fn ancestors(&self, class: ClassId) -> Ancestors<'_> {
        Ancestors {
            registry: self,
            next: Some(class),
        }
    }

    pub fn is_a(&self, class: ClassId, ancestor: ClassId) -> bool {
        self.ancestors(class).any(|c| c == ancestor)
    }

    pub fn known_features(&self) -> &FxHashSet<CompactString> {
        &self.known_features
    }

    /// Registers (or replaces) the default for a declared style. The default is
    /// validated when a drawable picks it up, not here.
    pub fn set_default(&mut self, class: ClassId, name: &str, value: Value) -> Result<()> {
        self.check_class(class)?;
        if !self.is_style(class, name) {
            return Err(DrawError::NoSuchStyle {
                class: self.get(class).name().to_string(),
                style: name.to_string(),
            });
        }
        self.class_mut(class).defaults.insert(name.to_string(), value);
        Ok(())
    }

    /// Nearest default along the ancestor chain.
    pub fn default_for(&self, class: ClassId, name: &str) -> Option<&Value> {
        self.ancestors(class)
            .find_map(|c| self.get(c).defaults.get(name))
    }

    /// Effective event vocabulary: own declarations plus every ancestor's.
    pub fn declared_events(&self, class: ClassId) -> &[CompactString] {
        &self.get(class).events
    }

    pub fn knows_event(&self, class: ClassId, event: &str) -> bool {
        self.declared_events(class).iter().any(|e| e == event)
    }

    pub fn check_event(&self, class: ClassId, event: &str) -> Result<()> {
        self.check_class(class)?;
        if self.knows_event(class, event) {
            Ok(())
        } else {
            Err(DrawError::UnregisteredEvent {
                class: self.get(class).name().to_string(),
                event: event.to_string(),
            })
        }
    }

    /// Adds an event to a class after registration; descendants pick it up.
    pub fn declare_event(&mut self, class: ClassId, event: &str) -> bool {
        if !self.push_event(class, CompactString::new(event)) {
            return false;
        }
        let affected: Vec<ClassId> = self
            .iter()
            .map(|(id, _)| id)
            .filter(|id| self.is_a(*id, class))
            .collect();
        // Ids are allocated parent-first, so ascending order refreshes parents
        // before their children.
        for id in affected {
            self.refresh_events(id);
        }
        true
    }

    fn push_event(&mut self, class: ClassId, event: CompactString) -> bool {
        let info = self.class_mut(class);
        if info.own_events.contains(&event) {
            tracing::debug!(class = %info.name, event = %event, "event already declared");
            return false;
        }
        info.own_events.push(event);
        true
    }

    fn refresh_events(&mut self, class: ClassId) {
        let mut events: Vec<CompactString> = match self.get(class).parent {
            Some(parent) => self.get(parent).events.clone(),
            None => Vec::new(),
        };
        for event in &self.get(class).own_events {
            if !events.contains(event) {
                events.push(event.clone());
            }
        }
        self.class_mut(class).events = events;
    }
}

pub struct Ancestors<'a> {
    registry: &'a ClassRegistry,
    next: Option<ClassId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ClassId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.registry.get(current).parent;
        Some(current)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/registry.rs"]
mod tests;

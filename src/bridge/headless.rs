//! Headless bridge for tests and for embedders without a real backend.
//!
//! Keeps a mirror of every drawable the core announces and keeps it in sync
//! through the same events a real display backend would listen to.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::{BridgeLink, BridgeSender, DisplayBridge};
use crate::core::{DrawableId, Result, StyleMap, Value};
use crate::event::names;
use crate::schema::builtin;

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayMirror {
    pub class_name: String,
    pub styles: StyleMap,
    pub parent: Option<DrawableId>,
    pub is_widget: bool,
}

#[derive(Debug, Default)]
pub struct HeadlessState {
    mirrors: FxHashMap<DrawableId, DisplayMirror>,
    created: Vec<DrawableId>,
    destroyed: Vec<DrawableId>,
    prop_changes: usize,
    heartbeats: u64,
}

/// Read access to a [`HeadlessBridge`]'s state after the bridge has been
/// moved into the app.
#[derive(Clone, Debug)]
pub struct HeadlessView {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessView {
    pub fn mirror(&self, id: DrawableId) -> Option<DisplayMirror> {
        self.state.borrow().mirrors.get(&id).cloned()
    }

    pub fn mirrored(&self) -> usize {
        self.state.borrow().mirrors.len()
    }

    /// Ids announced through `create_display_drawable_for`, in order.
    pub fn created(&self) -> Ref<'_, [DrawableId]> {
        Ref::map(self.state.borrow(), |s| s.created.as_slice())
    }

    pub fn destroyed(&self) -> Ref<'_, [DrawableId]> {
        Ref::map(self.state.borrow(), |s| s.destroyed.as_slice())
    }

    pub fn prop_changes(&self) -> usize {
        self.state.borrow().prop_changes
    }

    pub fn heartbeats(&self) -> u64 {
        self.state.borrow().heartbeats
    }
}

#[derive(Debug)]
pub struct HeadlessBridge {
    state: Rc<RefCell<HeadlessState>>,
    run_mode: String,
    features: Vec<&'static str>,
    shutdown_after: Option<u64>,
    sender: Option<BridgeSender>,
}

impl HeadlessBridge {
    /// A bridge that answers `run` with the `return` mode.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(HeadlessState::default())),
            run_mode: "return".to_string(),
            features: builtin_features(),
            shutdown_after: None,
            sender: None,
        }
    }

    pub fn with_run_mode(mut self, mode: &str) -> Self {
        self.run_mode = mode.to_string();
        self
    }

    pub fn with_features(mut self, features: &[&'static str]) -> Self {
        self.features = features.to_vec();
        self
    }

    /// In `wait` mode, shut the app down after this many heartbeats.
    pub fn shutdown_after_heartbeats(mut self, beats: u64) -> Self {
        self.shutdown_after = Some(beats);
        self
    }

    pub fn view(&self) -> HeadlessView {
        HeadlessView {
            state: Rc::clone(&self.state),
        }
    }

    pub fn sender(&self) -> Option<BridgeSender> {
        self.sender.clone()
    }
}

impl Default for HeadlessBridge {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_features() -> Vec<&'static str> {
    crate::schema::feature::BUILTIN_FEATURES.to_vec()
}

impl DisplayBridge for HeadlessBridge {
    fn connect(&mut self, mut link: BridgeLink<'_>) -> Result<()> {
        self.sender = Some(link.sender());

        let state = Rc::clone(&self.state);
        link.subscribe(builtin::DRAWABLE, names::PROP_CHANGE, move |_app, event| {
            let (Some(target), Some(Value::Object(changed))) = (event.target, event.arg(0)) else {
                return Ok(());
            };
            let mut state = state.borrow_mut();
            state.prop_changes += 1;
            if let Some(mirror) = state.mirrors.get_mut(&target) {
                for (name, value) in changed {
                    mirror.styles.insert(name.clone(), value.clone());
                }
            }
            Ok(())
        })?;

        let state = Rc::clone(&self.state);
        link.subscribe(builtin::DRAWABLE, names::PARENT, move |_app, event| {
            let Some(target) = event.target else {
                return Ok(());
            };
            let parent = event.arg(0).and_then(DrawableId::from_value);
            if let Some(mirror) = state.borrow_mut().mirrors.get_mut(&target) {
                mirror.parent = parent;
            }
            Ok(())
        })?;

        let state = Rc::clone(&self.state);
        link.subscribe(builtin::DRAWABLE, names::DESTROY, move |_app, event| {
            let Some(target) = event.target else {
                return Ok(());
            };
            let mut state = state.borrow_mut();
            if state.mirrors.remove(&target).is_some() {
                state.destroyed.push(target);
            }
            Ok(())
        })?;

        let mode = self.run_mode.clone();
        link.subscribe(builtin::APP, names::RUN, move |app, _event| {
            app.dispatch_bridge_event(
                names::CUSTOM_EVENT_LOOP,
                None,
                vec![Value::from(mode.as_str())],
            )?;
            Ok(())
        })?;

        let state = Rc::clone(&self.state);
        let limit = self.shutdown_after;
        link.subscribe(builtin::APP, names::HEARTBEAT, move |app, _event| {
            let beats = {
                let mut state = state.borrow_mut();
                state.heartbeats += 1;
                state.heartbeats
            };
            if limit.is_some_and(|limit| beats >= limit) {
                app.destroy_app()?;
            }
            Ok(())
        })?;

        Ok(())
    }

    fn create_display_drawable_for(
        &mut self,
        class_name: &str,
        id: DrawableId,
        styles: &StyleMap,
        is_widget: bool,
    ) -> Result<()> {
        tracing::trace!(class = %class_name, %id, "mirroring drawable");
        let mut state = self.state.borrow_mut();
        state.mirrors.insert(
            id,
            DisplayMirror {
                class_name: class_name.to_string(),
                styles: styles.clone(),
                parent: None,
                is_widget,
            },
        );
        state.created.push(id);
        Ok(())
    }

    fn supported_features(&self) -> &[&'static str] {
        &self.features
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/headless.rs"]
mod tests;

//! Display bridge contract.
//!
//! The core calls into the bridge (`create_display_drawable_for`); the bridge
//! calls back only through the event bus, either synchronously from its own
//! handlers or through the [`queue`] from other threads.

pub mod headless;
pub mod queue;
pub mod signals;

use crate::app::App;
use crate::core::{DrawableId, Result, StyleMap};
use crate::event::{Event, EventBus, SubscriptionId};
use crate::schema::feature::BUILTIN_FEATURES;
use crate::schema::ClassRegistry;

pub use headless::{DisplayMirror, HeadlessBridge, HeadlessView};
pub use queue::{bridge_channel, BridgeMessage, BridgeReceiver, BridgeSender};

/// What a bridge gets when it is connected to an app.
pub struct BridgeLink<'a> {
    bus: &'a mut EventBus<App>,
    classes: &'a ClassRegistry,
    sender: BridgeSender,
}

impl<'a> BridgeLink<'a> {
    pub(crate) fn new(
        bus: &'a mut EventBus<App>,
        classes: &'a ClassRegistry,
        sender: BridgeSender,
    ) -> Self {
        Self {
            bus,
            classes,
            sender,
        }
    }

    /// Untargeted subscription using the vocabulary of `class_name`.
    pub fn subscribe<F>(&mut self, class_name: &str, event: &str, handler: F) -> Result<SubscriptionId>
    where
        F: Fn(&mut App, &Event) -> Result<()> + 'static,
    {
        let class = self.classes.by_name(class_name)?;
        self.bus
            .subscribe(self.classes, class, event, None, None, handler)
    }

    /// Sender for messages delivered from outside the core's thread.
    pub fn sender(&self) -> BridgeSender {
        self.sender.clone()
    }
}

pub trait DisplayBridge {
    /// Called once while the app is being built, before any drawable exists.
    fn connect(&mut self, link: BridgeLink<'_>) -> Result<()> {
        let _ = link;
        Ok(())
    }

    /// Called once per drawable right after it is registered.
    fn create_display_drawable_for(
        &mut self,
        class_name: &str,
        id: DrawableId,
        styles: &StyleMap,
        is_widget: bool,
    ) -> Result<()>;

    fn supported_features(&self) -> &[&'static str] {
        BUILTIN_FEATURES
    }
}

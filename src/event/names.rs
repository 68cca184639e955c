//! Event names the core itself declares or dispatches.

pub const PARENT: &str = "parent";
pub const DESTROY: &str = "destroy";
pub const PROP_CHANGE: &str = "prop_change";

pub const CLICK: &str = "click";
pub const HOVER: &str = "hover";
pub const LEAVE: &str = "leave";
pub const MOTION: &str = "motion";
pub const RELEASE: &str = "release";

pub const INIT: &str = "init";
pub const RUN: &str = "run";
pub const HEARTBEAT: &str = "heartbeat";
pub const CUSTOM_EVENT_LOOP: &str = "custom_event_loop";
pub const SHUTDOWN: &str = "shutdown";
pub const KEYPRESS: &str = "keypress";

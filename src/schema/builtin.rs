//! Built-in class hierarchy shared by every app.
//!
//! ```text
//! Drawable
//! ├── Slot ── Flow ── DocumentRoot
//! │        └─ Stack
//! ├── Widget
//! ├── TextDrawable
//! └── App
//! ```

use serde_json::json;

use super::validators;
use super::{ClassRegistry, ClassSpec};
use crate::core::Result;
use crate::event::names;

pub const DRAWABLE: &str = "Drawable";
pub const SLOT: &str = "Slot";
pub const FLOW: &str = "Flow";
pub const STACK: &str = "Stack";
pub const DOCUMENT_ROOT: &str = "DocumentRoot";
pub const WIDGET: &str = "Widget";
pub const TEXT_DRAWABLE: &str = "TextDrawable";
pub const APP: &str = "App";

pub fn register_builtins(registry: &mut ClassRegistry) -> Result<()> {
    let specs = [
        ClassSpec::root(DRAWABLE)
            .validated_style("hidden", validators::boolean())
            .validated_style("left", validators::dimension())
            .validated_style("top", validators::dimension())
            .validated_style("width", validators::dimension())
            .validated_style("height", validators::dimension())
            .validated_style("margin", validators::margin())
            .default_style("hidden", json!(false))
            .events(&[names::PARENT, names::DESTROY, names::PROP_CHANGE]),
        ClassSpec::new(SLOT)
            .slot(true)
            .optional_args(&["width", "height"])
            .events(&[
                names::CLICK,
                names::HOVER,
                names::LEAVE,
                names::MOTION,
                names::RELEASE,
            ]),
        ClassSpec::new(FLOW).parent(SLOT).optional_args(&["width", "height"]),
        ClassSpec::new(STACK).parent(SLOT).optional_args(&["width", "height"]),
        ClassSpec::new(DOCUMENT_ROOT)
            .parent(FLOW)
            .attaches(false)
            .default_style("width", json!("100%"))
            .default_style("height", json!("100%")),
        ClassSpec::new(WIDGET).slot(true).any_args().events(&[
            names::CLICK,
            names::HOVER,
            names::LEAVE,
        ]),
        ClassSpec::new(TEXT_DRAWABLE)
            .any_args()
            .attaches(false)
            .validated_style("font", validators::string())
            .validated_style("stroke", validators::string()),
        ClassSpec::new(APP)
            .attaches(false)
            .validated_style("title", validators::string())
            .validated_style("resizable", validators::boolean())
            .events(&[
                names::INIT,
                names::RUN,
                names::HEARTBEAT,
                names::CUSTOM_EVENT_LOOP,
                names::SHUTDOWN,
                names::KEYPRESS,
            ]),
    ];

    for spec in specs {
        if let Err(err) = registry.register(spec) {
            tracing::error!(error = %err, "failed to register built-in class");
            return Err(err);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/schema/builtin.rs"]
mod tests;

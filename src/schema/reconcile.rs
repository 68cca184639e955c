//! Construction-time reconciliation of positional and keyword arguments
//! against a class's style schema.

use compact_str::CompactString;

use super::feature::{FeatureFilter, FeatureSet};
use super::{ArgShape, ArgSlot, ClassId, ClassRegistry};
use crate::core::{DrawError, Result, StyleMap, Value};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Reconciled {
    /// Canonical style values the new drawable starts with.
    pub styles: StyleMap,
    /// Positional arguments bound to placeholder positions (or every positional
    /// argument when the class accepts any shape).
    pub extras: Vec<Value>,
    /// Keywords that named no declared style.
    pub unknown: Vec<String>,
}

/// Builds the initial style map for a new instance of `class`.
///
/// With `strict` set, unrecognized keywords fail with `NoSuchStyle` instead of
/// being logged and dropped.
pub fn reconcile(
    classes: &ClassRegistry,
    class: ClassId,
    features: &FeatureSet,
    args: &[Value],
    kwargs: &StyleMap,
    strict: bool,
) -> Result<Reconciled> {
    let info = classes.get(class);
    let class_name = info.name();

    for key in kwargs.keys() {
        classes.check_style_feature(class, key, features)?;
    }

    let mut out = Reconciled::default();

    match info.required_args() {
        ArgShape::Any => out.extras.extend(args.iter().cloned()),
        ArgShape::Exact(required) => {
            let optional = info.optional_args();
            check_shape(class_name, required, optional, args, kwargs)?;

            for (slot, arg) in required.iter().chain(optional).zip(args) {
                match slot {
                    Some(name) => {
                        let value = classes.validate_style(class, name, arg)?;
                        out.styles.insert(name.to_string(), value);
                    }
                    None => out.extras.push(arg.clone()),
                }
            }
        }
    }

    let declared: Vec<CompactString> = classes.resolve_names(class, FeatureFilter::Only(features));
    for name in &declared {
        if out.styles.contains_key(name.as_str()) || kwargs.contains_key(name.as_str()) {
            continue;
        }
        if let Some(default) = classes.default_for(class, name) {
            let value = classes.validate_style(class, name, default)?;
            out.styles.insert(name.to_string(), value);
        }
    }

    for (key, raw) in kwargs {
        if classes.is_style(class, key) {
            let value = classes.validate_style(class, key, raw)?;
            out.styles.insert(key.clone(), value);
        } else {
            out.unknown.push(key.clone());
        }
    }

    if !out.unknown.is_empty() {
        if strict {
            return Err(DrawError::NoSuchStyle {
                class: class_name.to_string(),
                style: out.unknown.join(", "),
            });
        }
        tracing::warn!(
            class = %class_name,
            keywords = ?out.unknown,
            "ignoring unrecognized constructor keywords"
        );
    }

    Ok(out)
}

fn check_shape(
    class_name: &str,
    required: &[ArgSlot],
    optional: &[ArgSlot],
    args: &[Value],
    kwargs: &StyleMap,
) -> Result<()> {
    let max = required.len() + optional.len();
    if args.len() > max {
        return Err(DrawError::bad_args(
            class_name,
            format!("too many arguments: got {}, at most {}", args.len(), max),
        ));
    }

    if args.is_empty() {
        for slot in required {
            match slot {
                Some(name) if kwargs.contains_key(name.as_str()) => {}
                Some(name) => {
                    return Err(DrawError::bad_args(
                        class_name,
                        format!("missing required argument `{}`", name),
                    ))
                }
                None => {
                    return Err(DrawError::bad_args(
                        class_name,
                        "missing required positional argument",
                    ))
                }
            }
        }
    } else if args.len() < required.len() {
        return Err(DrawError::bad_args(
            class_name,
            format!(
                "not enough arguments: got {}, need {}",
                args.len(),
                required.len()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/schema/reconcile.rs"]
mod tests;

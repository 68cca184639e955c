use thiserror::Error;

use super::id::DrawableId;

pub type Result<T> = std::result::Result<T, DrawError>;

#[derive(Debug, Error)]
pub enum DrawError {
    #[error("no such style `{style}` on {class}")]
    NoSuchStyle { class: String, style: String },

    #[error("invalid attribute value: {0}")]
    InvalidAttributeValue(String),

    #[error("bad argument list for {class}: {reason}")]
    BadArgumentList { class: String, reason: String },

    #[error("unsupported feature `{feature}` ({context})")]
    UnsupportedFeature { feature: String, context: String },

    #[error("{0} has no linkable id yet")]
    NoLinkableId(String),

    #[error("event `{event}` is not registered for {class}")]
    UnregisteredEvent { class: String, event: String },

    #[error("only one App may exist per process")]
    TooManyInstances,

    #[error("no drawable with id {0}")]
    NotFound(DrawableId),

    #[error("unknown drawable class `{0}`")]
    UnknownDrawableClass(String),

    #[error("cannot move {child} under {parent}: {reason}")]
    InvalidParent {
        child: DrawableId,
        parent: DrawableId,
        reason: &'static str,
    },

    #[error("unknown run-loop mode `{0}`")]
    UnknownRunMode(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DrawError {
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        DrawError::InvalidAttributeValue(msg.into())
    }

    pub fn bad_args(class: &str, reason: impl Into<String>) -> Self {
        DrawError::BadArgumentList {
            class: class.to_string(),
            reason: reason.into(),
        }
    }

    /// Short stable name of the error kind, useful for log fields and harness output.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawError::NoSuchStyle { .. } => "NoSuchStyle",
            DrawError::InvalidAttributeValue(_) => "InvalidAttributeValue",
            DrawError::BadArgumentList { .. } => "BadArgumentList",
            DrawError::UnsupportedFeature { .. } => "UnsupportedFeature",
            DrawError::NoLinkableId(_) => "NoLinkableId",
            DrawError::UnregisteredEvent { .. } => "UnregisteredEvent",
            DrawError::TooManyInstances => "TooManyInstances",
            DrawError::NotFound(_) => "NotFound",
            DrawError::UnknownDrawableClass(_) => "UnknownDrawableClass",
            DrawError::InvalidParent { .. } => "InvalidParent",
            DrawError::UnknownRunMode(_) => "UnknownRunMode",
            DrawError::Config(_) | DrawError::Io(_) | DrawError::Json(_) => "Config",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/error.rs"]
mod tests;

//! 核心类型
//!
//! - DrawableId: 可绘制对象的唯一标识
//! - DrawError: 统一错误类型
//! - Value / StyleMap: 样式取值

pub mod error;
pub mod id;
pub mod value;

pub use error::{DrawError, Result};
pub use id::DrawableId;
pub use value::{StyleMap, Value};

//! drawbridge - 声明式 GUI 工具包的同步核心
//!
//! 模块结构：
//! - core: 基础类型（DrawableId, DrawError, 样式值）
//! - schema: 类注册表、样式模式、校验器、特性开关
//! - kernel: 标识注册表、可绘制对象树、插槽栈
//! - event: 事件总线与 EventEmitter
//! - bridge: 显示后端契约、消息队列、无头后端
//! - app: App 控制器（单例、生命周期、运行模式）

pub mod app;
pub mod bridge;
pub mod core;
pub mod event;
pub mod kernel;
pub mod logging;
pub mod schema;

pub use app::{App, AppConfig, RunMode};
pub use bridge::{DisplayBridge, HeadlessBridge};
pub use crate::core::{DrawError, DrawableId, Result, StyleMap, Value};
pub use event::{DrawableHandle, Event, EventEmitter, SubscriptionId};
pub use schema::{ClassId, ClassRegistry, ClassSpec};

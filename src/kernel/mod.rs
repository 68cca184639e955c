//! Application-side drawable bookkeeping: identities, records, tree, slots.

pub mod drawable;
pub mod registry;
pub mod slots;
pub mod tree;

pub use drawable::{Drawable, Lifecycle};
pub use registry::IdentityRegistry;
pub use slots::SlotStack;

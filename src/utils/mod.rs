//! Utility helpers: generational scene handles and scoped logging.

pub mod allocator;
pub mod logging;

pub use allocator::{Arena, GenerationalId, SceneId};

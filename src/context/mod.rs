//! Context domain: per-frame named values that travel with the tracked stack.
//! Values are held in their tagged text encoding; a frame's map lives exactly as
//! long as the frame does.

pub mod store;
pub mod value;

pub use store::{ContextStore, FrameValues};
pub use value::{TypedValue, ValueTag, DATE_FORMAT};

//! Framelog: Call-Stack-Aware Tracking Core
//!
//! Reconciles a host's actual call stack against a previously tracked stack
//! snapshot and keeps a typed key-value context per tracked frame. All state is
//! in-process and scoped to an explicitly passed session.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod session;
pub mod snapshot;
pub mod stack;
pub mod types;

pub use api::{FixedStack, StackSource, TrackerApi};
pub use context::{ContextStore, TypedValue};
pub use error::TrackError;
pub use session::{SessionRegistry, TrackingSession};
pub use snapshot::Snapshot;
pub use stack::{Divergence, Frame, TrackedStack};
pub use types::{CallSite, HideDepth, SessionId, UnitName};

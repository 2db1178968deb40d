//! Snapshot Views
//!
//! Read-only copy of a session's tracked stack and context store as two
//! parallel sequences: `calls[i]` is frame `i`, `values[i]` its named values.
//! Serializes to `{"p_calls": [...], "p_values": [...]}`.

use crate::context::{ContextStore, FrameValues};
use crate::error::TrackError;
use crate::stack::{Frame, TrackedStack};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "p_calls")]
    pub calls: Vec<Frame>,
    #[serde(rename = "p_values")]
    pub values: Vec<FrameValues>,
}

impl Snapshot {
    pub(crate) fn capture(stack: &TrackedStack, store: &ContextStore) -> Self {
        debug_assert_eq!(stack.len(), store.len());
        Self {
            calls: stack.frames().to_vec(),
            values: store.frames().to_vec(),
        }
    }

    pub fn depth(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Frame `index` together with its values
    pub fn frame(&self, index: usize) -> Option<(&Frame, &FrameValues)> {
        Some((self.calls.get(index)?, self.values.get(index)?))
    }

    pub fn to_json(&self) -> Result<String, TrackError> {
        Ok(serde_json::to_string(self)?)
    }
}

//! Context store
//!
//! Parallel to the tracked stack: entry `i` holds the named values of tracked
//! frame `i`. Names are case-sensitive and the last write under a name wins.

use crate::context::value::TypedValue;
use crate::error::TrackError;
use std::collections::BTreeMap;
use tracing::trace;

/// Encoded values of one frame, keyed by name
pub type FrameValues = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextStore {
    frames: Vec<FrameValues>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Drop the maps of invalidated frames, then give every frame of a stack of
    /// `depth` frames a map (new frames start empty).
    pub fn align(&mut self, divergence: usize, depth: usize) {
        self.frames.truncate(divergence.min(depth));
        self.frames.resize_with(depth, FrameValues::new);
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Store `value` under `name` at frame `index`, replacing any earlier value.
    pub fn set(&mut self, index: usize, name: &str, value: &TypedValue) -> Result<(), TrackError> {
        let depth = self.frames.len();
        let values = self.frames.get_mut(index).ok_or_else(|| {
            TrackError::invalid(format!("no tracked frame at index {} (depth {})", index, depth))
        })?;
        let encoded = value.encode();
        trace!(index, name, value = %encoded, "context value set");
        values.insert(name.to_string(), encoded);
        Ok(())
    }

    pub fn frame(&self, index: usize) -> Option<&FrameValues> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[FrameValues] {
        &self.frames
    }

    /// Encoded value under `name` at frame `index`
    pub fn get(&self, index: usize, name: &str) -> Option<&str> {
        self.frames
            .get(index)
            .and_then(|values| values.get(name))
            .map(String::as_str)
    }

    pub fn get_typed(&self, index: usize, name: &str) -> Result<Option<TypedValue>, TrackError> {
        self.get(index, name).map(TypedValue::decode).transpose()
    }
}

//! Tracked Call Stack
//!
//! The logical call chain as last observed by a track event. Index 0 is the
//! outermost (root) frame. The stack is only ever changed by
//! [`TrackedStack::synchronize`], which reconciles it against the host's actual
//! stack.

pub mod sync;

pub use sync::Divergence;

use crate::types::{Line, UnitName};
use serde::{Deserialize, Serialize};

/// One level of the logical call stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub unit: UnitName,
    /// Track point (top frame) or call site into the next deeper frame
    pub line: Line,
    /// Line at which the frame was most recently (re)anchored; `None` for a
    /// frame that is only known as a caller
    pub first_tracked_line: Option<Line>,
}

impl Frame {
    pub fn new(unit: UnitName, line: Line, first_tracked_line: Option<Line>) -> Self {
        Self {
            unit,
            line,
            first_tracked_line,
        }
    }
}

/// Ordered, gap-free sequence of tracked frames
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackedStack {
    frames: Vec<Frame>,
}

impl TrackedStack {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Index of the innermost tracked frame
    pub fn top_index(&self) -> Option<usize> {
        self.frames.len().checked_sub(1)
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

//! Stack synchronization
//!
//! Diffs the tracked stack against the caller-supplied actual stack. Lines are
//! compared at every index below the innermost actual frame and ignored at the
//! innermost one, whose line moves with every track point.

use super::{Frame, TrackedStack};
use crate::types::{CallSite, HideDepth};
use tracing::debug;

/// Outcome of one synchronization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Divergence {
    /// First index whose tracked frame was not retained. Everything at or
    /// beyond it was dropped before the stack was extended.
    pub index: usize,
    /// Number of tracked frames dropped
    pub truncated: usize,
    /// Number of frames appended from the actual stack
    pub appended: usize,
}

/// How a tracked frame relates to the actual frame at the same index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuity {
    /// Same routine, same call site (or the innermost frame, where the line is
    /// not compared)
    Same,
    /// Same routine calling from another line: the frame itself is kept but
    /// everything it called before is stale
    Moved,
    /// Another routine occupies this level
    Diverged,
}

fn continuity(tracked: &Frame, actual: &CallSite, innermost: bool) -> Continuity {
    if tracked.unit != actual.unit {
        Continuity::Diverged
    } else if innermost || tracked.line == actual.line {
        Continuity::Same
    } else {
        Continuity::Moved
    }
}

/// First index at which the tracked frame cannot be kept.
fn divergence_index(tracked: &[Frame], effective: &[CallSite]) -> usize {
    let innermost = effective.len().saturating_sub(1);
    let shared = tracked.len().min(effective.len());

    let mut index = 0;
    while index < shared {
        match continuity(&tracked[index], &effective[index], index == innermost) {
            Continuity::Same => index += 1,
            Continuity::Moved => return index + 1,
            Continuity::Diverged => return index,
        }
    }
    index
}

impl TrackedStack {
    /// Reconcile the tracked stack with the actual stack.
    ///
    /// `actual` is root-first and includes the frame making the track call.
    /// The innermost `hide` frames are dropped first; if nothing remains the
    /// tracked stack is cleared.
    pub fn synchronize(&mut self, actual: &[CallSite], hide: HideDepth, reset_top: bool) -> Divergence {
        let visible = actual.len().saturating_sub(hide.get());
        let effective = &actual[..visible];
        let previous = self.frames.len();

        if effective.is_empty() {
            self.frames.clear();
            debug!(
                actual_depth = actual.len(),
                hide = hide.get(),
                truncated = previous,
                "tracked stack cleared"
            );
            return Divergence {
                index: 0,
                truncated: previous,
                appended: 0,
            };
        }

        let top = effective.len() - 1;
        let index = divergence_index(&self.frames, effective);

        self.frames.truncate(index);
        let truncated = previous - self.frames.len();

        // Retained callers take the actual call site; for frames compared by
        // line this only changes a frame reported as moved.
        for (frame, site) in self.frames.iter_mut().zip(effective).take(top) {
            frame.line = site.line;
        }

        let appended = effective.len() - self.frames.len();
        for (offset, site) in effective[index..].iter().enumerate() {
            let first_tracked_line = if index + offset == top {
                Some(site.line)
            } else {
                None
            };
            self.frames
                .push(Frame::new(site.unit.clone(), site.line, first_tracked_line));
        }

        if index > top {
            let line = effective[top].line;
            let frame = &mut self.frames[top];
            frame.line = line;
            if reset_top {
                frame.first_tracked_line = Some(line);
            }
        }

        debug!(
            actual_depth = actual.len(),
            hide = hide.get(),
            divergence = index,
            truncated,
            appended,
            reset_top,
            "tracked stack synchronized"
        );

        Divergence {
            index,
            truncated,
            appended,
        }
    }
}

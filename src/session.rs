//! Tracking sessions
//!
//! A [`TrackingSession`] owns exactly one tracked stack and its context store.
//! Every track or value event is applied to it synchronously and completely.
//! [`SessionRegistry`] keeps any number of independent sessions in one process.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::config::TrackingConfig;
use crate::context::{ContextStore, TypedValue};
use crate::error::TrackError;
use crate::snapshot::Snapshot;
use crate::stack::{Divergence, TrackedStack};
use crate::types::{CallSite, HideDepth, SessionId};

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Session-scoped tracking state
#[derive(Debug, Clone, Default)]
pub struct TrackingSession {
    config: TrackingConfig,
    stack: TrackedStack,
    values: ContextStore,
}

impl TrackingSession {
    pub fn new() -> Self {
        Self::with_config(TrackingConfig::default())
    }

    pub fn with_config(config: TrackingConfig) -> Self {
        Self {
            config,
            stack: TrackedStack::new(),
            values: ContextStore::new(),
        }
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    pub fn stack(&self) -> &TrackedStack {
        &self.stack
    }

    pub fn values(&self) -> &ContextStore {
        &self.values
    }

    /// Reconcile the tracked stack with `actual` and drop the values of every
    /// invalidated frame.
    pub fn track(
        &mut self,
        actual: &[CallSite],
        hide: HideDepth,
        reset_top: bool,
    ) -> Result<Divergence, TrackError> {
        self.check_depth(actual)?;
        Ok(self.apply(actual, hide, reset_top))
    }

    /// Track at the caller's site, then store `value` under `name` on the top
    /// frame.
    ///
    /// Returns the index of the frame written, or `None` when `hide` removed
    /// the whole stack (the stack and store are then empty).
    pub fn set_value(
        &mut self,
        actual: &[CallSite],
        name: &str,
        value: impl Into<TypedValue>,
        hide: HideDepth,
    ) -> Result<Option<usize>, TrackError> {
        if name.is_empty() {
            return Err(TrackError::invalid("value name must not be empty"));
        }
        self.check_depth(actual)?;

        let reset_top = self.config.value_resets_top;
        self.apply(actual, hide, reset_top);

        let Some(top) = self.stack.top_index() else {
            return Ok(None);
        };
        self.values.set(top, name, &value.into())?;
        Ok(Some(top))
    }

    /// Read-only copy of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.stack, &self.values)
    }

    /// Forget everything tracked so far.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.values.clear();
    }

    fn check_depth(&self, actual: &[CallSite]) -> Result<(), TrackError> {
        match self.config.max_depth {
            Some(max) if actual.len() > max => Err(TrackError::invalid(format!(
                "actual stack depth {} exceeds the configured maximum {}",
                actual.len(),
                max
            ))),
            _ => Ok(()),
        }
    }

    fn apply(&mut self, actual: &[CallSite], hide: HideDepth, reset_top: bool) -> Divergence {
        let divergence = self.stack.synchronize(actual, hide, reset_top);
        self.values.align(divergence.index, self.stack.len());
        divergence
    }
}

/// Shared handle to one session
pub type SharedSession = Arc<Mutex<TrackingSession>>;

/// Independent tracking sessions keyed by [`SessionId`]
pub struct SessionRegistry {
    config: TrackingConfig,
    sessions: RwLock<HashMap<SessionId, SharedSession>>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(TrackingConfig::default())
    }
}

impl SessionRegistry {
    /// New sessions are created with `config`.
    pub fn new(config: TrackingConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn open(&self) -> SessionId {
        let id = new_session_id();
        let session = Arc::new(Mutex::new(TrackingSession::with_config(self.config.clone())));
        self.sessions.write().insert(id.clone(), session);
        debug!(session_id = %id, "tracking session opened");
        id
    }

    pub fn get(&self, id: &SessionId) -> Result<SharedSession, TrackError> {
        self.sessions
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| TrackError::SessionNotFound(id.clone()))
    }

    /// Run `f` against one session while holding its lock.
    pub fn with_session<R>(
        &self,
        id: &SessionId,
        f: impl FnOnce(&mut TrackingSession) -> R,
    ) -> Result<R, TrackError> {
        let session = self.get(id)?;
        let mut guard = session.lock();
        Ok(f(&mut guard))
    }

    /// External reset hook: empties the session's stack and store.
    pub fn reset(&self, id: &SessionId) -> Result<(), TrackError> {
        self.with_session(id, TrackingSession::reset)?;
        debug!(session_id = %id, "tracking session reset");
        Ok(())
    }

    pub fn close(&self, id: &SessionId) -> Result<(), TrackError> {
        self.sessions
            .write()
            .remove(id)
            .ok_or_else(|| TrackError::SessionNotFound(id.clone()))?;
        debug!(session_id = %id, "tracking session closed");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    pub fn ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.sessions.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

pub fn new_session_id() -> SessionId {
    let ts = now_millis();
    let pid = std::process::id();
    let seq = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
    SessionId::new(format!("sess-{ts}-{pid}-{seq}"))
}

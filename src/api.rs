//! Host-facing tracking API
//!
//! Entry points as an embedding host calls them: arguments may be null, and the
//! caller's actual stack comes from a [`StackSource`]. Arguments are validated
//! before any session state is touched.

use crate::context::TypedValue;
use crate::error::TrackError;
use crate::session::SessionRegistry;
use crate::snapshot::Snapshot;
use crate::types::{CallSite, HideDepth, Line, SessionId};
use std::sync::Arc;

/// Supplies the caller's actual stack, root-first, including the calling frame
pub trait StackSource {
    fn actual_stack(&self) -> Result<Vec<CallSite>, TrackError>;
}

/// A stack captured ahead of time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedStack {
    sites: Vec<CallSite>,
}

impl FixedStack {
    pub fn new(sites: Vec<CallSite>) -> Self {
        Self { sites }
    }

    /// Build from `(dotted unit, line)` pairs, root-first.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, TrackError>
    where
        I: IntoIterator<Item = (&'a str, Line)>,
    {
        let sites = pairs
            .into_iter()
            .map(|(unit, line)| CallSite::parse(unit, line))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { sites })
    }

    pub fn sites(&self) -> &[CallSite] {
        &self.sites
    }
}

impl StackSource for FixedStack {
    fn actual_stack(&self) -> Result<Vec<CallSite>, TrackError> {
        Ok(self.sites.clone())
    }
}

/// Tracking service over a session registry
#[derive(Clone)]
pub struct TrackerApi {
    registry: Arc<SessionRegistry>,
}

impl TrackerApi {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Track the caller's position. A null `reset_top` resets the top frame.
    ///
    /// # Errors
    /// * `InvalidArgument` - `hide` is null or negative
    /// * `SessionNotFound` - unknown session
    pub fn track(
        &self,
        session: &SessionId,
        source: &dyn StackSource,
        hide: Option<i64>,
        reset_top: Option<bool>,
    ) -> Result<(), TrackError> {
        let hide = HideDepth::from_host(hide)?;
        let reset_top = reset_top.unwrap_or(true);
        let actual = source.actual_stack()?;
        self.registry
            .with_session(session, |s| s.track(&actual, hide, reset_top))??;
        Ok(())
    }

    /// Track with the host defaults: nothing hidden, top frame reset.
    pub fn track_default(&self, session: &SessionId, source: &dyn StackSource) -> Result<(), TrackError> {
        self.track(session, source, Some(0), None)
    }

    /// Attach a named value to the caller's frame.
    ///
    /// # Errors
    /// * `InvalidArgument` - `name` is null or empty, or `hide` is null or
    ///   negative
    /// * `SessionNotFound` - unknown session
    pub fn value(
        &self,
        session: &SessionId,
        source: &dyn StackSource,
        name: Option<&str>,
        value: impl Into<TypedValue>,
        hide: Option<i64>,
    ) -> Result<(), TrackError> {
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(TrackError::invalid("value name must not be null or empty")),
        };
        let hide = HideDepth::from_host(hide)?;
        let value = value.into();
        let actual = source.actual_stack()?;
        self.registry
            .with_session(session, |s| s.set_value(&actual, name, value, hide))??;
        Ok(())
    }

    pub fn snapshot(&self, session: &SessionId) -> Result<Snapshot, TrackError> {
        self.registry.with_session(session, |s| s.snapshot())
    }

    pub fn reset(&self, session: &SessionId) -> Result<(), TrackError> {
        self.registry.reset(session)
    }
}

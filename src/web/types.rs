//! Shared request context for the portal router.

use std::sync::Arc;

use chrono::FixedOffset;

use crate::records::RecordStore;
use crate::roster::Roster;

/// Read-only state shared by every request.
///
/// Built once at startup; nothing in it is mutated afterwards, so
/// handlers clone the `Arc`s and never lock.
pub struct PortalContext<S> {
    pub store: Arc<S>,
    pub roster: Arc<Roster>,
    /// Offset used when formatting appointment times.
    pub display_offset: FixedOffset,
}

impl<S: RecordStore> PortalContext<S> {
    pub fn new(store: S, roster: Roster, display_offset: FixedOffset) -> Self {
        Self {
            store: Arc::new(store),
            roster: Arc::new(roster),
            display_offset,
        }
    }
}

// Manual impl: cloning the context must not require `S: Clone`.
impl<S> Clone for PortalContext<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            roster: Arc::clone(&self.roster),
            display_offset: self.display_offset,
        }
    }
}

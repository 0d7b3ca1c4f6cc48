//! Stale-result suppression
//!
//! Every request takes a ticket from a [`RequestEpoch`]. A [`ResultBoard`]
//! only accepts results whose ticket is still the latest issued, so a slow
//! answer to an old request can never overwrite a newer one.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::StopIndex;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::debug;

use super::route_aggregator::RouteSet;

/// Request number issued by a [`RequestEpoch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Raw request number
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic request counter, shared by clones
#[derive(Debug, Clone, Default)]
pub struct RequestEpoch {
    latest: Arc<AtomicU64>,
}

impl RequestEpoch {
    /// Create a counter with no tickets issued
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket, superseding all earlier ones
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Most recently issued ticket
    pub fn latest(&self) -> Option<RequestTicket> {
        match self.latest.load(Ordering::SeqCst) {
            0 => None,
            n => Some(RequestTicket(n)),
        }
    }

    /// Whether no newer ticket has been issued since `ticket`
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Consumer-side holder of the latest accepted result
pub struct ResultBoard<T> {
    epoch: RequestEpoch,
    current: RwLock<Option<(RequestTicket, T)>>,
}

/// Board of the displayed route set
pub type RouteBoard = ResultBoard<RouteSet>;

/// Board of the displayed nearby stops
pub type StopBoard = ResultBoard<StopIndex>;

impl<T> fmt::Debug for ResultBoard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultBoard")
            .field("epoch", &self.epoch)
            .field("ticket", &self.ticket())
            .finish_non_exhaustive()
    }
}

impl<T: Clone> ResultBoard<T> {
    /// Create an empty board tracking `epoch`
    pub fn new(epoch: RequestEpoch) -> Self {
        Self {
            epoch,
            current: RwLock::new(None),
        }
    }

    /// Store `value` if `ticket` is still current
    ///
    /// Returns `false` and leaves the board untouched for a stale ticket.
    pub fn apply(&self, ticket: RequestTicket, value: T) -> bool {
        let mut slot = self.current.write();
        if !self.epoch.is_current(ticket) {
            debug!(%ticket, latest = ?self.epoch.latest(), "Discarding stale result");
            return false;
        }
        *slot = Some((ticket, value));
        true
    }

    /// The accepted result, `None` before any result was applied
    pub fn current(&self) -> Option<T> {
        self.current.read().as_ref().map(|(_, value)| value.clone())
    }
}

impl<T> ResultBoard<T> {
    /// Ticket of the accepted result
    pub fn ticket(&self) -> Option<RequestTicket> {
        self.current.read().as_ref().map(|(ticket, _)| *ticket)
    }

    /// Epoch this board checks tickets against
    pub const fn epoch(&self) -> &RequestEpoch {
        &self.epoch
    }
}

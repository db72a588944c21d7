//! The set of established connections, one slot per service kind.

use crate::config::ServiceKind;

/// Holds at most one connection per [`ServiceKind`].
///
/// Written only during construction and teardown.
#[derive(Debug)]
pub struct ConnectionSet<C> {
    frontend: Option<C>,
    history: Option<C>,
    matching: Option<C>,
}

impl<C> ConnectionSet<C> {
    pub fn new() -> Self {
        Self {
            frontend: None,
            history: None,
            matching: None,
        }
    }

    fn slot_mut(&mut self, kind: ServiceKind) -> &mut Option<C> {
        match kind {
            ServiceKind::Frontend => &mut self.frontend,
            ServiceKind::History => &mut self.history,
            ServiceKind::Matching => &mut self.matching,
        }
    }

    /// Store a connection, returning any connection it replaced.
    pub fn insert(&mut self, kind: ServiceKind, conn: C) -> Option<C> {
        self.slot_mut(kind).replace(conn)
    }

    pub fn get(&self, kind: ServiceKind) -> Option<&C> {
        match kind {
            ServiceKind::Frontend => self.frontend.as_ref(),
            ServiceKind::History => self.history.as_ref(),
            ServiceKind::Matching => self.matching.as_ref(),
        }
    }

    pub fn len(&self) -> usize {
        ServiceKind::ALL
            .iter()
            .filter(|kind| self.get(**kind).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every held connection. Empty slots are skipped; returns how many
    /// were closed.
    pub fn close(&mut self) -> usize {
        let mut closed = 0;
        for kind in ServiceKind::ALL {
            if self.slot_mut(kind).take().is_some() {
                tracing::debug!(service = %kind, "Connection closed");
                closed += 1;
            }
        }
        closed
    }
}

impl<C> Default for ConnectionSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

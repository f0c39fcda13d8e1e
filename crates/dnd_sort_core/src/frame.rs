//! Coalescing of position updates to one per rendered frame.

/// Identifies one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTicket(u64);

impl FrameTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Result of asking for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    pub ticket: FrameTicket,
    /// The unexecuted ticket this request supersedes; the host should cancel it.
    pub superseded: Option<FrameTicket>,
}

/// At most one pending update; a newer request replaces an unexecuted one.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    next: u64,
    pending: Option<FrameTicket>,
}

impl FrameThrottle {
    pub fn request(&mut self) -> FrameRequest {
        self.next += 1;
        let ticket = FrameTicket(self.next);
        let superseded = self.pending.replace(ticket);
        FrameRequest { ticket, superseded }
    }

    /// Consume `ticket` if it is still the pending one.
    pub fn take(&mut self, ticket: FrameTicket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) -> Option<FrameTicket> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameTicket> {
        self.pending
    }
}

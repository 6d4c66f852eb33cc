// Request sequencing
//
// Replies to independent requests may resolve in any order. Each request is
// tagged with a ticket from one monotonic counter; a reply is applied to its
// target only if no newer ticket has already been applied there.

use std::collections::HashMap;

/// A piece of state that several in-flight requests may want to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceTarget {
    /// Editor buffer and active selection
    ActiveBuffer,
    /// File generator status line
    GenerationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    target: SequenceTarget,
    seq: u64,
}

impl Ticket {
    pub fn target(&self) -> SequenceTarget {
        self.target
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    next: u64,
    last_applied: HashMap<SequenceTarget, u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a request before it is sent
    pub fn issue(&mut self, target: SequenceTarget) -> Ticket {
        self.next += 1;
        Ticket {
            target,
            seq: self.next,
        }
    }

    /// Claim the target for a resolved reply. Returns false if the reply is stale.
    pub fn try_apply(&mut self, ticket: Ticket) -> bool {
        let last = self.last_applied.entry(ticket.target).or_insert(0);
        if ticket.seq <= *last {
            log::debug!(
                "[sequencer] Dropping stale reply #{} for {:?} (applied #{})",
                ticket.seq,
                ticket.target,
                last
            );
            return false;
        }
        *last = ticket.seq;
        true
    }
}

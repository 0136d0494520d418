use std::sync::atomic::{AtomicU64, Ordering};

/// Handle for one in-flight progress load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Last-writer-wins guard for a view that reloads when its subject changes.
///
/// Each load takes a ticket with [`ProgressSession::begin`]. When it finishes,
/// [`ProgressSession::complete`] hands the result back only if no newer load
/// was started in the meantime; stale results are dropped.
#[derive(Debug, Default)]
pub struct ProgressSession {
    generation: AtomicU64,
}

impl ProgressSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }

    pub fn complete<T>(&self, ticket: LoadTicket, result: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(result)
        } else {
            log::debug!("Discarding result of superseded load {}", ticket.0);
            None
        }
    }
}

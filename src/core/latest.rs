use std::sync::{
    Mutex,
    PoisonError,
    atomic::{AtomicU64, Ordering},
};

/// Result slot where the most recently *requested* computation wins.
///
/// Every request takes a [`Ticket`] before it starts. A result is only accepted if
/// no newer ticket has been issued since, so a slow superseded request can never
/// overwrite the result of a later one, whatever the completion order.
#[derive(Debug, Default)]
pub struct Latest<T> {
    issued: AtomicU64,
    value: Mutex<Option<(u64, T)>>,
}

#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Ticket(u64);

impl<T> Latest<T> {
    pub const fn new() -> Self {
        Self { issued: AtomicU64::new(0), value: Mutex::new(None) }
    }

    /// Register a new request intent, superseding all previous ones.
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::AcqRel) + 1)
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::Acquire) == ticket.0
    }

    /// Offer the result of the request. Returns whether it has been accepted.
    pub fn complete(&self, ticket: Ticket, value: T) -> bool {
        let mut slot = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.is_current(ticket) {
            return false;
        }
        if let Some((stored, _)) = slot.as_ref()
            && *stored > ticket.0
        {
            return false;
        }
        *slot = Some((ticket.0, value));
        true
    }
}

#[cfg(test)]
impl<T: Clone> Latest<T> {
    #[must_use]
    pub fn get(&self) -> Option<T> {
        let slot = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().map(|(_, value)| value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order() {
        let latest = Latest::new();
        let first = latest.begin();
        assert!(latest.complete(first, 1));
        let second = latest.begin();
        assert!(latest.complete(second, 2));
        assert_eq!(latest.get(), Some(2));
    }

    #[test]
    fn test_superseded_completion_is_dropped() {
        let latest = Latest::new();
        let slow = latest.begin();
        let fast = latest.begin();
        assert!(latest.complete(fast, "fast"));
        assert!(!latest.complete(slow, "slow"));
        assert_eq!(latest.get(), Some("fast"));
    }

    #[test]
    fn test_superseded_before_newer_completes() {
        let latest = Latest::new();
        let first = latest.begin();
        let second = latest.begin();
        assert!(!latest.complete(first, 1));
        assert_eq!(latest.get(), None);
        assert!(latest.complete(second, 2));
        assert_eq!(latest.get(), Some(2));
    }
}

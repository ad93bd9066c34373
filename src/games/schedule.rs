//! Delayed transitions
//!
//! Each session owns its own `Timers`, so leaving a view drops every pending
//! transition with it. Nothing ever fires against a session that is gone.

/// Pending actions keyed by due time (ms)
#[derive(Debug, Clone)]
pub struct Timers<A> {
    pending: Vec<(f64, u64, A)>,
    next_seq: u64,
}

impl<A> Default for Timers<A> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<A> Timers<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` once `delay_ms` has passed since `now`
    pub fn after(&mut self, now: f64, delay_ms: f64, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push((now + delay_ms, seq, action));
    }

    /// Remove and return everything due at `now`, earliest first
    pub fn take_due(&mut self, now: f64) -> Vec<A> {
        let (mut due, rest): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|(at, _, _)| *at <= now);
        self.pending = rest;
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, _, action)| action).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut t = Timers::new();
        t.after(0.0, 300.0, "b");
        t.after(0.0, 100.0, "a");
        t.after(0.0, 300.0, "c");
        t.after(0.0, 1000.0, "later");

        assert!(t.take_due(50.0).is_empty());
        assert_eq!(t.take_due(300.0), vec!["a", "b", "c"]);
        assert_eq!(t.len(), 1);
        assert_eq!(t.take_due(1000.0), vec!["later"]);
        assert!(t.is_empty());
    }
}

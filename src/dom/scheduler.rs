//! Scheduler - Virtual Clock and Timer Queue
//!
//! Stands in for `setTimeout`/`clearTimeout`. Time only moves when the owner
//! calls [`Scheduler::pop_due`], so delayed behavior is deterministic.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle returned by [`Scheduler::schedule`], usable with [`Scheduler::cancel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId {
    due: Duration,
    seq: u64,
}

/// Timer queue ordered by due time, then scheduling order
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<TimerId, T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }

    /// Time elapsed since the page loaded
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once `delay` has elapsed
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let id = TimerId {
            due: self.now + delay,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.queue.insert(id, task);
        id
    }

    /// Cancel a pending timer; returns the task if it had not fired
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.queue.remove(&id)
    }

    /// Pop the next task due at or before `until`, moving the clock to its due time
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let (&id, _) = self.queue.first_key_value()?;
        if id.due > until {
            return None;
        }
        self.now = self.now.max(id.due);
        self.queue.remove(&id)
    }

    /// Move the clock forward without running anything
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Due time of the earliest pending task
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|id| id.due)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler<&'static str>, until: Duration) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some(task) = scheduler.pop_due(until) {
            fired.push(task);
        }
        scheduler.settle(until);
        fired
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::from_millis(300), "remove");
        scheduler.schedule(Duration::from_millis(10), "show");
        scheduler.schedule(Duration::from_millis(10), "second-show");

        assert_eq!(
            drain(&mut scheduler, Duration::from_millis(100)),
            vec!["show", "second-show"]
        );
        assert_eq!(scheduler.now(), Duration::from_millis(100));
        assert_eq!(drain(&mut scheduler, Duration::from_millis(300)), vec!["remove"]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut scheduler = Scheduler::new();
        let first = scheduler.schedule(Duration::from_millis(250), "resize");
        scheduler.cancel(first);
        scheduler.schedule(Duration::from_millis(250), "resize-again");

        assert_eq!(
            drain(&mut scheduler, Duration::from_millis(250)),
            vec!["resize-again"]
        );
    }

    #[test]
    fn test_delays_are_relative_to_now() {
        let mut scheduler = Scheduler::new();
        scheduler.settle(Duration::from_secs(1));
        scheduler.schedule(Duration::from_millis(500), "later");

        assert_eq!(scheduler.next_due(), Some(Duration::from_millis(1500)));
        assert!(drain(&mut scheduler, Duration::from_millis(1400)).is_empty());
    }
}

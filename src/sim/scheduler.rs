//! Deferred events on the simulation clock
//!
//! Events are queued against an internal clock that only moves when
//! [`Scheduler::advance`] is called with the tick's `dt`. Cancelling removes
//! the event's live entry; the stale heap slot is skipped when it surfaces.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

/// Handle returned by [`Scheduler::schedule_after`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: f64,
    id: u64,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // ids are assigned in scheduling order, so they break due-time ties
        self.due
            .total_cmp(&other.due)
            .then_with(|| self.id.cmp(&other.id))
    }
}

#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    now: f64,
    next_id: u64,
    queue: BinaryHeap<Reverse<Pending>>,
    live: HashMap<u64, E>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            queue: BinaryHeap::new(),
            live: HashMap::new(),
        }
    }

    /// Seconds elapsed on this scheduler's clock
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Queue `event` to fire once `delay` seconds of simulation time pass
    pub fn schedule_after(&mut self, delay: f32, event: E) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.queue.push(Reverse(Pending {
            due: self.now + f64::from(delay.max(0.0)),
            id,
        }));
        self.live.insert(id, event);
        TimerHandle(id)
    }

    /// Cancel a pending event. Unknown, fired, or already-cancelled handles are ignored.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.live.remove(&handle.0);
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.live.contains_key(&handle.0)
    }

    /// Number of live (uncancelled, unfired) events
    pub fn pending_count(&self) -> usize {
        self.live.len()
    }

    /// Drop every pending event
    pub fn clear(&mut self) {
        self.queue.clear();
        self.live.clear();
    }

    /// Move the clock forward and return every event now due, earliest first
    pub fn advance(&mut self, dt: f32) -> Vec<E> {
        self.now += f64::from(dt);
        let mut fired = Vec::new();
        while let Some(Reverse(next)) = self.queue.peek().copied() {
            if next.due > self.now {
                break;
            }
            self.queue.pop();
            if let Some(event) = self.live.remove(&next.id) {
                fired.push(event);
            }
        }
        fired
    }
}

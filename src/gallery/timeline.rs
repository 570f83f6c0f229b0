// SPDX-License-Identifier: MPL-2.0
//! Deadline-ordered step queue.
//!
//! The orchestrator never sleeps. It schedules steps with a due time and
//! the owner drains everything that is due with [`Timeline::pop_due`].
//! Steps with the same deadline come out in the order they were scheduled.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Instant;

#[derive(Debug)]
struct Entry<S> {
    due: Instant,
    seq: u64,
    step: S,
}

impl<S> PartialEq for Entry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<S> Eq for Entry<S> {}

impl<S> PartialOrd for Entry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Entry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Min-heap of scheduled steps.
#[derive(Debug)]
pub struct Timeline<S> {
    heap: BinaryHeap<Reverse<Entry<S>>>,
    next_seq: u64,
}

impl<S> Default for Timeline<S> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<S> Timeline<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, step: S) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { due, seq, step }));
    }

    /// Removes and returns the earliest step due at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<(Instant, S)> {
        if self.heap.peek()?.0.due > now {
            return None;
        }
        self.heap.pop().map(|Reverse(entry)| (entry.due, entry.step))
    }

    /// Deadline of the earliest pending step.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse(entry)| entry.due)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drops every pending step.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

//! `DelayQueue`: a fixed-lag, day-slotted FIFO.
//!
//! # Semantics
//!
//! Tracing and isolation do not take effect the day they are decided: a
//! positive test today isolates its owner `lag` days later.  Each queue holds
//! one slot per pending day.  Work decided during a day accumulates into that
//! day's slot, which is pushed to the back; the front slot is the one due
//! today.
//!
//! Between daily cycles the queue always holds exactly `lag` slots.

use std::collections::VecDeque;

use tti_core::NodeId;

/// A queue of `lag` day slots.
#[derive(Clone, Debug)]
pub struct DelayQueue<T> {
    slots: VecDeque<Vec<T>>,
    lag:   usize,
}

impl<T> DelayQueue<T> {
    /// A queue pre-filled with `lag` empty slots.
    pub fn new(lag: usize) -> Self {
        let mut slots = VecDeque::with_capacity(lag + 1);
        slots.extend((0..lag).map(|_| Vec::new()));
        Self { slots, lag }
    }

    pub fn lag(&self) -> usize {
        self.lag
    }

    /// Slots currently queued.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Append a day's slot.
    pub fn push_back(&mut self, slot: Vec<T>) {
        self.slots.push_back(slot);
    }

    /// Remove and return the slot due now.  An empty queue yields an empty
    /// slot.
    pub fn pop_front(&mut self) -> Vec<T> {
        self.slots.pop_front().unwrap_or_default()
    }

    /// The slot due now, without removing it.
    pub fn front(&self) -> &[T] {
        self.slots.front().map_or(&[], Vec::as_slice)
    }

    /// One daily cycle: push today's slot, then pop the slot due today.
    ///
    /// With `lag == 0` today's slot comes straight back; with `lag == L` it
    /// comes back on the `L`-th following call.
    pub fn advance(&mut self, slot: Vec<T>) -> Vec<T> {
        self.push_back(slot);
        self.pop_front()
    }

    /// Total queued items across all slots.
    pub fn pending(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }
}

/// Traced nodes available for testing within a day.
///
/// The tracing [`DelayQueue`] releases one slot per day.  Released slots
/// collect here until a scheduled testing day consumes them; what is left
/// after a testing day is discarded.  Order carries no meaning.
#[derive(Clone, Debug, Default)]
pub struct TracingPool {
    nodes: Vec<NodeId>,
}

impl TracingPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, released: Vec<NodeId>) {
        if self.nodes.is_empty() {
            self.nodes = released;
        } else {
            self.nodes.extend(released);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Take one node from the back of the pool.
    pub fn take(&mut self) -> Option<NodeId> {
        self.nodes.pop()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }
}

//! Priority queues keyed separately from their payload
//!
//! Items with equal priority come out in insertion order, so searches that
//! push neighbors in a fixed direction order stay deterministic.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Heap slot; ordered by `(priority, seq)` only, the value never takes part.
struct Entry<T, P> {
    priority: P,
    seq: u64,
    value: T,
}

impl<T, P: Ord> PartialEq for Entry<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, P: Ord> Eq for Entry<T, P> {}

impl<T, P: Ord> PartialOrd for Entry<T, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, P: Ord> Ord for Entry<T, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Smallest priority first.
pub struct MinHeap<T, P: Ord = i64> {
    heap: BinaryHeap<Reverse<Entry<T, P>>>,
    seq: u64,
}

impl<T, P: Ord> MinHeap<T, P> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            seq: 0,
        }
    }

    pub fn push(&mut self, value: T, priority: P) {
        self.heap.push(Reverse(Entry {
            priority,
            seq: self.seq,
            value,
        }));
        self.seq += 1;
    }

    /// Remove the lowest-priority item, returning it with its priority.
    pub fn pop(&mut self) -> Option<(T, P)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.value, entry.priority))
    }

    pub fn pop_item(&mut self) -> Option<T> {
        self.pop().map(|(value, _)| value)
    }

    pub fn peek(&self) -> Option<(&T, &P)> {
        self.heap
            .peek()
            .map(|Reverse(entry)| (&entry.value, &entry.priority))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T, P: Ord> Default for MinHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> FromIterator<(T, P)> for MinHeap<T, P> {
    fn from_iter<It: IntoIterator<Item = (T, P)>>(iter: It) -> Self {
        let mut heap = Self::new();
        for (value, priority) in iter {
            heap.push(value, priority);
        }
        heap
    }
}

/// Largest priority first.
pub struct MaxHeap<T> {
    inner: MinHeap<T, Reverse<i64>>,
}

impl<T> MaxHeap<T> {
    pub fn new() -> Self {
        Self {
            inner: MinHeap::new(),
        }
    }

    pub fn push(&mut self, value: T, priority: i64) {
        self.inner.push(value, Reverse(priority));
    }

    pub fn pop(&mut self) -> Option<(T, i64)> {
        self.inner.pop().map(|(value, Reverse(p))| (value, p))
    }

    pub fn pop_item(&mut self) -> Option<T> {
        self.inner.pop_item()
    }

    pub fn peek(&self) -> Option<(&T, i64)> {
        self.inner.peek().map(|(value, Reverse(p))| (value, *p))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<T> Default for MaxHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_min_heap_order() {
        let mut heap: MinHeap<&str> = MinHeap::new();
        heap.push("five", 5);
        heap.push("one", 1);
        heap.push("three", 3);

        assert_eq!(heap.peek(), Some((&"one", &1)));
        assert_eq!(heap.pop(), Some(("one", 1)));
        assert_eq!(heap.pop(), Some(("three", 3)));
        assert_eq!(heap.pop(), Some(("five", 5)));
        assert_eq!(heap.pop(), None);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_equal_priorities_pop_in_insertion_order() {
        let mut heap: MinHeap<char> = "abcde".chars().map(|c| (c, 0)).collect();
        heap.push('z', -1);
        let order: String = std::iter::from_fn(|| heap.pop_item()).collect();
        assert_eq!(order, "zabcde");
    }

    #[test]
    fn test_max_heap() {
        let mut heap = MaxHeap::new();
        for (v, p) in [('a', 2), ('b', 9), ('c', 2), ('d', -4)] {
            heap.push(v, p);
        }
        assert_eq!(heap.len(), 4);
        assert_eq!(heap.peek(), Some((&'b', 9)));
        let order: Vec<char> = std::iter::from_fn(|| heap.pop_item()).collect();
        assert_eq!(order, vec!['b', 'a', 'c', 'd']);
    }

    proptest! {
        #[test]
        fn prop_pops_are_non_decreasing(priorities in prop::collection::vec(-1000i64..1000, 0..200)) {
            let mut heap: MinHeap<usize> = priorities.iter().copied().enumerate().collect();
            let mut popped = Vec::new();
            while let Some((idx, p)) = heap.pop() {
                popped.push((p, idx));
            }

            prop_assert_eq!(popped.len(), priorities.len());
            // Sorted by priority, ties by insertion index
            let mut expected = popped.clone();
            expected.sort();
            prop_assert_eq!(popped, expected);
        }
    }
}

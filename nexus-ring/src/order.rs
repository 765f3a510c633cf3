//! Ordering algorithms: the two-way merge primitive, merge sort and
//! monotonic filtering.
//!
//! # Stability
//!
//! The merge takes a node from the second ring only when it strictly
//! precedes the current node of the first ring. Ties therefore always go to
//! the first ring, and merge sort (which merges the front half as the first
//! ring) is stable in both directions.
//!
//! ```
//! use nexus_ring::{Arena, Node, Queue};
//!
//! let mut storage: Arena<Node<(u8, char)>> = Arena::with_capacity(8);
//! let mut queue: Queue<(u8, char), Arena<Node<(u8, char)>>> = Queue::new();
//! for item in [(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')] {
//!     queue.try_push_back(&mut storage, item).unwrap();
//! }
//!
//! // Order by the number only; letters record arrival order
//! queue.sort_by(&mut storage, |a, b| a.0 > b.0);
//! let sorted: Vec<_> = queue.iter(&storage).map(|&(_, c)| c).collect();
//! assert_eq!(sorted, ['a', 'c', 'b', 'd']);
//! ```

use crate::ring::{Node, Ring, node, node_mut};
use crate::{Index, Queue, Storage};

/// Strict "comes first" test for the requested direction.
#[inline]
fn precedes<T: Ord>(descend: bool) -> impl FnMut(&T, &T) -> bool {
    move |a, b| if descend { a > b } else { a < b }
}

impl<Idx: Index> Ring<Idx> {
    /// Merges the sorted ring `other` into this sorted ring in place.
    ///
    /// Both rings must be ordered in the same direction. `other` is left
    /// empty. O(n + m) time, no allocation; nodes are only relinked.
    #[inline]
    pub fn merge<T, S>(&mut self, storage: &mut S, other: &mut Self, descend: bool)
    where
        T: Ord,
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        self.merge_by(storage, other, &mut precedes(descend));
    }

    /// Merge with a custom strict ordering: `precedes(a, b)` returns `true`
    /// when `a` must come before `b`.
    pub fn merge_by<T, S, F>(&mut self, storage: &mut S, other: &mut Self, precedes: &mut F)
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
        F: FnMut(&T, &T) -> bool,
    {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = other.take();
            return;
        }

        let mut left = self.first;
        let mut right = other.first;
        let mut first = Idx::NONE;
        let mut tail = Idx::NONE;

        while left.is_some() && right.is_some() {
            let take_right = precedes(&node(storage, right).data, &node(storage, left).data);
            let key = if take_right {
                let key = right;
                right = node(storage, key).next;
                key
            } else {
                let key = left;
                left = node(storage, key).next;
                key
            };

            if tail.is_none() {
                first = key;
            } else {
                node_mut(storage, tail).next = key;
            }
            node_mut(storage, key).prev = tail;
            tail = key;
        }

        // Exactly one side still has nodes; they are already linked in order.
        let (rest, rest_last) = if left.is_some() {
            (left, self.last)
        } else {
            (right, other.last)
        };
        node_mut(storage, tail).next = rest;
        node_mut(storage, rest).prev = tail;

        self.first = first;
        self.last = rest_last;
        *other = Self::new();
    }

    /// Stable merge sort. O(n log n) time, O(log n) recursion depth.
    #[inline]
    pub fn sort<T, S>(&mut self, storage: &mut S, descend: bool)
    where
        T: Ord,
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        self.sort_by(storage, precedes(descend));
    }

    /// Stable merge sort with a custom strict ordering.
    #[inline]
    pub fn sort_by<T, S, F>(&mut self, storage: &mut S, mut precedes: F)
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
        F: FnMut(&T, &T) -> bool,
    {
        self.merge_sort(storage, &mut precedes);
    }

    fn merge_sort<T, S, F>(&mut self, storage: &mut S, precedes: &mut F)
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
        F: FnMut(&T, &T) -> bool,
    {
        if self.is_empty() || self.is_singular() {
            return;
        }
        let Some(mid) = self.find_mid(storage) else {
            return;
        };

        let mut front = self.split_front(storage, mid);
        front.merge_sort(storage, precedes);
        self.merge_sort(storage, precedes);

        front.merge_by(storage, self, precedes);
        *self = front;
    }

    /// Walks from the back keeping a running extreme. A node survives when
    /// `keep(node, extreme)` holds and then becomes the new extreme;
    /// otherwise it is released. Returns the number of survivors.
    fn retain_from_back<T, S, F>(&mut self, storage: &mut S, mut keep: F) -> usize
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
        F: FnMut(&T, &T) -> bool,
    {
        if self.is_empty() {
            return 0;
        }

        let mut extreme = self.last;
        let mut kept = 1;
        let mut key = node(storage, extreme).prev;
        while key.is_some() {
            let prev = node(storage, key).prev;
            if keep(&node(storage, key).data, &node(storage, extreme).data) {
                extreme = key;
                kept += 1;
            } else {
                drop(self.release(storage, key));
            }
            key = prev;
        }
        kept
    }
}

impl<T, S, Idx: Index> Queue<T, S, Idx>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    /// Stable merge sort with a custom strict ordering: `precedes(a, b)`
    /// returns `true` when `a` must come before `b`.
    pub fn sort_by<F>(&mut self, storage: &mut S, precedes: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.ring.sort_by(storage, precedes);
    }
}

impl<T, S, Idx: Index> Queue<T, S, Idx>
where
    T: Ord,
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    /// Sorts the queue, ascending or descending. Stable.
    pub fn sort(&mut self, storage: &mut S, descend: bool) {
        tracing::trace!(len = self.size(storage), descend, "sorting queue");
        self.ring.sort(storage, descend);
        tracing::trace!(len = self.size(storage), descend, "queue sorted");
    }

    /// Merges the sorted queue `other` into this sorted queue, leaving
    /// `other` empty. On ties this queue's elements come first.
    pub fn merge(&mut self, storage: &mut S, other: &mut Self, descend: bool) {
        tracing::trace!(
            left = self.size(storage),
            right = other.size(storage),
            descend,
            "merging queues"
        );
        self.ring.merge(storage, &mut other.ring, descend);
        tracing::trace!(len = self.size(storage), descend, "queues merged");
    }

    /// Removes every element that has a strictly smaller element somewhere
    /// to its right. The survivors read non-decreasing front to back.
    ///
    /// Returns the number of elements left.
    pub fn ascend(&mut self, storage: &mut S) -> usize {
        self.ring.retain_from_back(storage, |value, min| value <= min)
    }

    /// Removes every element that has a strictly greater element somewhere
    /// to its right. The survivors read non-increasing front to back.
    ///
    /// Returns the number of elements left.
    pub fn descend(&mut self, storage: &mut S) -> usize {
        self.ring.retain_from_back(storage, |value, max| value >= max)
    }
}

//! Structural algorithms: reversal, grouped reversal, pair swap, middle
//! deletion and duplicate collapsing.
//!
//! Everything here rewires links in place. No node is reallocated and no
//! payload is moved between nodes.
//!
//! ```
//! use nexus_ring::{Arena, Node, Queue};
//!
//! let mut storage: Arena<Node<&str>> = Arena::with_capacity(8);
//! let mut queue: Queue<&str, Arena<Node<&str>>> = Queue::new();
//! for s in ["a", "b", "c", "d", "e"] {
//!     queue.try_push_back(&mut storage, s).unwrap();
//! }
//!
//! queue.reverse_k(&mut storage, 2);
//! let order: Vec<_> = queue.iter(&storage).copied().collect();
//! assert_eq!(order, ["b", "a", "d", "c", "e"]);
//!
//! assert_eq!(queue.delete_mid(&mut storage), Ok("d"));
//! ```

use crate::ring::{Node, Ring, node, node_mut};
use crate::{Index, Queue, QueueError, Storage};

impl<Idx: Index> Ring<Idx> {
    /// Reverses traversal order by swapping `next`/`prev` on every node and
    /// on the head.
    pub fn reverse<T, S>(&mut self, storage: &mut S)
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        if self.is_empty() || self.is_singular() {
            return;
        }

        let mut key = self.first;
        while key.is_some() {
            let node = node_mut(storage, key);
            core::mem::swap(&mut node.prev, &mut node.next);
            key = node.prev;
        }
        core::mem::swap(&mut self.first, &mut self.last);
    }

    /// Reverses each complete group of `k` nodes, front to back.
    ///
    /// A trailing group shorter than `k` keeps its order. No-op for
    /// `k <= 1`.
    pub fn reverse_k<T, S>(&mut self, storage: &mut S, k: usize)
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        if k <= 1 || self.is_empty() || self.is_singular() {
            return;
        }

        // Last node of the previous group; NONE is the head.
        let mut tail = Idx::NONE;
        loop {
            let group_first = self.next_of(storage, tail);
            if group_first.is_none() {
                return;
            }

            let mut group_last = group_first;
            for _ in 1..k {
                group_last = node(storage, group_last).next;
                if group_last.is_none() {
                    return;
                }
            }
            let after = node(storage, group_last).next;

            let mut key = group_first;
            loop {
                let node = node_mut(storage, key);
                core::mem::swap(&mut node.prev, &mut node.next);
                if key == group_last {
                    break;
                }
                key = node.prev;
            }

            self.set_next(storage, tail, group_last);
            node_mut(storage, group_last).prev = tail;
            node_mut(storage, group_first).next = after;
            self.set_prev(storage, after, group_first);

            tail = group_first;
        }
    }

    /// Exchanges the positions of each adjacent pair. An unmatched trailing
    /// node stays put.
    pub fn swap_pairs<T, S>(&mut self, storage: &mut S)
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        if self.is_empty() || self.is_singular() {
            return;
        }

        let mut tail = Idx::NONE;
        loop {
            let a = self.next_of(storage, tail);
            if a.is_none() {
                return;
            }
            let b = node(storage, a).next;
            if b.is_none() {
                return;
            }
            let after = node(storage, b).next;

            // tail -> b -> a -> after
            self.set_next(storage, tail, b);
            let nb = node_mut(storage, b);
            nb.prev = tail;
            nb.next = a;
            let na = node_mut(storage, a);
            na.prev = b;
            na.next = after;
            self.set_prev(storage, after, a);

            tail = a;
        }
    }
}

impl<T, S, Idx: Index> Queue<T, S, Idx>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    /// Reverses the queue in place.
    #[inline]
    pub fn reverse(&mut self, storage: &mut S) {
        self.ring.reverse(storage);
    }

    /// Reverses the queue `k` elements at a time; see [`Ring::reverse_k`].
    #[inline]
    pub fn reverse_k(&mut self, storage: &mut S, k: usize) {
        self.ring.reverse_k(storage, k);
    }

    /// Swaps every two adjacent elements by position.
    #[inline]
    pub fn swap_pairs(&mut self, storage: &mut S) {
        self.ring.swap_pairs(storage);
    }

    /// Removes the element at index `n / 2` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Empty`] on an empty queue.
    pub fn delete_mid(&mut self, storage: &mut S) -> Result<T, QueueError> {
        let mid = self.ring.find_mid(storage).ok_or(QueueError::Empty)?;
        Ok(self.ring.release(storage, mid))
    }
}

impl<T, S, Idx: Index> Queue<T, S, Idx>
where
    T: PartialEq,
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    /// Deletes every element whose value equals an adjacent one.
    ///
    /// A value that appears in a run of two or more is removed entirely,
    /// not collapsed to one copy. Meant for sorted queues; on unsorted input
    /// only adjacent runs are affected.
    ///
    /// Returns `false` on an empty queue, `true` otherwise.
    pub fn delete_dup(&mut self, storage: &mut S) -> bool {
        if self.is_empty() {
            return false;
        }

        let mut start = self.ring.first;
        while start.is_some() {
            let mut next = node(storage, start).next;
            let mut run = false;
            while next.is_some() && node(storage, next).data == node(storage, start).data {
                let after = node(storage, next).next;
                drop(self.ring.release(storage, next));
                next = after;
                run = true;
            }
            if run {
                drop(self.ring.release(storage, start));
            }
            start = next;
        }
        true
    }
}

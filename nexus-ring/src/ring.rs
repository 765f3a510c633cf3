//! Sentinel rings over external storage.
//!
//! A [`Ring`] is the head of a circular doubly-linked list whose nodes live in
//! a [`Storage`]. The head itself is not a storage slot: it is a small value
//! holding the first and last node, and the reserved index
//! [`Index::NONE`](crate::Index::NONE) stands for it inside node links.
//!
//! ```text
//!            +--------------------------------------------+
//!            v                                            |
//!   [head: first, last] <-> [a] <-> [b] <-> [c] <-> (NONE == head)
//! ```
//!
//! With that convention every link operation is uniform: "the node after the
//! head" is `ring.first`, "the node before the head" is `ring.last`, and an
//! empty ring is exactly the head pointing at itself (`first == last == NONE`).
//!
//! Because the head is a plain value, cutting a ring in two only needs a new
//! `Ring` on the stack. No slot is allocated and no node moves.
//!
//! # Storage Invariant
//!
//! A ring must always be used with the storage its nodes live in, and a node
//! is linked into at most one ring at a time. Passing a different storage is a
//! caller bug; lookups of keys that are not live nodes panic with
//! "invalid key".

use core::marker::PhantomData;

use crate::{Index, Storage};

/// A node in a ring: the payload plus its two links.
///
/// Links never own anything. `NONE` in either link means the neighbour on
/// that side is the ring's head.
#[derive(Debug)]
pub struct Node<T, Idx: Index = u32> {
    pub(crate) data: T,
    pub(crate) prev: Idx,
    pub(crate) next: Idx,
}

impl<T, Idx: Index> Node<T, Idx> {
    /// Creates a detached node.
    #[inline]
    pub fn new(data: T) -> Self {
        Self {
            data,
            prev: Idx::NONE,
            next: Idx::NONE,
        }
    }

    /// Returns the payload.
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consumes the node, returning the payload.
    #[inline]
    pub fn into_data(self) -> T {
        self.data
    }
}

#[cold]
#[inline(never)]
fn invalid_key<Idx: Index>(key: Idx) -> ! {
    panic!("invalid key {key:?}: not a live node in this storage")
}

/// Looks up a node that the ring invariant says must exist.
#[inline]
pub(crate) fn node<T, Idx, S>(storage: &S, key: Idx) -> &Node<T, Idx>
where
    Idx: Index,
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    match storage.get(key) {
        Some(node) => node,
        None => invalid_key(key),
    }
}

#[inline]
pub(crate) fn node_mut<T, Idx, S>(storage: &mut S, key: Idx) -> &mut Node<T, Idx>
where
    Idx: Index,
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    match storage.get_mut(key) {
        Some(node) => node,
        None => invalid_key(key),
    }
}

/// The head of a circular doubly-linked list.
///
/// Never carries a payload. Neither `Clone` nor `Copy`: every node belongs
/// to exactly one ring.
#[derive(Debug, PartialEq, Eq)]
pub struct Ring<Idx: Index = u32> {
    pub(crate) first: Idx,
    pub(crate) last: Idx,
}

impl<Idx: Index> Default for Ring<Idx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Idx: Index> Ring<Idx> {
    /// Creates an empty ring: the head links to itself.
    #[inline]
    pub const fn new() -> Self {
        Self {
            first: Idx::NONE,
            last: Idx::NONE,
        }
    }

    /// Returns `true` if the head links to itself.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Returns `true` if exactly one node sits between the two ends.
    #[inline]
    pub fn is_singular(&self) -> bool {
        self.first.is_some() && self.first == self.last
    }

    /// Key of the node after the head.
    #[inline]
    pub fn first(&self) -> Option<Idx> {
        if self.first.is_none() { None } else { Some(self.first) }
    }

    /// Key of the node before the head.
    #[inline]
    pub fn last(&self) -> Option<Idx> {
        if self.last.is_none() { None } else { Some(self.last) }
    }

    /// Detaches every node from this head, returning the old head.
    ///
    /// `self` is left empty. The nodes are untouched and now belong to the
    /// returned ring.
    #[inline]
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    // ========================================================================
    // Navigation (NONE == head)
    // ========================================================================

    /// Position after `at`. `at == NONE` means the head.
    #[inline]
    pub fn next_of<T, S>(&self, storage: &S, at: Idx) -> Idx
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        if at.is_none() {
            self.first
        } else {
            node(storage, at).next
        }
    }

    /// Position before `at`. `at == NONE` means the head.
    #[inline]
    pub fn prev_of<T, S>(&self, storage: &S, at: Idx) -> Idx
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        if at.is_none() {
            self.last
        } else {
            node(storage, at).prev
        }
    }

    #[inline]
    pub(crate) fn set_next<T, S>(&mut self, storage: &mut S, at: Idx, next: Idx)
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        if at.is_none() {
            self.first = next;
        } else {
            node_mut(storage, at).next = next;
        }
    }

    #[inline]
    pub(crate) fn set_prev<T, S>(&mut self, storage: &mut S, at: Idx, prev: Idx)
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        if at.is_none() {
            self.last = prev;
        } else {
            node_mut(storage, at).prev = prev;
        }
    }

    // ========================================================================
    // Link operations (relink only, no alloc/dealloc)
    // ========================================================================

    /// Links a detached node right after position `at` (`NONE` = head).
    ///
    /// # Panics
    ///
    /// Panics if `key` or `at` is not a live node in `storage`.
    #[inline]
    pub fn link_after<T, S>(&mut self, storage: &mut S, at: Idx, key: Idx)
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        let next = self.next_of(storage, at);
        let node = node_mut(storage, key);
        node.prev = at;
        node.next = next;
        self.set_next(storage, at, key);
        self.set_prev(storage, next, key);
    }

    /// Links a detached node right before position `at` (`NONE` = head).
    #[inline]
    pub fn link_before<T, S>(&mut self, storage: &mut S, at: Idx, key: Idx)
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        let prev = self.prev_of(storage, at);
        self.link_after(storage, prev, key);
    }

    /// Links a detached node right after the head.
    #[inline]
    pub fn link_front<T, S>(&mut self, storage: &mut S, key: Idx)
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        self.link_after(storage, Idx::NONE, key);
    }

    /// Links a detached node right before the head.
    #[inline]
    pub fn link_back<T, S>(&mut self, storage: &mut S, key: Idx)
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        self.link_before(storage, Idx::NONE, key);
    }

    /// Detaches `key` from this ring in O(1). The node stays in storage with
    /// both links reset.
    ///
    /// `key` must be linked into this ring.
    #[inline]
    pub fn unlink<T, S>(&mut self, storage: &mut S, key: Idx)
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        let node = node_mut(storage, key);
        let prev = core::mem::replace(&mut node.prev, Idx::NONE);
        let next = core::mem::replace(&mut node.next, Idx::NONE);
        self.set_next(storage, prev, next);
        self.set_prev(storage, next, prev);
    }

    /// Detaches `key` and releases its slot, returning the payload.
    #[inline]
    pub fn release<T, S>(&mut self, storage: &mut S, key: Idx) -> T
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        self.unlink(storage, key);
        match storage.remove(key) {
            Some(node) => node.data,
            None => invalid_key(key),
        }
    }

    /// Releases every node. Each node's successor is read before the node
    /// is freed.
    pub fn clear<T, S>(&mut self, storage: &mut S)
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        let mut key = self.first;
        while key.is_some() {
            key = match storage.remove(key) {
                Some(node) => node.next,
                None => invalid_key(key),
            };
        }
        *self = Self::new();
    }

    /// Splices all of `other` after this ring's last node in O(1).
    ///
    /// `other` is left empty.
    #[inline]
    pub fn append<T, S>(&mut self, storage: &mut S, other: &mut Self)
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = other.take();
            return;
        }

        node_mut(storage, self.last).next = other.first;
        node_mut(storage, other.first).prev = self.last;
        self.last = other.last;
        *other = Self::new();
    }

    /// Cuts the ring in front of `at`.
    ///
    /// Every node from the first up to (not including) `at` moves to the
    /// returned ring; `self` keeps `at` and everything after it. Cutting in
    /// front of the first node returns an empty ring.
    ///
    /// `at` must be linked into this ring.
    pub fn split_front<T, S>(&mut self, storage: &mut S, at: Idx) -> Self
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        let before = node(storage, at).prev;
        if before.is_none() {
            return Self::new();
        }

        let front = Self {
            first: self.first,
            last: before,
        };
        node_mut(storage, before).next = Idx::NONE;
        node_mut(storage, at).prev = Idx::NONE;
        self.first = at;
        front
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Locates the middle node.
    ///
    /// `slow` advances one step and `fast` two, both from the first node,
    /// until `fast` reaches the head or the node before it. For `n` nodes
    /// this is the node at zero-based index `n / 2` (the upper middle when
    /// `n` is even). Returns `None` on an empty ring.
    pub fn find_mid<T, S>(&self, storage: &S) -> Option<Idx>
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        if self.is_empty() {
            return None;
        }

        let mut slow = self.first;
        let mut fast = self.first;
        while fast.is_some() {
            let ahead = node(storage, fast).next;
            if ahead.is_none() {
                break;
            }
            slow = node(storage, slow).next;
            fast = node(storage, ahead).next;
        }
        Some(slow)
    }

    /// Counts nodes by walking the ring once.
    pub fn count<T, S>(&self, storage: &S) -> usize
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        let mut len = 0;
        let mut key = self.first;
        while key.is_some() {
            len += 1;
            key = node(storage, key).next;
        }
        len
    }

    /// Checks the link invariant: walking forward from the head reaches the
    /// last node and returns to the head, and every node's `prev` names the
    /// node it was reached from.
    ///
    /// Gives up (returns `false`) after visiting more nodes than `storage`
    /// holds, so a corrupted cycle cannot hang the check.
    pub fn is_well_formed<T, S>(&self, storage: &S) -> bool
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        if self.first.is_none() || self.last.is_none() {
            return self.first.is_none() && self.last.is_none();
        }

        let mut prev = Idx::NONE;
        let mut key = self.first;
        let mut budget = storage.len();
        while key.is_some() {
            if budget == 0 {
                return false;
            }
            budget -= 1;

            let Some(node) = storage.get(key) else {
                return false;
            };
            if node.prev != prev {
                return false;
            }
            prev = key;
            key = node.next;
        }
        prev == self.last
    }

    /// Iterates payloads front to back.
    #[inline]
    pub fn iter<'a, T, S>(&self, storage: &'a S) -> Iter<'a, T, S, Idx>
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        Iter {
            storage,
            front: self.first,
            back: self.last,
            _marker: PhantomData,
        }
    }

    /// Iterates node keys front to back.
    #[inline]
    pub fn keys<'a, T, S>(&self, storage: &'a S) -> Keys<'a, T, S, Idx>
    where
        S: Storage<Node<T, Idx>, Index = Idx>,
    {
        Keys {
            storage,
            front: self.first,
            back: self.last,
            _marker: PhantomData,
        }
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to ring payloads.
pub struct Iter<'a, T, S, Idx: Index> {
    storage: &'a S,
    front: Idx,
    back: Idx,
    _marker: PhantomData<T>,
}

impl<'a, T: 'a, S, Idx: Index + 'a> Iterator for Iter<'a, T, S, Idx>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front.is_none() {
            return None;
        }

        let node = node(self.storage, self.front);

        // Met in the middle
        if self.front == self.back {
            self.front = Idx::NONE;
            self.back = Idx::NONE;
        } else {
            self.front = node.next;
        }

        Some(&node.data)
    }
}

impl<'a, T: 'a, S, Idx: Index + 'a> DoubleEndedIterator for Iter<'a, T, S, Idx>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back.is_none() {
            return None;
        }

        let node = node(self.storage, self.back);

        if self.front == self.back {
            self.front = Idx::NONE;
            self.back = Idx::NONE;
        } else {
            self.back = node.prev;
        }

        Some(&node.data)
    }
}

/// Iterator over node keys.
pub struct Keys<'a, T, S, Idx: Index> {
    storage: &'a S,
    front: Idx,
    back: Idx,
    _marker: PhantomData<T>,
}

impl<'a, T, S, Idx: Index> Iterator for Keys<'a, T, S, Idx>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    type Item = Idx;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front.is_none() {
            return None;
        }

        let key = self.front;
        if self.front == self.back {
            self.front = Idx::NONE;
            self.back = Idx::NONE;
        } else {
            self.front = node(self.storage, key).next;
        }

        Some(key)
    }
}

impl<'a, T, S, Idx: Index> DoubleEndedIterator for Keys<'a, T, S, Idx>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back.is_none() {
            return None;
        }

        let key = self.back;
        if self.front == self.back {
            self.front = Idx::NONE;
            self.back = Idx::NONE;
        } else {
            self.back = node(self.storage, key).prev;
        }

        Some(key)
    }
}

//! OwnedQueue - a queue that owns its storage.

use crate::{Arena, BoundedStorage, Full, Index, Iter, Node, Queue, QueueError};

/// A queue that owns its storage.
///
/// Convenience wrapper around [`Queue`] + [`Arena`] for cases where the queue
/// never shares a pool or splices nodes with another queue. Dropping it drops
/// every element.
///
/// # Example
///
/// ```
/// use nexus_ring::OwnedQueue;
///
/// let mut queue: OwnedQueue<&str> = OwnedQueue::with_capacity(8);
/// for value in ["c", "a", "b", "a"] {
///     queue.try_push_back(value).unwrap();
/// }
///
/// queue.sort(false);
/// assert!(queue.delete_dup());
/// assert_eq!(queue.iter().copied().collect::<Vec<_>>(), ["b", "c"]);
/// ```
pub struct OwnedQueue<T, Idx: Index = u32> {
    storage: Arena<Node<T, Idx>, Idx>,
    queue: Queue<T, Arena<Node<T, Idx>, Idx>, Idx>,
}

impl<T, Idx: Index> OwnedQueue<T, Idx> {
    /// Creates an empty queue with room for `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or exceeds the index type's range.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Arena::with_capacity(capacity),
            queue: Queue::new(),
        }
    }

    /// Number of elements. O(n).
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.size(&self.storage)
    }

    /// Returns `true` if the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns `true` if the queue holds exactly one element.
    #[inline]
    pub fn is_singular(&self) -> bool {
        self.queue.is_singular()
    }

    /// Returns the storage capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Pushes a value to the front.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage is full.
    #[inline]
    pub fn try_push_front(&mut self, value: T) -> Result<Idx, Full<T>> {
        self.queue.try_push_front(&mut self.storage, value)
    }

    /// Pushes a value to the back.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage is full.
    #[inline]
    pub fn try_push_back(&mut self, value: T) -> Result<Idx, Full<T>> {
        self.queue.try_push_back(&mut self.storage, value)
    }

    /// Removes and returns the front element.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        self.queue.pop_front(&mut self.storage)
    }

    /// Removes and returns the back element.
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        self.queue.pop_back(&mut self.storage)
    }

    /// Removes the element at `key`.
    #[inline]
    pub fn remove(&mut self, key: Idx) -> Option<T> {
        self.queue.remove(&mut self.storage, key)
    }

    /// Returns the element at `key`.
    #[inline]
    pub fn get(&self, key: Idx) -> Option<&T> {
        self.queue.get(&self.storage, key)
    }

    /// Returns the front element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.queue.front(&self.storage)
    }

    /// Returns the back element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.queue.back(&self.storage)
    }

    /// Iterates front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, Arena<Node<T, Idx>, Idx>, Idx> {
        self.queue.iter(&self.storage)
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.queue.ring.clear(&mut self.storage);
    }

    /// Reverses the element order in place.
    #[inline]
    pub fn reverse(&mut self) {
        self.queue.reverse(&mut self.storage);
    }

    /// Reverses each consecutive group of `k` elements.
    #[inline]
    pub fn reverse_k(&mut self, k: usize) {
        self.queue.reverse_k(&mut self.storage, k);
    }

    /// Swaps every two adjacent elements.
    #[inline]
    pub fn swap_pairs(&mut self) {
        self.queue.swap_pairs(&mut self.storage);
    }

    /// Removes and returns the middle element.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Empty`] if the queue is empty.
    #[inline]
    pub fn delete_mid(&mut self) -> Result<T, QueueError> {
        self.queue.delete_mid(&mut self.storage)
    }
}

impl<T: AsRef<[u8]>, Idx: Index> OwnedQueue<T, Idx> {
    /// Removes the front element, copying it into `buf` truncated and
    /// NUL-terminated.
    #[inline]
    pub fn pop_front_into(&mut self, buf: &mut [u8]) -> Option<T> {
        self.queue.pop_front_into(&mut self.storage, buf)
    }

    /// Removes the back element, copying it into `buf` truncated and
    /// NUL-terminated.
    #[inline]
    pub fn pop_back_into(&mut self, buf: &mut [u8]) -> Option<T> {
        self.queue.pop_back_into(&mut self.storage, buf)
    }
}

impl<T: PartialEq, Idx: Index> OwnedQueue<T, Idx> {
    /// Drops every run of adjacent equal elements.
    ///
    /// Returns `false` only if the queue is empty.
    #[inline]
    pub fn delete_dup(&mut self) -> bool {
        self.queue.delete_dup(&mut self.storage)
    }
}

impl<T: Ord, Idx: Index> OwnedQueue<T, Idx> {
    /// Stable merge sort.
    #[inline]
    pub fn sort(&mut self, descend: bool) {
        self.queue.sort(&mut self.storage, descend);
    }

    /// Keeps elements no greater than everything after them.
    #[inline]
    pub fn ascend(&mut self) -> usize {
        self.queue.ascend(&mut self.storage)
    }

    /// Keeps elements no less than everything after them.
    #[inline]
    pub fn descend(&mut self) -> usize {
        self.queue.descend(&mut self.storage)
    }
}

impl<T: core::fmt::Debug, Idx: Index> core::fmt::Debug for OwnedQueue<T, Idx> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

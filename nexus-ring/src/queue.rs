//! Queues: a sentinel ring plus the lifecycle and end operations.
//!
//! A [`Queue`] owns the nodes linked into its ring. The nodes themselves live
//! in caller-provided storage, so several queues can share one pool and
//! splice nodes between each other without reallocating.
//!
//! # Example
//!
//! ```
//! use nexus_ring::{Arena, Node, Queue};
//!
//! let mut storage: Arena<Node<String>> = Arena::with_capacity(16);
//! let mut queue: Queue<String, Arena<Node<String>>> = Queue::new();
//!
//! queue.try_push_back(&mut storage, "b".into()).unwrap();
//! queue.try_push_front(&mut storage, "a".into()).unwrap();
//! queue.try_push_back(&mut storage, "c".into()).unwrap();
//! assert_eq!(queue.size(&storage), 3);
//!
//! assert_eq!(queue.pop_front(&mut storage).as_deref(), Some("a"));
//! assert_eq!(queue.pop_back(&mut storage).as_deref(), Some("c"));
//!
//! queue.destroy(&mut storage);
//! assert_eq!(storage.len(), 0);
//! # use nexus_ring::Storage;
//! ```
//!
//! # Bounded Copy-Out
//!
//! For byte-like payloads, [`pop_front_into`](Queue::pop_front_into) and
//! [`pop_back_into`](Queue::pop_back_into) also copy the payload into a caller
//! buffer, truncated to `buf.len() - 1` bytes and NUL-terminated:
//!
//! ```
//! use nexus_ring::{Arena, Node, Queue};
//!
//! let mut storage: Arena<Node<String>> = Arena::with_capacity(4);
//! let mut queue: Queue<String, Arena<Node<String>>> = Queue::new();
//! queue.try_push_back(&mut storage, "gerbil".into()).unwrap();
//!
//! let mut buf = [0xffu8; 4];
//! let value = queue.pop_front_into(&mut storage, &mut buf).unwrap();
//! assert_eq!(value, "gerbil");
//! assert_eq!(&buf, b"ger\0");
//! ```

use core::marker::PhantomData;

use crate::ring::{Iter, Keys, Node, Ring};
use crate::{BoundedStorage, Full, Index, Storage, UnboundedStorage};

/// A queue over external storage.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `S`: Storage type (e.g., [`Arena<Node<T>>`](crate::Arena))
/// - `Idx`: Index type (default `u32`)
///
/// A queue has no `Drop`: it cannot reach its storage on its own. Release it
/// with [`destroy`](Queue::destroy), or use [`OwnedQueue`](crate::OwnedQueue).
#[derive(Debug)]
pub struct Queue<T, S, Idx: Index = u32>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    pub(crate) ring: Ring<Idx>,
    _marker: PhantomData<(T, S)>,
}

impl<T, S, Idx: Index> Default for Queue<T, S, Idx>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Base impl - works with any Storage
// =============================================================================

impl<T, S, Idx: Index> Queue<T, S, Idx>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    /// Creates an empty queue.
    #[inline]
    pub const fn new() -> Self {
        Self {
            ring: Ring::new(),
            _marker: PhantomData,
        }
    }

    /// Wraps an existing ring. The queue takes ownership of its nodes.
    #[inline]
    pub fn from_ring(ring: Ring<Idx>) -> Self {
        Self {
            ring,
            _marker: PhantomData,
        }
    }

    /// Unwraps the queue, handing its nodes to the returned ring.
    #[inline]
    pub fn into_ring(self) -> Ring<Idx> {
        self.ring
    }

    /// Read access to the underlying ring.
    #[inline]
    pub fn ring(&self) -> &Ring<Idx> {
        &self.ring
    }

    /// Releases every element, then the queue itself.
    pub fn destroy(mut self, storage: &mut S) {
        self.ring.clear(storage);
    }

    /// Returns `true` if the queue holds no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns `true` if the queue holds exactly one element.
    #[inline]
    pub fn is_singular(&self) -> bool {
        self.ring.is_singular()
    }

    /// Number of elements, counted by walking the ring.
    ///
    /// O(n). Lengths are not cached because splicing algorithms move runs of
    /// unknown length between rings.
    #[inline]
    pub fn size(&self, storage: &S) -> usize {
        self.ring.count(storage)
    }

    // ========================================================================
    // Removal at the ends
    // ========================================================================

    /// Removes and returns the front element.
    ///
    /// Returns `None` if the queue is empty.
    #[inline]
    pub fn pop_front(&mut self, storage: &mut S) -> Option<T> {
        let key = self.ring.first()?;
        Some(self.ring.release(storage, key))
    }

    /// Removes and returns the back element.
    ///
    /// Returns `None` if the queue is empty.
    #[inline]
    pub fn pop_back(&mut self, storage: &mut S) -> Option<T> {
        let key = self.ring.last()?;
        Some(self.ring.release(storage, key))
    }

    /// Removes an element by key.
    ///
    /// Returns `None` if `key` is not a live node. `key` must belong to this
    /// queue.
    #[inline]
    pub fn remove(&mut self, storage: &mut S, key: Idx) -> Option<T> {
        storage.get(key)?;
        Some(self.ring.release(storage, key))
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a reference to the element at `key`.
    #[inline]
    pub fn get<'a>(&self, storage: &'a S, key: Idx) -> Option<&'a T>
    where
        Idx: 'a,
    {
        storage.get(key).map(Node::data)
    }

    /// Returns a reference to the front element.
    #[inline]
    pub fn front<'a>(&self, storage: &'a S) -> Option<&'a T>
    where
        Idx: 'a,
    {
        self.get(storage, self.ring.first()?)
    }

    /// Returns a reference to the back element.
    #[inline]
    pub fn back<'a>(&self, storage: &'a S) -> Option<&'a T>
    where
        Idx: 'a,
    {
        self.get(storage, self.ring.last()?)
    }

    /// Key of the front element.
    #[inline]
    pub fn front_key(&self) -> Option<Idx> {
        self.ring.first()
    }

    /// Key of the back element.
    #[inline]
    pub fn back_key(&self) -> Option<Idx> {
        self.ring.last()
    }

    /// Iterates elements front to back.
    #[inline]
    pub fn iter<'a>(&self, storage: &'a S) -> Iter<'a, T, S, Idx> {
        self.ring.iter(storage)
    }

    /// Iterates element keys front to back.
    #[inline]
    pub fn keys<'a>(&self, storage: &'a S) -> Keys<'a, T, S, Idx> {
        self.ring.keys(storage)
    }

    // ========================================================================
    // Splicing
    // ========================================================================

    /// Moves every element of `other` behind this queue's back in O(1).
    ///
    /// `other` is left empty.
    #[inline]
    pub fn append(&mut self, storage: &mut S, other: &mut Self) {
        self.ring.append(storage, &mut other.ring);
    }
}

// =============================================================================
// Bounded copy-out
// =============================================================================

impl<T, S, Idx: Index> Queue<T, S, Idx>
where
    T: AsRef<[u8]>,
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    /// Removes the front element, copying its bytes into `buf`.
    ///
    /// At most `buf.len() - 1` bytes are copied, the byte after them is set to
    /// `0`, and the rest of `buf` is zeroed. Nothing is written past
    /// `buf.len()`; an empty `buf` is left alone. Ownership of the element
    /// passes to the caller either way.
    #[inline]
    pub fn pop_front_into(&mut self, storage: &mut S, buf: &mut [u8]) -> Option<T> {
        let value = self.pop_front(storage)?;
        copy_truncated(value.as_ref(), buf);
        Some(value)
    }

    /// Removes the back element, copying its bytes into `buf`.
    ///
    /// Same truncation contract as [`pop_front_into`](Queue::pop_front_into).
    #[inline]
    pub fn pop_back_into(&mut self, storage: &mut S, buf: &mut [u8]) -> Option<T> {
        let value = self.pop_back(storage)?;
        copy_truncated(value.as_ref(), buf);
        Some(value)
    }
}

/// Copies `src` into `dst` with terminator truncation.
pub(crate) fn copy_truncated(src: &[u8], dst: &mut [u8]) {
    let Some(room) = dst.len().checked_sub(1) else {
        return;
    };
    let n = src.len().min(room);
    dst[..n].copy_from_slice(&src[..n]);
    dst[n..].fill(0);
}

// =============================================================================
// Bounded storage impl - fallible insertion
// =============================================================================

impl<T, S, Idx: Index> Queue<T, S, Idx>
where
    S: BoundedStorage<Node<T, Idx>, Index = Idx>,
{
    /// Pushes a value to the front of the queue.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage is full. The queue is unchanged.
    #[inline]
    pub fn try_push_front(&mut self, storage: &mut S, value: T) -> Result<Idx, Full<T>> {
        let key = Self::try_alloc(storage, value)?;
        self.ring.link_front(storage, key);
        Ok(key)
    }

    /// Pushes a value to the back of the queue.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage is full. The queue is unchanged.
    #[inline]
    pub fn try_push_back(&mut self, storage: &mut S, value: T) -> Result<Idx, Full<T>> {
        let key = Self::try_alloc(storage, value)?;
        self.ring.link_back(storage, key);
        Ok(key)
    }

    #[inline]
    fn try_alloc(storage: &mut S, value: T) -> Result<Idx, Full<T>> {
        storage.try_insert(Node::new(value)).map_err(|full| {
            tracing::debug!(capacity = storage.capacity(), "push rejected: storage full");
            Full(full.into_inner().into_data())
        })
    }
}

// =============================================================================
// Unbounded storage impl - infallible insertion
// =============================================================================

impl<T, S, Idx: Index> Queue<T, S, Idx>
where
    S: UnboundedStorage<Node<T, Idx>, Index = Idx>,
{
    /// Pushes a value to the front of the queue.
    #[inline]
    pub fn push_front(&mut self, storage: &mut S, value: T) -> Idx {
        let key = storage.insert(Node::new(value));
        self.ring.link_front(storage, key);
        key
    }

    /// Pushes a value to the back of the queue.
    #[inline]
    pub fn push_back(&mut self, storage: &mut S, value: T) -> Idx {
        let key = storage.insert(Node::new(value));
        self.ring.link_back(storage, key);
        key
    }
}

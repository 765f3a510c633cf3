//! Chains of queues and k-way merge.
//!
//! A [`Chain`] is a second ring whose payloads are [`Context`]s: one queue
//! plus its cached element count. The chain lives in its own storage, apart
//! from the elements' storage, and only links queues together for as long
//! as the caller needs them folded.
//!
//! # Example
//!
//! ```
//! use nexus_ring::{Arena, Chain, ChainStorage, Node, Queue};
//!
//! type Elems = Arena<Node<&'static str>>;
//!
//! let mut storage: Elems = Arena::with_capacity(16);
//! let mut contexts: ChainStorage<&'static str, Elems> = Arena::with_capacity(4);
//! let mut chain: Chain<&'static str, Elems, ChainStorage<&'static str, Elems>> = Chain::new();
//!
//! for value in ["3", "1", "2"] {
//!     let mut queue = Queue::new();
//!     queue.try_push_back(&mut storage, value).unwrap();
//!     chain.try_push_back(&mut contexts, &storage, queue).unwrap();
//! }
//!
//! assert_eq!(chain.merge(&mut contexts, &mut storage, false), 3);
//!
//! let merged = chain.first_queue(&contexts).unwrap();
//! let order: Vec<_> = merged.iter(&storage).copied().collect();
//! assert_eq!(order, ["1", "2", "3"]);
//!
//! chain.destroy(&mut contexts, &mut storage);
//! ```

use core::marker::PhantomData;

use crate::ring::{Iter, Node, Ring, node, node_mut};
use crate::{Arena, BoundedStorage, Full, Index, Queue, Storage, UnboundedStorage};

/// Bounded storage for chain contexts.
pub type ChainStorage<T, S, Idx = u32> = Arena<Node<Context<T, S, Idx>, Idx>, Idx>;

/// One queue in a chain, with its cached element count.
#[derive(Debug)]
pub struct Context<T, S, Idx: Index = u32>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    queue: Queue<T, S, Idx>,
    size: usize,
}

impl<T, S, Idx: Index> Context<T, S, Idx>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
{
    /// The queue this context wraps.
    #[inline]
    pub fn queue(&self) -> &Queue<T, S, Idx> {
        &self.queue
    }

    /// Cached element count. Kept current by [`Chain::merge`].
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Unwraps the queue.
    #[inline]
    pub fn into_queue(self) -> Queue<T, S, Idx> {
        self.queue
    }
}

/// A ring of queue contexts.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `S`: Element storage
/// - `C`: Context storage (e.g., [`ChainStorage<T, S>`])
/// - `Idx`: Index type shared by both storages
///
/// Like [`Queue`], a chain has no `Drop`; release it with
/// [`destroy`](Chain::destroy).
#[derive(Debug)]
pub struct Chain<T, S, C, Idx: Index = u32>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
    C: Storage<Node<Context<T, S, Idx>, Idx>, Index = Idx>,
{
    ring: Ring<Idx>,
    _marker: PhantomData<(T, S, C)>,
}

impl<T, S, C, Idx: Index> Default for Chain<T, S, C, Idx>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
    C: Storage<Node<Context<T, S, Idx>, Idx>, Index = Idx>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S, C, Idx: Index> Chain<T, S, C, Idx>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
    C: Storage<Node<Context<T, S, Idx>, Idx>, Index = Idx>,
{
    /// Creates an empty chain.
    #[inline]
    pub const fn new() -> Self {
        Self {
            ring: Ring::new(),
            _marker: PhantomData,
        }
    }

    /// Returns `true` if no queue is linked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Number of linked queues. O(n).
    #[inline]
    pub fn len(&self, contexts: &C) -> usize {
        self.ring.count(contexts)
    }

    /// The first context, which holds the result after a merge.
    #[inline]
    pub fn first<'a>(&self, contexts: &'a C) -> Option<&'a Context<T, S, Idx>> {
        let key = self.ring.first()?;
        Some(&node(contexts, key).data)
    }

    /// The first queue, which holds the result after a merge.
    #[inline]
    pub fn first_queue<'a>(&self, contexts: &'a C) -> Option<&'a Queue<T, S, Idx>> {
        let key = self.ring.first()?;
        Some(&node(contexts, key).data.queue)
    }

    /// Iterates contexts front to back.
    #[inline]
    pub fn contexts<'a>(&self, contexts: &'a C) -> Iter<'a, Context<T, S, Idx>, C, Idx> {
        self.ring.iter(contexts)
    }

    /// Unlinks the first context and hands it to the caller.
    #[inline]
    pub fn pop_front(&mut self, contexts: &mut C) -> Option<Context<T, S, Idx>> {
        let key = self.ring.first()?;
        Some(self.ring.release(contexts, key))
    }

    /// Releases every context and destroys every queue.
    pub fn destroy(mut self, contexts: &mut C, storage: &mut S) {
        while let Some(context) = self.pop_front(contexts) {
            context.queue.destroy(storage);
        }
    }
}

impl<T, S, C, Idx: Index> Chain<T, S, C, Idx>
where
    T: Ord,
    S: Storage<Node<T, Idx>, Index = Idx>,
    C: Storage<Node<Context<T, S, Idx>, Idx>, Index = Idx>,
{
    /// Merges every queue of the chain into the first one.
    ///
    /// Each queue must already be sorted in the direction given by
    /// `descend`. The chain is halved recursively by its midpoint, each half
    /// is folded into its first queue, and the two results are merged with
    /// [`Ring::merge`]. Afterwards the first context holds every element and
    /// the sum of the cached sizes; every other context holds an empty queue
    /// and a size of 0. The contexts stay linked in their original order.
    ///
    /// Elements of earlier queues come first among equals.
    ///
    /// Returns the total element count, 0 for an empty chain, and the cached
    /// size unchanged for a single-queue chain.
    pub fn merge(&mut self, contexts: &mut C, storage: &mut S, descend: bool) -> usize {
        tracing::trace!(queues = self.len(contexts), descend, "k-way merge");
        let total = Self::merge_ring(&mut self.ring, contexts, storage, descend);
        tracing::trace!(total, descend, "k-way merge complete");
        total
    }

    fn merge_ring(chain: &mut Ring<Idx>, contexts: &mut C, storage: &mut S, descend: bool) -> usize {
        if chain.is_empty() {
            return 0;
        }
        if chain.is_singular() {
            return node(contexts, chain.first).data.size;
        }
        let Some(mid) = chain.find_mid(contexts) else {
            return 0;
        };

        let mut front = chain.split_front(contexts, mid);
        Self::merge_ring(&mut front, contexts, storage, descend);
        Self::merge_ring(chain, contexts, storage, descend);

        // Both halves hold at least one context
        let donor = &mut node_mut(contexts, chain.first).data;
        let mut moved = donor.queue.ring.take();
        let moved_size = core::mem::replace(&mut donor.size, 0);

        let keeper = &mut node_mut(contexts, front.first).data;
        keeper.queue.ring.merge(storage, &mut moved, descend);
        keeper.size += moved_size;
        let total = keeper.size;

        front.append(contexts, chain);
        *chain = front;
        total
    }
}

impl<T, S, C, Idx: Index> Chain<T, S, C, Idx>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
    C: BoundedStorage<Node<Context<T, S, Idx>, Idx>, Index = Idx>,
{
    /// Links `queue` at the back of the chain, caching its current size.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(queue))` if context storage is full. The chain is
    /// unchanged and the queue is handed back.
    pub fn try_push_back(
        &mut self,
        contexts: &mut C,
        storage: &S,
        queue: Queue<T, S, Idx>,
    ) -> Result<Idx, Full<Queue<T, S, Idx>>> {
        let size = queue.size(storage);
        let key = contexts
            .try_insert(Node::new(Context { queue, size }))
            .map_err(|full| {
                tracing::debug!(capacity = contexts.capacity(), "chain push rejected: storage full");
                Full(full.into_inner().into_data().queue)
            })?;
        self.ring.link_back(contexts, key);
        Ok(key)
    }
}

impl<T, S, C, Idx: Index> Chain<T, S, C, Idx>
where
    S: Storage<Node<T, Idx>, Index = Idx>,
    C: UnboundedStorage<Node<Context<T, S, Idx>, Idx>, Index = Idx>,
{
    /// Links `queue` at the back of the chain, caching its current size.
    pub fn push_back(&mut self, contexts: &mut C, storage: &S, queue: Queue<T, S, Idx>) -> Idx {
        let size = queue.size(storage);
        let key = contexts.insert(Node::new(Context { queue, size }));
        self.ring.link_back(contexts, key);
        key
    }
}

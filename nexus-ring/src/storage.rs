//! Storage for ring nodes.
//!
//! Storage hands out stable indices: an index stays valid until its value is
//! removed, and removed slots are reused by later inserts. Rings link nodes by
//! these indices instead of by pointers, so splicing a run between rings never
//! moves or reallocates a node.

use crate::Index;

/// Slab-like storage with stable indices.
///
/// # Requirements
///
/// - **Stable indices**: an index remains valid until explicitly removed
/// - **O(1)** insert, remove, get
/// - **Slot reuse**: removed slots can be handed out again
///
/// # Implementations
///
/// - [`Arena`] - fixed capacity, allocated once up front (this crate)
/// - `slab::Slab<T>` - growable (feature `slab`)
pub trait Storage<T> {
    /// Index type for this storage.
    type Index: Index;

    /// Removes and returns the value at `index`, if present.
    fn remove(&mut self, index: Self::Index) -> Option<T>;

    /// Returns a reference to the value at `index`, if present.
    fn get(&self, index: Self::Index) -> Option<&T>;

    /// Returns a mutable reference to the value at `index`, if present.
    fn get_mut(&mut self, index: Self::Index) -> Option<&mut T>;

    /// Number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slot is occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Storage with a fixed slot budget. Insertion can fail.
pub trait BoundedStorage<T>: Storage<T> {
    /// Inserts a value, returning its stable index.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` when every slot is taken. The value is
    /// handed back untouched.
    fn try_insert(&mut self, value: T) -> Result<Self::Index, Full<T>>;

    /// Total number of slots.
    fn capacity(&self) -> usize;
}

/// Growable storage. Insertion cannot fail.
pub trait UnboundedStorage<T>: Storage<T> {
    /// Inserts a value, returning its stable index.
    fn insert(&mut self, value: T) -> Self::Index;
}

/// Error returned when fixed-capacity storage is full.
///
/// Carries the rejected value so the caller keeps ownership of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> core::fmt::Display for Full<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "storage is full")
    }
}

impl<T: core::fmt::Debug> std::error::Error for Full<T> {}

// =============================================================================
// Arena - fixed capacity, free-list slot reuse
// =============================================================================

#[derive(Debug)]
enum Slot<T, Idx> {
    Occupied(T),
    Vacant { next_free: Idx },
}

/// Fixed-capacity storage with runtime-determined size.
///
/// The slot vector is reserved once in [`with_capacity`](Arena::with_capacity)
/// and never grows past it, so inserts on a warm arena do not allocate.
/// Freed slots are threaded into a LIFO free list.
///
/// # Example
///
/// ```
/// use nexus_ring::{Arena, BoundedStorage, Storage};
///
/// let mut arena: Arena<&str> = Arena::with_capacity(2);
/// let a = arena.try_insert("a").unwrap();
/// let _b = arena.try_insert("b").unwrap();
///
/// // Budget exhausted: the value comes back
/// assert_eq!(arena.try_insert("c").unwrap_err().into_inner(), "c");
///
/// assert_eq!(arena.remove(a), Some("a"));
/// assert_eq!(arena.try_insert("d").unwrap(), a); // slot reused
/// ```
#[derive(Debug)]
pub struct Arena<T, Idx: Index = u32> {
    slots: Vec<Slot<T, Idx>>,
    capacity: usize,
    free_head: Idx,
    len: usize,
}

impl<T, Idx: Index> Arena<T, Idx> {
    /// Creates an arena with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or exceeds what the index type can address.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        assert!(
            capacity <= Idx::MAX_SLOTS,
            "capacity exceeds index type maximum"
        );

        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            free_head: Idx::NONE,
            len: 0,
        }
    }

    /// Returns `true` if all slots are occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Drops every stored value and makes all slots available again.
    ///
    /// Any ring still linking into this arena is left dangling; clear or
    /// destroy those first.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = Idx::NONE;
        self.len = 0;
    }
}

impl<T, Idx: Index> Storage<T> for Arena<T, Idx> {
    type Index = Idx;

    #[inline]
    fn remove(&mut self, index: Idx) -> Option<T> {
        let slot = self.slots.get_mut(index.as_usize())?;
        if !matches!(slot, Slot::Occupied(_)) {
            return None;
        }

        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match core::mem::replace(slot, vacant) {
            Slot::Occupied(value) => {
                self.free_head = index;
                self.len -= 1;
                Some(value)
            }
            Slot::Vacant { .. } => None,
        }
    }

    #[inline]
    fn get(&self, index: Idx) -> Option<&T> {
        match self.slots.get(index.as_usize())? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, index: Idx) -> Option<&mut T> {
        match self.slots.get_mut(index.as_usize())? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

impl<T, Idx: Index> BoundedStorage<T> for Arena<T, Idx> {
    #[inline]
    fn try_insert(&mut self, value: T) -> Result<Idx, Full<T>> {
        if self.free_head.is_some() {
            let index = self.free_head;
            let slot = &mut self.slots[index.as_usize()];
            if let Slot::Vacant { next_free } = *slot {
                self.free_head = next_free;
            }
            *slot = Slot::Occupied(value);
            self.len += 1;
            return Ok(index);
        }

        if self.slots.len() == self.capacity {
            return Err(Full(value));
        }

        let index = Idx::from_usize(self.slots.len());
        self.slots.push(Slot::Occupied(value));
        self.len += 1;
        Ok(index)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
impl<T> Storage<T> for slab::Slab<T> {
    type Index = usize;

    #[inline]
    fn remove(&mut self, index: usize) -> Option<T> {
        self.try_remove(index)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        slab::Slab::get(self, index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        slab::Slab::get_mut(self, index)
    }

    #[inline]
    fn len(&self) -> usize {
        slab::Slab::len(self)
    }
}

#[cfg(feature = "slab")]
impl<T> UnboundedStorage<T> for slab::Slab<T> {
    #[inline]
    fn insert(&mut self, value: T) -> usize {
        slab::Slab::insert(self, value)
    }
}

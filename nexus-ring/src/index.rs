//! Index types for ring links.
//!
//! A link is a plain integer index into storage. One value per index type is
//! reserved as [`Index::NONE`]; inside a ring that value stands for the
//! sentinel, so `node.next == NONE` reads as "the next position is the head".

/// A copyable storage index with a reserved sentinel value.
///
/// # Example
///
/// ```
/// use nexus_ring::Index;
///
/// let idx: u32 = 5;
/// assert!(idx.is_some());
/// assert!(u32::NONE.is_none());
/// assert_eq!(u32::MAX_SLOTS, u32::MAX as usize);
/// ```
pub trait Index: Copy + Eq + core::fmt::Debug {
    /// Reserved value. Never handed out by storage.
    const NONE: Self;

    /// Number of addressable slots (every value except `NONE`).
    const MAX_SLOTS: usize;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is a real slot index.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Converts to a slot position.
    fn as_usize(self) -> usize;

    /// Converts a slot position into an index.
    ///
    /// Callers guarantee `val < Self::MAX_SLOTS`.
    fn from_usize(val: usize) -> Self;
}

macro_rules! impl_index_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Index for $ty {
                const NONE: Self = <$ty>::MAX;
                const MAX_SLOTS: usize = if (<$ty>::MAX as u128) < (usize::MAX as u128) {
                    <$ty>::MAX as usize
                } else {
                    usize::MAX
                };

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_usize(val: usize) -> Self {
                    debug_assert!(val < Self::MAX_SLOTS, "index {val} collides with NONE");
                    val as Self
                }
            }
        )*
    };
}

impl_index_for_unsigned!(u8, u16, u32, u64, usize);

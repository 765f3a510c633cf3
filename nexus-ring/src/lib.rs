//! Circular doubly-linked queues over external storage.
//!
//! Queues hold stable storage keys, never the values themselves. Nodes live
//! in a caller-provided pool; each queue is a head ring that links some of
//! them. Reordering is pure relinking: sorting, reversing or merging never
//! moves or copies a payload, and never allocates.
//!
//! ```text
//! Storage (Arena / Slab) - owns nodes, hands out stable keys
//! Ring                   - head of a circular list: first + last key
//! Queue                  - a ring plus the element operations
//! Chain                  - a ring of queues, for k-way merge
//! ```
//!
//! # Quick Start
//!
//! ```
//! use nexus_ring::{Arena, Node, Queue};
//!
//! type Storage = Arena<Node<String>>;
//!
//! let mut storage: Storage = Arena::with_capacity(64);
//! let mut queue: Queue<String, Storage> = Queue::new();
//!
//! for word in ["pear", "fig", "apple", "fig"] {
//!     queue.try_push_back(&mut storage, word.to_string()).unwrap();
//! }
//!
//! queue.sort(&mut storage, false);
//! queue.delete_dup(&mut storage);
//!
//! let words: Vec<&str> = queue.iter(&storage).map(String::as_str).collect();
//! assert_eq!(words, ["apple", "pear"]);
//!
//! queue.destroy(&mut storage);
//! ```
//!
//! # The Head Ring
//!
//! A [`Ring`] is a value, not a storage slot: an index of
//! [`Index::NONE`] inside a node's links stands for the head. Empty rings
//! need no node at all, so [`Queue::new`] cannot fail and the sort and merge
//! paths build their temporary rings on the stack.
//!
//! # Same Storage Instance
//!
//! Every operation on a queue must use the storage its nodes were inserted
//! into, the same discipline as the `slab` crate. A key that does not name a
//! live node panics with "invalid key".
//!
//! # Storage Traits
//!
//! ```text
//! Storage<T>           - base trait: get, remove, len
//!     │
//!     ├── BoundedStorage<T>   - fixed capacity, try_insert -> Result
//!     │
//!     └── UnboundedStorage<T> - growable, insert -> Key (infallible)
//! ```
//!
//! Queues over bounded storage get `try_push_*` returning [`Full`]; queues
//! over unbounded storage get infallible `push_*`.
//!
//! # Feature Flags
//!
//! - `slab` - Enable [`Storage`] impl for `slab::Slab`

#![warn(missing_docs)]

pub mod chain;
pub mod error;
pub mod index;
pub mod order;
pub mod owned;
pub mod queue;
pub mod ring;
pub mod storage;
pub mod structure;

#[cfg(test)]
mod testing;

pub use chain::{Chain, ChainStorage, Context};
pub use error::QueueError;
pub use index::Index;
pub use owned::OwnedQueue;
pub use queue::Queue;
pub use ring::{Iter, Keys, Node, Ring};
pub use storage::{Arena, BoundedStorage, Full, Storage, UnboundedStorage};

//! A compact, growable object pool addressed by small integer indexes.
//!
//! This crate provides [`IndexPool`], a container that hands out `usize` indexes
//! instead of references. Items live in one contiguous backing region; removed
//! slots are recycled through an intrusive free list threaded through the slots
//! themselves, so there is no side bookkeeping and insert/remove are O(1)
//! amortized.
//!
//! # Key properties
//!
//! - **Index stability**: growth may relocate the backing region, but indexes
//!   stay valid - consumers never hold addresses.
//! - **Reserved null index**: index 0 is permanently occupied by an internal
//!   placeholder and never issued, so [`NULL_INDEX`] doubles as a "no item"
//!   value in index-linked data structures at no storage cost.
//! - **Insertion-order iteration**: iteration walks live items in ascending
//!   index order, which for sequential inserts is insertion order; cloning
//!   preserves that order.
//! - **LIFO slot reuse**: the most recently removed index is the first one a
//!   later insert reuses.
//! - **Pluggable growth**: the block size of each region extension comes from an
//!   injectable [`GrowthPolicy`] ([`DoublingGrowth`] by default).
//!
//! The pool is single-threaded by design: it is `Send` when the item type is,
//! but shared access must be serialized externally (for example behind a
//! `Mutex`).
//!
//! # Examples
//!
//! ```
//! use index_pool::IndexPool;
//!
//! let mut pool = IndexPool::<String>::new();
//!
//! let a = pool.insert("alpha".to_string());
//! let b = pool.insert("beta".to_string());
//! _ = pool.insert("gamma".to_string());
//!
//! assert_eq!(pool.len(), 3);
//! assert_eq!(pool[b], "beta");
//!
//! // Indexes can be stored in other items as lightweight links;
//! // 0 means "no item".
//! assert!(a != index_pool::NULL_INDEX);
//!
//! _ = pool.remove(b);
//!
//! let values: Vec<&str> = pool.iter().map(|(_, v)| v.as_str()).collect();
//! assert_eq!(values, ["alpha", "gamma"]);
//!
//! // The freed slot is reused before the pool grows again.
//! let d = pool.insert("delta".to_string());
//! assert_eq!(d, b);
//! ```

mod builder;
mod growth;
mod iter;
mod pool;
mod slot;

pub use builder::*;
pub use growth::*;
pub use iter::*;
pub use pool::*;
pub(crate) use slot::*;

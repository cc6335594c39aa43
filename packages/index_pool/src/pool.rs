use std::any::type_name;
use std::mem;
use std::num::NonZero;
use std::ptr;

use crate::{DoublingGrowth, GrowthPolicy, IndexPoolBuilder, Iter, IterMut, Slot};

/// The reserved "no item" index.
///
/// Index 0 is permanently occupied by an internal placeholder and is never returned
/// by [`IndexPool::insert()`], so callers can use it as a null handle at no extra
/// storage cost. It also terminates the internal free list.
pub const NULL_INDEX: usize = 0;

/// A compact, growable object pool addressed by plain `usize` indexes.
///
/// Inserting an item returns an index. The index stays valid across pool growth:
/// the backing region may relocate in memory when it is extended, but since callers
/// hold indexes rather than addresses, nothing is invalidated. Freed slots are
/// recycled through an intrusive free list threaded through the slots themselves,
/// so the pool carries no side bookkeeping and insert/remove are O(1) amortized.
///
/// Index 0 is reserved at construction time and never issued (see [`NULL_INDEX`]),
/// which lets 0 double as a "no item" value in index-linked data structures.
///
/// # Index reuse
///
/// Indexes may be reused after an item is removed, most recently freed first. An
/// index is a weak key, not an owning reference: use [`contains()`][Self::contains]
/// to check whether it currently denotes a live item.
///
/// # Iteration order
///
/// Iteration visits live items in ascending index order. For a pool filled by
/// sequential inserts without interleaved removals, that is insertion order.
/// Cloning a pool re-inserts the items in iteration order, so a clone iterates in
/// the same value order as its source (though under fresh indexes).
///
/// # Examples
///
/// ```
/// use index_pool::IndexPool;
///
/// let mut pool = IndexPool::<String>::new();
///
/// let a = pool.insert("apple".to_string());
/// let b = pool.insert("banana".to_string());
///
/// assert_eq!(pool[a], "apple");
/// assert_eq!(pool.len(), 2);
///
/// let fruit = pool.remove(b);
/// assert_eq!(fruit, "banana");
/// assert!(!pool.contains(b));
/// ```
#[derive(Debug)]
pub struct IndexPool<T, G = DoublingGrowth> {
    /// The single contiguous backing region holding every slot, used and free.
    slots: Vec<Slot<T>>,

    /// Head of the intrusive free list, [`NULL_INDEX`] when the list is empty.
    /// The reserved slot 0 is never on this list after construction, which is
    /// what guarantees that no insert ever hands out index 0.
    free_head: usize,

    /// The number of live items, excluding the reserved slot 0.
    len: usize,

    /// The size of the next block by which the region will be extended.
    block_size: NonZero<usize>,

    growth: G,
}

impl<T> IndexPool<T, DoublingGrowth> {
    /// Creates a new [`IndexPool`] with the default doubling growth policy.
    ///
    /// Construction allocates the first block and installs the reserved index 0
    /// placeholder (a default-constructed `T`), so a fresh pool already has
    /// capacity but a length of zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_pool::IndexPool;
    ///
    /// let mut pool = IndexPool::<i32>::new();
    /// assert!(pool.is_empty());
    ///
    /// let key = pool.insert(42);
    /// assert_eq!(pool[key], 42);
    /// ```
    #[must_use]
    pub fn new() -> Self
    where
        T: Default,
    {
        Self::builder().build()
    }

    /// Starts building a new [`IndexPool`].
    ///
    /// Use this when you want a growth policy other than the default.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::num::NonZero;
    ///
    /// use index_pool::{AdditiveGrowth, IndexPool};
    ///
    /// let pool = IndexPool::<u32>::builder()
    ///     .growth_policy(AdditiveGrowth::new(NonZero::new(4).unwrap(), 4))
    ///     .build();
    ///
    /// assert_eq!(pool.capacity(), 4);
    /// ```
    pub fn builder() -> IndexPoolBuilder<T> {
        IndexPoolBuilder::new()
    }
}

impl<T: Default> Default for IndexPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, G: GrowthPolicy> IndexPool<T, G> {
    #[must_use]
    pub(crate) fn new_inner(growth: G) -> Self
    where
        T: Default,
    {
        let mut pool = Self {
            slots: Vec::new(),
            free_head: NULL_INDEX,
            len: 0,
            block_size: growth.initial_block_size(),
            growth,
        };

        pool.install_reserved_slot();
        pool
    }

    /// Inserts an item into the pool and returns its index.
    ///
    /// Grows the backing region first if no free slot remains. Never returns
    /// [`NULL_INDEX`].
    ///
    /// # Examples
    ///
    /// ```
    /// use index_pool::IndexPool;
    ///
    /// let mut pool = IndexPool::<i32>::new();
    ///
    /// let key = pool.insert(42);
    /// assert_ne!(key, index_pool::NULL_INDEX);
    /// assert_eq!(pool[key], 42);
    /// ```
    #[must_use]
    pub fn insert(&mut self, value: T) -> usize {
        self.insert_with(|| value)
    }

    /// Inserts the item produced by `make` and returns its index.
    ///
    /// `make` runs before any pool bookkeeping is touched, so if it panics the
    /// pool is left exactly as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_pool::IndexPool;
    ///
    /// let mut pool = IndexPool::<Vec<u8>>::new();
    ///
    /// let key = pool.insert_with(|| vec![0; 16]);
    /// assert_eq!(pool[key].len(), 16);
    /// ```
    #[must_use]
    pub fn insert_with(&mut self, make: impl FnOnce() -> T) -> usize {
        let value = make();

        let index = self.acquire_slot();
        debug_assert_ne!(index, NULL_INDEX);

        *self
            .slots
            .get_mut(index)
            .expect("acquired index always lies within the backing region") = Slot::Used(value);

        self.len = self
            .len
            .checked_add(1)
            .expect("the backing region fits in memory, so the item count cannot overflow");

        index
    }

    /// Ensures the pool can hold at least `min_capacity` slots.
    ///
    /// Grows by whole policy-sized blocks until the capacity is sufficient,
    /// threading every new slot onto the free list. Does nothing if the capacity
    /// is already sufficient.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_pool::IndexPool;
    ///
    /// let mut pool = IndexPool::<u32>::new();
    /// pool.reserve(100);
    /// assert!(pool.capacity() >= 100);
    /// ```
    #[cfg_attr(test, mutants::skip)] // Can be mutated to infinitely growing memory use.
    pub fn reserve(&mut self, min_capacity: usize) {
        while self.slots.len() < min_capacity {
            self.grow();
        }
    }

    /// Removes every item and reinitializes the pool to its post-construction
    /// state: the backing region is released, the first block is reallocated and
    /// the reserved index 0 placeholder is recreated. The block size resets to the
    /// policy's initial value.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_pool::IndexPool;
    ///
    /// let mut pool = IndexPool::<String>::new();
    /// let key = pool.insert("gone soon".to_string());
    ///
    /// pool.clear();
    ///
    /// assert!(pool.is_empty());
    /// assert!(!pool.contains(key));
    /// ```
    pub fn clear(&mut self)
    where
        T: Default,
    {
        // Dropping the Vec drops every live payload; free slots hold no payload.
        self.slots = Vec::new();
        self.free_head = NULL_INDEX;
        self.len = 0;
        self.block_size = self.growth.initial_block_size();

        self.install_reserved_slot();
    }

    /// Construction-time acquisition of slot 0.
    ///
    /// Runs the ordinary acquire path on an empty region, which is the one moment
    /// index 0 sits at the head of the free list. Afterwards slot 0 stays
    /// permanently occupied and never returns to the list, so no later insert can
    /// ever hand out index 0.
    fn install_reserved_slot(&mut self)
    where
        T: Default,
    {
        debug_assert!(self.slots.is_empty());

        let index = self.acquire_slot();
        debug_assert_eq!(index, NULL_INDEX);

        *self
            .slots
            .get_mut(index)
            .expect("acquired index always lies within the backing region") =
            Slot::Used(T::default());

        // The placeholder does not count towards the visible length.
    }

    /// Pops the free-list head, growing the region first if the list is empty.
    /// The returned slot remains in its free state; the caller overwrites it.
    fn acquire_slot(&mut self) -> usize {
        if self.free_head == NULL_INDEX {
            self.grow();
        }

        let index = self.free_head;

        let slot = self
            .slots
            .get(index)
            .expect("free-list head always lies within the backing region");

        self.free_head = match slot {
            Slot::Free { next } => *next,
            Slot::Used(_) => panic!(
                "free-list head {index} denotes a used slot in pool of {} - the free list is corrupt",
                type_name::<T>()
            ),
        };

        index
    }

    /// Extends the backing region by one block of `block_size` slots.
    ///
    /// The new slots are threaded onto the free list in descending index order, so
    /// the head ends up at the lowest new index and sequential acquisitions come
    /// out in ascending index order. The whole region may relocate in memory here;
    /// that is harmless because consumers hold indexes, never addresses.
    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let old_head = self.free_head;

        let new_capacity = old_capacity
            .checked_add(self.block_size.get())
            .expect("capacity overflow: the pool cannot outgrow the address space");

        self.slots.extend((old_capacity..new_capacity).map(|index| {
            let successor = index
                .checked_add(1)
                .expect("bounded by new_capacity, which did not overflow");

            Slot::Free {
                next: if successor < new_capacity {
                    successor
                } else {
                    old_head
                },
            }
        }));

        self.free_head = old_capacity;

        let next_block_size = self.growth.next_block_size(self.block_size);
        debug_assert!(
            next_block_size >= self.block_size,
            "growth policy must be monotonically non-decreasing"
        );
        self.block_size = next_block_size;
    }
}

impl<T, G> IndexPool<T, G> {
    /// Removes the item at `index` and returns it.
    ///
    /// The slot becomes the new head of the free list, so the most recently freed
    /// index is the first one a later insert reuses.
    ///
    /// # Panics
    ///
    /// Panics if `index` is [`NULL_INDEX`], out of range, or denotes a slot that
    /// is already free. Those are caller bugs, not recoverable conditions.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_pool::IndexPool;
    ///
    /// let mut pool = IndexPool::<i32>::new();
    /// let key = pool.insert(7);
    ///
    /// assert_eq!(pool.remove(key), 7);
    /// assert!(pool.is_empty());
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        assert_ne!(
            index,
            NULL_INDEX,
            "remove(0): index 0 is the reserved null index of a pool of {}",
            type_name::<T>()
        );

        let next_free = self.free_head;

        let Some(slot) = self.slots.get_mut(index) else {
            panic!(
                "remove({index}) index out of bounds in pool of {}",
                type_name::<T>()
            );
        };

        if !slot.is_used() {
            panic!(
                "remove({index}) slot was already free in pool of {}",
                type_name::<T>()
            );
        }

        let removed = mem::replace(slot, Slot::Free { next: next_free });
        self.free_head = index;

        self.len = self
            .len
            .checked_sub(1)
            .expect("we verified above that a live item exists, so the count is non-zero");

        match removed {
            Slot::Used(value) => value,
            Slot::Free { .. } => unreachable!("verified used before the swap"),
        }
    }

    /// Returns a reference to the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not denote a live item. That includes
    /// [`NULL_INDEX`]: dereferencing the null handle is a caller bug and fails
    /// loudly rather than exposing the internal placeholder.
    #[must_use]
    pub fn get(&self, index: usize) -> &T {
        match self.slots.get(index) {
            Some(Slot::Used(value)) if index != NULL_INDEX => value,
            _ => panic!(
                "get({index}) does not denote a live item in pool of {}",
                type_name::<T>()
            ),
        }
    }

    /// Returns an exclusive reference to the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not denote a live item (see [`get()`][Self::get]).
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        match self.slots.get_mut(index) {
            Some(Slot::Used(value)) if index != NULL_INDEX => value,
            _ => panic!(
                "get_mut({index}) does not denote a live item in pool of {}",
                type_name::<T>()
            ),
        }
    }

    /// Whether `index` currently denotes a live item.
    ///
    /// Always `false` for [`NULL_INDEX`] and for indexes beyond the capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_pool::IndexPool;
    ///
    /// let mut pool = IndexPool::<i32>::new();
    /// let key = pool.insert(1);
    ///
    /// assert!(pool.contains(key));
    ///
    /// _ = pool.remove(key);
    /// assert!(!pool.contains(key));
    /// ```
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index != NULL_INDEX && self.slots.get(index).is_some_and(Slot::is_used)
    }

    /// Maps a reference to a pool item back to its index.
    ///
    /// Returns [`NULL_INDEX`] if the reference does not point into the backing
    /// region. Note the overload: 0 is also the reserved slot's own index, so a
    /// returned 0 is *not* proof that the reference is foreign - callers that
    /// care must check containment separately.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_pool::IndexPool;
    ///
    /// let mut pool = IndexPool::<i32>::new();
    /// let key = pool.insert(5);
    ///
    /// let item = pool.get(key);
    /// assert_eq!(pool.index_of(item), key);
    ///
    /// let foreign = 5;
    /// assert_eq!(pool.index_of(&foreign), index_pool::NULL_INDEX);
    /// ```
    #[must_use]
    pub fn index_of(&self, value: &T) -> usize {
        let base = self.slots.as_ptr().addr();
        let addr = ptr::from_ref(value).addr();

        let stride = size_of::<Slot<T>>();

        let Some(span) = self.slots.len().checked_mul(stride) else {
            return NULL_INDEX;
        };
        let Some(end) = base.checked_add(span) else {
            return NULL_INDEX;
        };

        if addr < base || addr >= end {
            return NULL_INDEX;
        }

        // The reference points somewhere inside slot `i`; flooring the byte offset
        // recovers `i` without knowing the payload's offset within the slot.
        addr.wrapping_sub(base)
            .checked_div(stride)
            .expect("a slot is at least one machine word, so the stride is non-zero")
    }

    /// The number of live items in the pool.
    ///
    /// The reserved index 0 placeholder is never counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the pool holds no items.
    ///
    /// An empty pool still holds its backing region and the reserved slot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of slots in the backing region, used and free, including the
    /// reserved slot 0.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterates over `(index, &item)` pairs in ascending index order, skipping
    /// free slots and the reserved slot 0.
    ///
    /// The iterator borrows the pool, so the pool cannot grow (and relocate its
    /// region) while iteration is in progress.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_pool::IndexPool;
    ///
    /// let mut pool = IndexPool::<i32>::new();
    /// _ = pool.insert(10);
    /// _ = pool.insert(20);
    ///
    /// let values: Vec<i32> = pool.iter().map(|(_, v)| *v).collect();
    /// assert_eq!(values, [10, 20]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.slots, self.len)
    }

    /// Iterates over `(index, &mut item)` pairs in ascending index order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&mut self.slots, self.len)
    }

    #[cfg(debug_assertions)]
    #[cfg_attr(not(test), expect(dead_code, reason = "exercised by the test suite"))]
    pub(crate) fn integrity_check(&self) {
        assert!(
            self.slots.first().is_some_and(Slot::is_used),
            "slot 0 must exist and stay occupied in pool of {}",
            type_name::<T>()
        );

        let used = self.slots.iter().filter(|slot| slot.is_used()).count();
        assert!(
            used == self.len.checked_add(1).expect("len is below capacity"),
            "occupied slot count {} does not match len {} + reserved slot in pool of {}",
            used,
            self.len,
            type_name::<T>()
        );

        // Walk the free list: every node free, no cycles, terminated at 0, and
        // every free slot accounted for.
        let expected_free = self
            .slots
            .len()
            .checked_sub(used)
            .expect("used slots cannot outnumber slots");

        let mut visited = 0_usize;
        let mut cursor = self.free_head;
        while cursor != NULL_INDEX {
            assert!(
                visited < expected_free,
                "free list of pool of {} is longer than the free slot count {expected_free} - cycle suspected",
                type_name::<T>()
            );

            let slot = self
                .slots
                .get(cursor)
                .unwrap_or_else(|| panic!("free list escaped the backing region at {cursor}"));
            assert!(
                !slot.is_used(),
                "free list of pool of {} passes through used slot {cursor}",
                type_name::<T>()
            );

            cursor = slot.free_link();
            visited = visited.checked_add(1).expect("bounded by expected_free");
        }

        assert!(
            visited == expected_free,
            "free list visits {visited} slots but {expected_free} slots are free in pool of {}",
            type_name::<T>()
        );
    }
}

impl<T, G> std::ops::Index<usize> for IndexPool<T, G> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index)
    }
}

impl<T, G> std::ops::IndexMut<usize> for IndexPool<T, G> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index)
    }
}

impl<T, G> Clone for IndexPool<T, G>
where
    T: Clone + Default,
    G: GrowthPolicy + Clone,
{
    /// Clones the pool by re-inserting the items in iteration order.
    ///
    /// The clone iterates in the same value order as the source but compacts the
    /// items under fresh indexes; the free-list layout is not duplicated. The
    /// current block size carries over so subsequent growth behaves the same.
    fn clone(&self) -> Self {
        let mut clone = Self::new_inner(self.growth.clone());
        clone.block_size = self.block_size;

        for (_, value) in self.iter() {
            _ = clone.insert(value.clone());
        }

        clone
    }
}

impl<'p, T, G> IntoIterator for &'p IndexPool<T, G> {
    type Item = (usize, &'p T);
    type IntoIter = Iter<'p, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'p, T, G> IntoIterator for &'p mut IndexPool<T, G> {
    type Item = (usize, &'p mut T);
    type IntoIter = IterMut<'p, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

use std::marker::PhantomData;

use crate::{DoublingGrowth, GrowthPolicy, IndexPool};

/// Builder for creating an instance of [`IndexPool`].
///
/// You only need to use this builder if you want to customize the growth policy.
/// The default configuration used by [`IndexPool::new()`][1] is sufficient for most
/// use cases.
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
///
/// use index_pool::{ConstantGrowth, IndexPool};
///
/// let pool = IndexPool::<u32>::builder()
///     .growth_policy(ConstantGrowth::new(NonZero::new(64).unwrap()))
///     .build();
///
/// assert_eq!(pool.capacity(), 64);
/// ```
///
/// [1]: IndexPool::new
#[must_use]
pub struct IndexPoolBuilder<T, G = DoublingGrowth> {
    growth: G,

    _item: PhantomData<T>,
}

impl<T, G> std::fmt::Debug for IndexPoolBuilder<T, G>
where
    G: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexPoolBuilder")
            .field(
                "item_type",
                &std::format_args!("{}", std::any::type_name::<T>()),
            )
            .field("growth", &self.growth)
            .finish()
    }
}

impl<T> IndexPoolBuilder<T, DoublingGrowth> {
    pub(crate) fn new() -> Self {
        Self {
            growth: DoublingGrowth::default(),
            _item: PhantomData,
        }
    }
}

impl<T, G> IndexPoolBuilder<T, G> {
    /// Sets the [growth policy][GrowthPolicy] for the pool. This governs the size of
    /// each block by which the backing region is extended.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::num::NonZero;
    ///
    /// use index_pool::{AdditiveGrowth, IndexPool};
    ///
    /// let pool = IndexPool::<u32>::builder()
    ///     .growth_policy(AdditiveGrowth::new(NonZero::new(14).unwrap(), 16))
    ///     .build();
    /// ```
    pub fn growth_policy<G2: GrowthPolicy>(self, growth: G2) -> IndexPoolBuilder<T, G2> {
        IndexPoolBuilder {
            growth,
            _item: PhantomData,
        }
    }

    /// Builds the pool with the specified configuration.
    ///
    /// Building immediately allocates the first block and installs the reserved
    /// index 0 slot, so a fresh pool already has a non-zero capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_pool::IndexPool;
    ///
    /// let pool = IndexPool::<u32>::builder().build();
    /// assert!(pool.is_empty());
    /// assert!(pool.capacity() > 0);
    /// ```
    #[must_use]
    pub fn build(self) -> IndexPool<T, G>
    where
        T: Default,
        G: GrowthPolicy,
    {
        IndexPool::new_inner(self.growth)
    }
}

use std::num::NonZero;

/// Strategy deciding how large each newly allocated block of slots is.
///
/// An [`IndexPool`][crate::IndexPool] extends its backing region one block at a time.
/// The policy supplies the size of the first block and, after every growth event, the
/// size the *following* block will have. Implementations must be monotonic:
/// `next_block_size(current)` never returns a value smaller than `current`.
///
/// Block sizes are [`NonZero`] so a pool that grows by nothing is unrepresentable.
///
/// # Examples
///
/// ```
/// use index_pool::{AdditiveGrowth, GrowthPolicy, IndexPool};
/// use std::num::NonZero;
///
/// let policy = AdditiveGrowth::new(NonZero::new(4).unwrap(), 4);
/// assert_eq!(policy.initial_block_size().get(), 4);
///
/// let pool = IndexPool::<u32>::builder().growth_policy(policy).build();
/// assert_eq!(pool.capacity(), 4);
/// ```
pub trait GrowthPolicy {
    /// The size of the first block the pool allocates.
    fn initial_block_size(&self) -> NonZero<usize>;

    /// The size of the block allocated *after* one of `current` slots.
    ///
    /// Must be monotonically non-decreasing in `current`.
    fn next_block_size(&self, current: NonZero<usize>) -> NonZero<usize>;
}

const TWO: NonZero<usize> = NonZero::new(2).unwrap();

/// Geometric growth: every block is twice the size of the previous one.
///
/// This is the default policy. It keeps the number of growth events logarithmic in
/// the number of items, which is what you want unless memory is unusually tight.
#[derive(Clone, Copy, Debug)]
pub struct DoublingGrowth {
    initial: NonZero<usize>,
}

impl DoublingGrowth {
    /// Creates a doubling policy with the given first block size.
    #[must_use]
    pub fn new(initial: NonZero<usize>) -> Self {
        Self { initial }
    }
}

impl Default for DoublingGrowth {
    fn default() -> Self {
        Self {
            initial: NonZero::new(16).expect("16 is not zero"),
        }
    }
}

impl GrowthPolicy for DoublingGrowth {
    fn initial_block_size(&self) -> NonZero<usize> {
        self.initial
    }

    fn next_block_size(&self, current: NonZero<usize>) -> NonZero<usize> {
        current.saturating_mul(TWO)
    }
}

/// Additive growth: every block is a fixed increment larger than the previous one.
#[derive(Clone, Copy, Debug)]
pub struct AdditiveGrowth {
    initial: NonZero<usize>,
    increment: usize,
}

impl AdditiveGrowth {
    /// Creates an additive policy with the given first block size and increment.
    #[must_use]
    pub fn new(initial: NonZero<usize>, increment: usize) -> Self {
        Self { initial, increment }
    }
}

impl GrowthPolicy for AdditiveGrowth {
    fn initial_block_size(&self) -> NonZero<usize> {
        self.initial
    }

    fn next_block_size(&self, current: NonZero<usize>) -> NonZero<usize> {
        current.checked_add(self.increment).unwrap_or(NonZero::<usize>::MAX)
    }
}

/// Constant growth: every block has the same size.
///
/// Acquiring N items performs N / block size growth events, so this is only a good
/// idea when the eventual pool size is known and `reserve` is used up front.
#[derive(Clone, Copy, Debug)]
pub struct ConstantGrowth {
    block_size: NonZero<usize>,
}

impl ConstantGrowth {
    /// Creates a constant policy with the given block size.
    #[must_use]
    pub fn new(block_size: NonZero<usize>) -> Self {
        Self { block_size }
    }
}

impl GrowthPolicy for ConstantGrowth {
    fn initial_block_size(&self) -> NonZero<usize> {
        self.block_size
    }

    fn next_block_size(&self, current: NonZero<usize>) -> NonZero<usize> {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_doubles() {
        let policy = DoublingGrowth::new(NonZero::new(4).unwrap());

        assert_eq!(policy.initial_block_size().get(), 4);
        assert_eq!(policy.next_block_size(NonZero::new(4).unwrap()).get(), 8);
        assert_eq!(policy.next_block_size(NonZero::new(8).unwrap()).get(), 16);
    }

    #[test]
    fn doubling_saturates_instead_of_overflowing() {
        let policy = DoublingGrowth::default();

        assert_eq!(
            policy.next_block_size(NonZero::<usize>::MAX),
            NonZero::<usize>::MAX
        );
    }

    #[test]
    fn additive_adds() {
        let policy = AdditiveGrowth::new(NonZero::new(14).unwrap(), 16);

        assert_eq!(policy.initial_block_size().get(), 14);
        assert_eq!(policy.next_block_size(NonZero::new(14).unwrap()).get(), 30);
    }

    #[test]
    fn additive_saturates_instead_of_overflowing() {
        let policy = AdditiveGrowth::new(NonZero::new(1).unwrap(), usize::MAX);

        assert_eq!(
            policy.next_block_size(NonZero::new(2).unwrap()),
            NonZero::<usize>::MAX
        );
    }

    #[test]
    fn constant_is_constant() {
        let policy = ConstantGrowth::new(NonZero::new(32).unwrap());

        assert_eq!(policy.initial_block_size().get(), 32);
        assert_eq!(policy.next_block_size(NonZero::new(32).unwrap()).get(), 32);
    }
}

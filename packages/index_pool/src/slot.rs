/// One element position in the backing region of an [`IndexPool`][crate::IndexPool].
///
/// The variant discriminant is the "used" flag and the `next` field is the free-list
/// link, so a free slot carries its own bookkeeping and the pool needs no side table.
/// While a slot is used, the pool never touches anything but the discriminant.
#[derive(Clone, Debug)]
pub(crate) enum Slot<T> {
    Used(T),

    Free { next: usize },
}

impl<T> Slot<T> {
    #[must_use]
    pub(crate) fn is_used(&self) -> bool {
        matches!(self, Self::Used(_))
    }

    /// The free-list link of a free slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot is used.
    #[cfg(debug_assertions)]
    #[must_use]
    pub(crate) fn free_link(&self) -> usize {
        match self {
            Self::Free { next } => *next,
            Self::Used(_) => panic!("free_link() called on a used slot"),
        }
    }
}

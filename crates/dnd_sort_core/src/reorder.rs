use crate::order::move_index;

/// A committed move, in indices of the pre-drag draggable-only order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reorder<K> {
    pub item: K,
    pub from: usize,
    pub to: usize,
}

impl<K> Reorder<K> {
    /// Mirror the move onto a caller-owned vector.
    pub fn apply_to<T>(&self, items: &mut Vec<T>) -> bool {
        move_index(items, self.from, self.to)
    }
}

/// How a session (or pending gesture) came to an end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd<K> {
    /// Nothing was in progress for this pointer.
    Ignored,
    /// A pending gesture was released before becoming a drag.
    Tap,
    /// The item was released at its starting index.
    Unchanged,
    Committed(Reorder<K>),
    /// `can_drop` refused the move and the order was restored.
    Vetoed(Reorder<K>),
    /// The order was restored without reporting anything.
    RolledBack,
}

impl<K> SessionEnd<K> {
    pub fn committed(&self) -> Option<&Reorder<K>> {
        match self {
            SessionEnd::Committed(reorder) => Some(reorder),
            _ => None,
        }
    }
}

//! Pointer-driven reordering for gpui lists and tag clouds.

mod surface;
mod sort;

pub use gpui_dnd_sort_core::{CancelPolicy, DndSortConfig, GestureThresholds, GhostStyle};
pub use sort::{
    DndSort, DndSortItem, DndSortLayout, DndSortReorder, DndSortRowState, DndSortState, dnd_sort,
};

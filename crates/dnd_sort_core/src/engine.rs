//! Live splicing of the dragged item toward the pointer.

use std::fmt::Debug;

use crate::geometry::Point;
use crate::host::DragHost;
use crate::layout::{InsertSide, Orientation};
use crate::order::LiveOrder;

/// Move `dragged` next to `hovered`, on the side of its midpoint the pointer is on.
///
/// Returns `true` when the draggable order changed.
pub(crate) fn slide_over<K, H>(
    order: &mut LiveOrder<K>,
    dragged: &K,
    hovered: &K,
    pointer: Point,
    orientation: Orientation,
    host: &H,
) -> bool
where
    K: Clone + PartialEq + Debug,
    H: DragHost<K> + ?Sized,
{
    let (Some(from), Some(over)) = (order.item_index(dragged), order.item_index(hovered)) else {
        return false;
    };
    if from == over {
        return false;
    }
    let Some(hovered_box) = host.item_box(hovered) else {
        return false;
    };

    match orientation.side_of(pointer, &hovered_box.bounds) {
        InsertSide::Before => order.insert_before(dragged, hovered),
        InsertSide::After => order.insert_after(dragged, hovered),
    };
    order.item_index(dragged) != Some(from)
}

/// Pointer is over empty space: snap to the front or the end if it is past either edge.
pub(crate) fn slide_to_edge<K, H>(
    order: &mut LiveOrder<K>,
    dragged: &K,
    pointer: Point,
    orientation: Orientation,
    host: &H,
) -> bool
where
    K: Clone + PartialEq + Debug,
    H: DragHost<K> + ?Sized,
{
    let (Some(first), Some(last)) = (order.first_item().cloned(), order.last_item().cloned())
    else {
        return false;
    };
    let from = order.item_index(dragged);

    let leading = host
        .item_box(&first)
        .is_some_and(|b| orientation.is_before_leading_edge(pointer, &b.bounds));
    if leading {
        order.move_to_front(dragged);
        return order.item_index(dragged) != from;
    }

    let trailing = host
        .item_box(&last)
        .is_some_and(|b| orientation.is_past_trailing_edge(pointer, &b.bounds));
    if trailing {
        order.move_to_end(dragged);
        return order.item_index(dragged) != from;
    }

    false
}

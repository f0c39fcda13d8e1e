use crate::error::DndSortError;
use crate::feedback::ItemVisual;
use crate::frame::FrameTicket;
use crate::geometry::{ItemBox, Point};
use crate::gesture::{PointerId, ScrollMetrics};
use crate::layout::ContainerStyle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget<K> {
    Item(K),
    Placeholder,
}

/// The rendering side of a sortable container.
///
/// The controller owns the order; the host owns geometry and platform effects. Every method
/// is called on the UI thread from inside a controller call.
pub trait DragHost<K> {
    /// Computed style of the container, read again every frame.
    fn container_style(&self) -> ContainerStyle;

    /// Current box of a rendered item.
    fn item_box(&self, key: &K) -> Option<ItemBox>;

    /// The draggable item (or placeholder) under `point`.
    ///
    /// The ghost lives outside the container's hit set and is never reported.
    fn hit_test(&self, point: Point) -> Option<HitTarget<K>>;

    /// Metrics of the nearest ancestor carrying one of `container_classes`.
    fn scroll_metrics(&self, container_classes: &[String]) -> Option<ScrollMetrics>;

    fn capture_pointer(&mut self, pointer: PointerId) -> Result<(), DndSortError>;

    fn release_pointer(&mut self, pointer: PointerId);

    /// Run [`crate::DragController::frame`] with `ticket` before the next paint.
    fn request_frame(&mut self, ticket: FrameTicket);

    fn cancel_frame(&mut self, _ticket: FrameTicket) {}

    fn item_visual(&self, _key: &K) -> ItemVisual {
        ItemVisual::default()
    }

    fn set_item_visual(&mut self, _key: &K, _visual: ItemVisual) {}

    /// Attach or detach the window-level move/up/cancel listeners.
    fn set_drag_listeners(&mut self, _attached: bool) {}

    /// Suppress text selection and force the grabbing cursor page-wide.
    fn set_page_overrides(&mut self, _active: bool) {}
}

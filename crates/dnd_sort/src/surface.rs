use std::collections::HashMap;

use gpui::{Pixels, SharedString};
use gpui_dnd_sort_core::{
    Bounds, ContainerStyle, DndSortError, DragHost, FrameTicket, HitTarget, ItemBox, ItemVisual,
    Point, PointerId, ScrollMetrics, Size,
};

pub(crate) fn to_point(point: gpui::Point<Pixels>) -> Point {
    Point::new(f32::from(point.x), f32::from(point.y))
}

pub(crate) fn to_bounds(bounds: gpui::Bounds<Pixels>) -> Bounds {
    Bounds::new(
        f32::from(bounds.origin.x),
        f32::from(bounds.origin.y),
        f32::from(bounds.size.width),
        f32::from(bounds.size.height),
    )
}

#[derive(Clone, Copy)]
struct RowBox {
    bounds: Bounds,
    /// Disabled rows take space but are never drop targets.
    draggable: bool,
}

/// Geometry measured during the last paint, plus the effects the controller asked for.
///
/// Window-level mouse listeners registered while a gesture is live stand in for pointer
/// capture, so capturing never fails here.
#[derive(Default)]
pub(crate) struct SortSurface {
    pub(crate) container_id: SharedString,
    pub(crate) style: ContainerStyle,
    pub(crate) container: Option<Bounds>,
    items: HashMap<SharedString, RowBox>,
    placeholder: Option<Bounds>,
    visuals: HashMap<SharedString, ItemVisual>,
    frames: Vec<FrameTicket>,
    captured: Option<PointerId>,
    listening: bool,
    page_overrides: bool,
}

impl SortSurface {
    pub(crate) fn new(container_id: SharedString, style: ContainerStyle) -> Self {
        Self {
            container_id,
            style,
            ..Default::default()
        }
    }

    pub(crate) fn record_item(
        &mut self,
        id: SharedString,
        bounds: gpui::Bounds<Pixels>,
        draggable: bool,
    ) {
        let bounds = to_bounds(bounds);
        self.items.insert(id, RowBox { bounds, draggable });
    }

    pub(crate) fn record_placeholder(&mut self, bounds: gpui::Bounds<Pixels>) {
        self.placeholder = Some(to_bounds(bounds));
    }

    /// Forget boxes of rows that are no longer rendered.
    pub(crate) fn retain_items(&mut self, mut rendered: impl FnMut(&SharedString) -> bool) {
        self.items.retain(|id, _| rendered(id));
    }

    pub(crate) fn clear_placeholder(&mut self) {
        self.placeholder = None;
    }

    pub(crate) fn visual(&self, id: &SharedString) -> ItemVisual {
        self.visuals.get(id).copied().unwrap_or_default()
    }

    /// Frame tickets requested since the last call, oldest first.
    pub(crate) fn take_frame_requests(&mut self) -> Vec<FrameTicket> {
        std::mem::take(&mut self.frames)
    }

    pub(crate) fn is_listening(&self) -> bool {
        self.listening
    }

    pub(crate) fn page_overrides(&self) -> bool {
        self.page_overrides
    }

    fn content_size(&self) -> Option<Size> {
        let mut boxes = self.items.values().map(|row| row.bounds);
        let first = boxes.next()?;
        let (mut left, mut top) = (first.left(), first.top());
        let (mut right, mut bottom) = (first.right(), first.bottom());
        for b in boxes {
            left = left.min(b.left());
            top = top.min(b.top());
            right = right.max(b.right());
            bottom = bottom.max(b.bottom());
        }
        Some(Size::new(right - left, bottom - top))
    }
}

impl DragHost<SharedString> for SortSurface {
    fn container_style(&self) -> ContainerStyle {
        self.style
    }

    fn item_box(&self, key: &SharedString) -> Option<ItemBox> {
        self.items.get(key).map(|row| ItemBox::new(row.bounds))
    }

    fn hit_test(&self, point: Point) -> Option<HitTarget<SharedString>> {
        if self.placeholder.is_some_and(|b| b.contains(point)) {
            return Some(HitTarget::Placeholder);
        }
        self.items
            .iter()
            .find(|(_, row)| row.draggable && row.bounds.contains(point))
            .map(|(id, _)| HitTarget::Item(id.clone()))
    }

    fn scroll_metrics(&self, container_classes: &[String]) -> Option<ScrollMetrics> {
        if !container_classes
            .iter()
            .any(|class| class.as_str() == self.container_id.as_ref())
        {
            return None;
        }
        Some(ScrollMetrics {
            content: self.content_size()?,
            viewport: self.container?.size,
        })
    }

    fn capture_pointer(&mut self, pointer: PointerId) -> Result<(), DndSortError> {
        self.captured = Some(pointer);
        Ok(())
    }

    fn release_pointer(&mut self, pointer: PointerId) {
        if self.captured == Some(pointer) {
            self.captured = None;
        }
    }

    fn request_frame(&mut self, ticket: FrameTicket) {
        self.frames.push(ticket);
    }

    fn cancel_frame(&mut self, ticket: FrameTicket) {
        // Already handed to gpui; the controller drops stale tickets itself.
        self.frames.retain(|t| *t != ticket);
    }

    fn item_visual(&self, key: &SharedString) -> ItemVisual {
        self.visual(key)
    }

    fn set_item_visual(&mut self, key: &SharedString, visual: ItemVisual) {
        if visual == ItemVisual::default() {
            self.visuals.remove(key);
        } else {
            self.visuals.insert(key.clone(), visual);
        }
    }

    fn set_drag_listeners(&mut self, attached: bool) {
        self.listening = attached;
    }

    fn set_page_overrides(&mut self, active: bool) {
        self.page_overrides = active;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use gpui::{point, px, size};
    use gpui_dnd_sort_core::{
        DndSortConfig, DragController, MoveResponse, PointerEvent, PointerTarget, Slot,
    };

    fn rect(x: f32, y: f32, w: f32, h: f32) -> gpui::Bounds<Pixels> {
        gpui::Bounds::new(point(px(x), px(y)), size(px(w), px(h)))
    }

    fn surface(id: &'static str) -> SortSurface {
        let mut surface = SortSurface::new(id.into(), ContainerStyle::stack());
        surface.record_item("a".into(), rect(0., 0., 200., 40.), true);
        surface.record_item("b".into(), rect(0., 40., 200., 40.), true);
        surface.record_item("c".into(), rect(0., 80., 200., 40.), true);
        surface
    }

    #[test]
    fn hit_test_prefers_the_placeholder() {
        let mut surface = surface("category-list");
        assert_eq!(
            surface.hit_test(Point::new(10., 50.)),
            Some(HitTarget::Item("b".into()))
        );
        surface.record_placeholder(rect(0., 40., 200., 40.));
        assert_eq!(
            surface.hit_test(Point::new(10., 50.)),
            Some(HitTarget::Placeholder)
        );
        assert_eq!(surface.hit_test(Point::new(10., 500.)), None);
    }

    #[test]
    fn fixed_rows_are_not_hit() {
        let mut surface = surface("category-list");
        surface.record_item("all".into(), rect(0., 120., 200., 40.), false);
        assert_eq!(surface.hit_test(Point::new(10., 130.)), None);
        assert!(surface.item_box(&"all".into()).is_some());
    }

    #[test]
    fn dragging_over_a_pinned_header_moves_to_the_front() {
        let mut surface = SortSurface::new("category-list".into(), ContainerStyle::stack());
        surface.record_item("all".into(), rect(0., 0., 200., 40.), false);
        surface.record_item("a".into(), rect(0., 40., 200., 40.), true);
        surface.record_item("b".into(), rect(0., 80., 200., 40.), true);
        surface.record_item("c".into(), rect(0., 120., 200., 40.), true);
        let mut controller = DragController::new(DndSortConfig::default()).items([
            Slot::Fixed("all".into()),
            Slot::Item("a".into()),
            Slot::Item("b".into()),
            Slot::Item("c".into()),
        ]);

        let c: SharedString = "c".into();
        let down = PointerEvent::mouse(10., 130., Duration::ZERO);
        controller.pointer_down(&down, &PointerTarget::item(c.clone()), &mut surface);
        let promote = PointerEvent::mouse(10., 150., Duration::from_millis(16));
        assert_eq!(
            controller.pointer_move(&promote, &mut surface),
            MoveResponse::DragStarted
        );

        let over_header = PointerEvent::mouse(10., 10., Duration::from_millis(32));
        controller.pointer_move(&over_header, &mut surface);
        let ticket = surface.take_frame_requests().pop().unwrap();
        assert!(controller.frame(ticket, &mut surface));
        assert_eq!(controller.order().first_item(), Some(&c));
        assert_eq!(controller.order().slots()[0], Slot::Fixed("all".into()));
    }

    #[test]
    fn scroll_metrics_only_for_listed_containers() {
        let classes = vec!["category-list".to_string()];

        let mut listed = surface("category-list");
        assert_eq!(listed.scroll_metrics(&classes), None);
        listed.container = Some(Bounds::new(0., 0., 200., 100.));
        let metrics = listed.scroll_metrics(&classes).unwrap();
        assert_eq!(metrics.content, Size::new(200., 120.));
        assert!(metrics.is_scrollable());

        let mut other = surface("sidebar");
        other.container = Some(Bounds::new(0., 0., 200., 100.));
        assert_eq!(other.scroll_metrics(&classes), None);
    }

    #[test]
    fn default_visuals_are_not_stored() {
        let mut surface = surface("tag-list");
        let id: SharedString = "a".into();
        surface.set_item_visual(&id, ItemVisual::muted());
        assert!(surface.visual(&id).dragging);
        surface.set_item_visual(&id, ItemVisual::default());
        assert!(surface.visuals.is_empty());
    }

    #[test]
    fn cancelled_frames_are_not_scheduled() {
        let mut surface = surface("tag-list");
        let mut throttle = gpui_dnd_sort_core::FrameThrottle::default();
        let first = throttle.request();
        surface.request_frame(first.ticket);
        let second = throttle.request();
        if let Some(stale) = second.superseded {
            surface.cancel_frame(stale);
        }
        surface.request_frame(second.ticket);
        assert_eq!(surface.take_frame_requests(), vec![second.ticket]);
        assert!(surface.take_frame_requests().is_empty());
    }
}

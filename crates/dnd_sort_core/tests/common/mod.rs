#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use gpui_dnd_sort_core::{
    Bounds, ContainerStyle, DndSortConfig, DndSortError, DownResponse, DragController, DragHost,
    FrameTicket, HitTarget, ItemBox, ItemVisual, MoveResponse, Point, PointerEvent, PointerId,
    PointerKind, PointerTarget, ScrollMetrics, SessionEnd, Size, Slot,
};

pub type Key = &'static str;

pub const ROW_HEIGHT: f32 = 40.;
pub const CHIP_WIDTH: f32 = 60.;
pub const CHIP_HEIGHT: f32 = 28.;
pub const CONTAINER_WIDTH: f32 = 200.;

/// Lays children out like a browser would: a vertical stack of rows or wrapping chips.
pub struct TestHost {
    pub style: ContainerStyle,
    pub scroll: Option<ScrollMetrics>,
    pub capture_fails: bool,
    pub captured: Option<PointerId>,
    pub requested: Vec<FrameTicket>,
    pub cancelled: Vec<FrameTicket>,
    pub listeners: bool,
    pub page_overrides: bool,
    pub visuals: HashMap<Key, ItemVisual>,
    boxes: Vec<(Slot<Key>, Bounds)>,
}

impl TestHost {
    pub fn new(style: ContainerStyle) -> Self {
        Self {
            style,
            scroll: None,
            capture_fails: false,
            captured: None,
            requested: Vec::new(),
            cancelled: Vec::new(),
            listeners: false,
            page_overrides: false,
            visuals: HashMap::new(),
            boxes: Vec::new(),
        }
    }

    pub fn reflow(&mut self, slots: &[Slot<Key>]) {
        self.boxes.clear();
        let horizontal = self.style.orientation().is_horizontal();
        let (mut x, mut y) = (0., 0.);
        for slot in slots {
            let bounds = if horizontal {
                if x + CHIP_WIDTH > CONTAINER_WIDTH {
                    x = 0.;
                    y += CHIP_HEIGHT;
                }
                let bounds = Bounds::new(x, y, CHIP_WIDTH, CHIP_HEIGHT);
                x += CHIP_WIDTH;
                bounds
            } else {
                let bounds = Bounds::new(0., y, CONTAINER_WIDTH, ROW_HEIGHT);
                y += ROW_HEIGHT;
                bounds
            };
            self.boxes.push((slot.clone(), bounds));
        }
    }

    pub fn center_of(&self, key: Key) -> Point {
        self.item_box(&key)
            .map(|b| b.bounds.center())
            .unwrap_or_default()
    }

    pub fn visual(&self, key: Key) -> ItemVisual {
        self.visuals.get(key).copied().unwrap_or_default()
    }

    pub fn live_frames(&self) -> Vec<FrameTicket> {
        self.requested
            .iter()
            .filter(|t| !self.cancelled.contains(t))
            .copied()
            .collect()
    }
}

impl DragHost<Key> for TestHost {
    fn container_style(&self) -> ContainerStyle {
        self.style
    }

    fn item_box(&self, key: &Key) -> Option<ItemBox> {
        self.boxes
            .iter()
            .find(|(slot, _)| slot.as_item() == Some(key))
            .map(|(_, bounds)| ItemBox::new(*bounds))
    }

    fn hit_test(&self, point: Point) -> Option<HitTarget<Key>> {
        let (slot, _) = self.boxes.iter().find(|(_, b)| b.contains(point))?;
        match slot {
            Slot::Item(key) => Some(HitTarget::Item(*key)),
            Slot::Placeholder => Some(HitTarget::Placeholder),
            Slot::Fixed(_) => None,
        }
    }

    fn scroll_metrics(&self, _container_classes: &[String]) -> Option<ScrollMetrics> {
        self.scroll
    }

    fn capture_pointer(&mut self, pointer: PointerId) -> Result<(), DndSortError> {
        if self.capture_fails {
            return Err(DndSortError::PointerCapture {
                pointer,
                reason: "element detached".into(),
            });
        }
        self.captured = Some(pointer);
        Ok(())
    }

    fn release_pointer(&mut self, pointer: PointerId) {
        assert_eq!(self.captured, Some(pointer), "released a pointer never captured");
        self.captured = None;
    }

    fn request_frame(&mut self, ticket: FrameTicket) {
        self.requested.push(ticket);
    }

    fn cancel_frame(&mut self, ticket: FrameTicket) {
        self.cancelled.push(ticket);
    }

    fn item_visual(&self, key: &Key) -> ItemVisual {
        self.visual(key)
    }

    fn set_item_visual(&mut self, key: &Key, visual: ItemVisual) {
        self.visuals.insert(*key, visual);
    }

    fn set_drag_listeners(&mut self, attached: bool) {
        self.listeners = attached;
    }

    fn set_page_overrides(&mut self, active: bool) {
        self.page_overrides = active;
    }
}

/// A controller wired to a [`TestHost`], re-laid out after every call.
pub struct Rig {
    pub controller: DragController<Key>,
    pub host: TestHost,
    pub drops: Rc<RefCell<Vec<(usize, usize)>>>,
    pub kind: PointerKind,
    pub now: Duration,
}

impl Rig {
    pub fn new(style: ContainerStyle, slots: Vec<Slot<Key>>, config: DndSortConfig) -> Self {
        let drops = Rc::new(RefCell::new(Vec::new()));
        let controller = DragController::new(config).items(slots).on_drop({
            let drops = drops.clone();
            move |reorder| drops.borrow_mut().push((reorder.from, reorder.to))
        });
        let mut rig = Self {
            controller,
            host: TestHost::new(style),
            drops,
            kind: PointerKind::Mouse,
            now: Duration::ZERO,
        };
        rig.reflow();
        rig
    }

    pub fn stack(keys: &[Key]) -> Self {
        Self::new(
            ContainerStyle::stack(),
            keys.iter().copied().map(Slot::Item).collect(),
            DndSortConfig::default(),
        )
    }

    pub fn wrap(keys: &[Key]) -> Self {
        Self::new(
            ContainerStyle::wrapping_row(),
            keys.iter().copied().map(Slot::Item).collect(),
            DndSortConfig::default(),
        )
    }

    pub fn touch(mut self) -> Self {
        self.kind = PointerKind::Touch;
        self
    }

    pub fn scrollable(mut self) -> Self {
        self.host.scroll = Some(ScrollMetrics {
            content: Size::new(CONTAINER_WIDTH, 2_000.),
            viewport: Size::new(CONTAINER_WIDTH, 300.),
        });
        self
    }

    pub fn reflow(&mut self) {
        let slots = self.controller.order().slots().to_vec();
        self.host.reflow(&slots);
    }

    fn event(&self, point: Point) -> PointerEvent {
        PointerEvent::new(self.kind, point, self.now)
    }

    pub fn down_at(&mut self, key: Key, point: Point) -> DownResponse {
        let event = self.event(point);
        let response = self
            .controller
            .pointer_down(&event, &PointerTarget::item(key), &mut self.host);
        self.reflow();
        response
    }

    /// Press on the center of `key`.
    pub fn down(&mut self, key: Key) -> Point {
        let point = self.host.center_of(key);
        self.down_at(key, point);
        point
    }

    pub fn move_to(&mut self, point: Point) -> MoveResponse {
        self.now += Duration::from_millis(16);
        let event = self.event(point);
        let response = self.controller.pointer_move(&event, &mut self.host);
        self.reflow();
        response
    }

    /// Run the newest scheduled frame, like the next paint would.
    pub fn run_frame(&mut self) -> bool {
        let Some(ticket) = self.host.live_frames().last().copied() else {
            return false;
        };
        let moved = self.controller.frame(ticket, &mut self.host);
        self.reflow();
        moved
    }

    pub fn drag_to(&mut self, point: Point) -> bool {
        self.move_to(point);
        self.run_frame()
    }

    /// Press on `key` and move far enough to start dragging it.
    pub fn start(&mut self, key: Key) -> Point {
        let origin = self.down(key);
        let response = self.move_to(Point::new(origin.x, origin.y + 10.));
        assert_eq!(response, MoveResponse::DragStarted);
        origin
    }

    pub fn up(&mut self) -> SessionEnd<Key> {
        let event = self.event(Point::default());
        let end = self.controller.pointer_up(&event, &mut self.host);
        self.reflow();
        end
    }

    pub fn cancel(&mut self) -> SessionEnd<Key> {
        let event = self.event(Point::default());
        let end = self.controller.pointer_cancel(&event, &mut self.host);
        self.reflow();
        end
    }

    pub fn order(&self) -> Vec<Key> {
        self.controller.order().items().copied().collect()
    }

    pub fn drops(&self) -> Vec<(usize, usize)> {
        self.drops.borrow().clone()
    }

    /// Nothing of a session is left behind.
    pub fn assert_clean(&self) {
        assert!(self.controller.is_idle());
        assert!(self.controller.ghost().is_none());
        assert_eq!(self.controller.order().placeholder_count(), 0);
        assert!(!self.host.listeners);
        assert!(!self.host.page_overrides);
        assert_eq!(self.host.captured, None);
        assert!(self.host.visuals.values().all(|v| !v.dragging));
    }
}

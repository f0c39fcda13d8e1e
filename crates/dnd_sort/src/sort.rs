use std::rc::Rc;
use std::time::Instant;

use gpui::{
    AnyElement, App, Context, CursorStyle, ElementId, Entity, FocusHandle, Hsla,
    InteractiveElement as _, IntoElement, KeyDownEvent, MouseButton, MouseDownEvent,
    MouseMoveEvent, MouseUpEvent, ParentElement as _, Pixels, Render, RenderOnce, SharedString,
    StatefulInteractiveElement as _, StyleRefinement, Styled, Window, anchored, canvas, deferred,
    div, point, prelude::FluentBuilder as _, px,
};
use gpui_component::{ActiveTheme as _, StyledExt as _};
use gpui_dnd_sort_core::{
    ContainerStyle, DndSortConfig, DownResponse, DragController, Ghost, LiveOrder, MoveResponse,
    Placeholder, PointerEvent, PointerKind, PointerTarget, Reorder, SessionEnd, Slot,
};
use tracing::debug;

use crate::surface::{SortSurface, to_point};

const CONTEXT: &str = "DndSort";
const HANDLE: &str = "dnd-sort-handle";
const DEFAULT_HANDLE_WIDTH: Pixels = px(24.);

/// A committed move. `from` and `to` count draggable items only.
pub type DndSortReorder = Reorder<SharedString>;

type CanDrop<T> = Rc<dyn Fn(&DndSortReorder, &[DndSortItem<T>]) -> bool>;

type RenderItem<T> =
    Rc<dyn Fn(usize, &DndSortItem<T>, DndSortRowState, &mut Window, &mut App) -> AnyElement>;

/// Create a [`DndSort`].
pub fn dnd_sort<T, R>(state: &Entity<DndSortState<T>>, render_item: R) -> DndSort<T>
where
    T: 'static,
    R: Fn(usize, &DndSortItem<T>, DndSortRowState, &mut Window, &mut App) -> AnyElement + 'static,
{
    DndSort::new(state, render_item)
}

/// A single child of a [`DndSortState`].
#[derive(Clone)]
pub struct DndSortItem<T> {
    pub id: SharedString,
    pub label: SharedString,
    pub data: T,
    disabled: bool,
}

impl<T> DndSortItem<T> {
    pub fn new(id: impl Into<SharedString>, label: impl Into<SharedString>, data: T) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            data,
            disabled: false,
        }
    }

    /// A disabled item stays where it is and is skipped when counting indices.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn slot(&self) -> Slot<SharedString> {
        if self.disabled {
            Slot::Fixed(self.id.clone())
        } else {
            Slot::Item(self.id.clone())
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DndSortLayout {
    /// One item per line.
    #[default]
    Stack,
    /// Items flow left to right and wrap, like a tag cloud.
    Wrap,
}

impl DndSortLayout {
    fn container_style(self) -> ContainerStyle {
        match self {
            DndSortLayout::Stack => ContainerStyle::stack(),
            DndSortLayout::Wrap => ContainerStyle::wrapping_row(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DndSortRowState {
    /// The item is being dragged; it stays in flow, muted.
    pub dragging: bool,
    /// Rendering the floating copy under the pointer.
    pub ghost: bool,
    pub disabled: bool,
}

struct DndSortStateCallbacks<T> {
    can_drop: Option<CanDrop<T>>,
    on_reorder: Option<Rc<dyn Fn(&DndSortReorder, &[DndSortItem<T>])>>,
}

impl<T> Default for DndSortStateCallbacks<T> {
    fn default() -> Self {
        Self {
            can_drop: None,
            on_reorder: None,
        }
    }
}

/// State for a container whose children can be reordered by dragging.
pub struct DndSortState<T> {
    focus_handle: FocusHandle,
    items: Vec<DndSortItem<T>>,
    /// Children handed in while a drag was running.
    queued_items: Option<Vec<DndSortItem<T>>>,
    layout: DndSortLayout,
    drag_handle_width: Option<Pixels>,
    controller: DragController<SharedString>,
    surface: SortSurface,
    epoch: Instant,
    callbacks: DndSortStateCallbacks<T>,
    render_item: RenderItem<T>,
}

impl<T: 'static> DndSortState<T> {
    pub fn new(cx: &mut App) -> Self {
        let layout = DndSortLayout::default();
        Self {
            focus_handle: cx.focus_handle(),
            items: Vec::new(),
            queued_items: None,
            layout,
            drag_handle_width: None,
            controller: DragController::new(DndSortConfig::default()),
            surface: SortSurface::new("dnd-sort".into(), layout.container_style()),
            epoch: Instant::now(),
            callbacks: DndSortStateCallbacks::default(),
            render_item: Rc::new(|_, _, _, _, _| div().into_any_element()),
        }
    }

    pub fn items(mut self, items: impl Into<Vec<DndSortItem<T>>>) -> Self {
        self.items = items.into();
        self.sync_order();
        self
    }

    pub fn layout(mut self, layout: DndSortLayout) -> Self {
        self.layout = layout;
        self.surface.style = layout.container_style();
        self
    }

    /// Name the container so touch gestures know whether it scrolls.
    ///
    /// Only names listed in [`DndSortConfig::scroll_containers`] are measured.
    pub fn container_class(mut self, class: impl Into<SharedString>) -> Self {
        self.surface.container_id = class.into();
        self
    }

    /// Restrict drag start to a left-side handle area with the given width.
    pub fn drag_handle_width(mut self, width: Pixels) -> Self {
        self.drag_handle_width = Some(width);
        let config = self.controller.config().clone();
        self.apply_config(config);
        self
    }

    /// Allow dragging from anywhere on the item. This is the default.
    ///
    /// Clears any configured handle.
    pub fn drag_on_row(mut self) -> Self {
        self.drag_handle_width = None;
        let mut config = self.controller.config().clone();
        config.handle = None;
        self.apply_config(config);
        self
    }

    pub fn config(mut self, config: DndSortConfig) -> Self {
        self.apply_config(config);
        self
    }

    /// Provide a predicate to control whether a finished drag is kept.
    ///
    /// A refused drop puts the item back where it started.
    pub fn can_drop(
        mut self,
        can_drop: impl Fn(&DndSortReorder, &[DndSortItem<T>]) -> bool + 'static,
    ) -> Self {
        self.callbacks.can_drop = Some(Rc::new(can_drop));
        self
    }

    /// Provide a callback invoked after a successful reorder, with the items in their new order.
    pub fn on_reorder(
        mut self,
        on_reorder: impl Fn(&DndSortReorder, &[DndSortItem<T>]) + 'static,
    ) -> Self {
        self.callbacks.on_reorder = Some(Rc::new(on_reorder));
        self
    }

    /// Replace the children. While a drag runs they are queued until it ends.
    pub fn set_items(&mut self, items: impl Into<Vec<DndSortItem<T>>>, cx: &mut Context<Self>) {
        let items = items.into();
        if self.controller.is_dragging() {
            self.queued_items = Some(items);
            return;
        }
        self.items = items;
        self.sync_order();
        cx.notify();
    }

    pub fn set_layout(&mut self, layout: DndSortLayout, cx: &mut Context<Self>) {
        self.layout = layout;
        self.surface.style = layout.container_style();
        cx.notify();
    }

    /// Swap options at runtime. Disabling mid-drag puts the item back silently.
    pub fn set_config(&mut self, config: DndSortConfig, cx: &mut Context<Self>) {
        if let Some(end) = self.apply_config(config) {
            self.on_session_end(end, cx);
        }
        cx.notify();
    }

    pub fn items_ref(&self) -> &[DndSortItem<T>] {
        &self.items
    }

    pub fn dnd_config(&self) -> &DndSortConfig {
        self.controller.config()
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    fn apply_config(&mut self, config: DndSortConfig) -> Option<SessionEnd<SharedString>> {
        let config = with_handle(config, self.drag_handle_width);
        self.controller.configure(config, &mut self.surface)
    }

    fn sync_order(&mut self) {
        let slots = self.items.iter().map(DndSortItem::slot).collect::<Vec<_>>();
        self.controller.sync_items(slots, &mut self.surface);
    }

    fn pointer_event(&self, position: gpui::Point<Pixels>) -> PointerEvent {
        PointerEvent::new(PointerKind::Mouse, to_point(position), self.epoch.elapsed())
    }

    fn on_item_mouse_down(
        &mut self,
        target: PointerTarget<SharedString>,
        event: &MouseDownEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let pointer = self.pointer_event(event.position);
        let response = self
            .controller
            .pointer_down(&pointer, &target, &mut self.surface);
        if response == DownResponse::Pending {
            window.focus(&self.focus_handle);
            cx.notify();
        }
    }

    fn on_mouse_move(
        &mut self,
        event: &MouseMoveEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let pointer = self.pointer_event(event.position);
        if event.pressed_button != Some(MouseButton::Left) {
            // The button was released outside the window.
            let end = self.controller.pointer_cancel(&pointer, &mut self.surface);
            self.on_session_end(end, cx);
            return;
        }

        let response = self.controller.pointer_move(&pointer, &mut self.surface);
        if response.prevent_default() {
            window.prevent_default();
            cx.stop_propagation();
        }
        for ticket in self.surface.take_frame_requests() {
            cx.on_next_frame(window, move |this, _window, cx| {
                this.controller.frame(ticket, &mut this.surface);
                cx.notify();
            });
        }
        if response == MoveResponse::DragStarted {
            cx.notify();
        }
    }

    fn on_mouse_up(&mut self, event: &MouseUpEvent, _window: &mut Window, cx: &mut Context<Self>) {
        if event.button != MouseButton::Left {
            return;
        }
        let pointer = self.pointer_event(event.position);
        let end = self.controller.pointer_up(&pointer, &mut self.surface);
        self.on_session_end(end, cx);
    }

    fn on_key_down(&mut self, event: &KeyDownEvent, _window: &mut Window, cx: &mut Context<Self>) {
        if event.keystroke.key != "escape" || self.controller.is_idle() {
            return;
        }
        let pointer = self.pointer_event(point(px(0.), px(0.)));
        let end = self.controller.pointer_cancel(&pointer, &mut self.surface);
        self.on_session_end(end, cx);
        cx.stop_propagation();
    }

    fn on_session_end(&mut self, end: SessionEnd<SharedString>, cx: &mut Context<Self>) {
        match &end {
            SessionEnd::Ignored => return,
            SessionEnd::Committed(reorder) => {
                let can_drop = self.callbacks.can_drop.as_ref();
                let allowed =
                    settle_commit(&mut self.items, self.controller.order(), reorder, can_drop);
                if allowed {
                    debug!(
                        item = %reorder.item,
                        from = reorder.from,
                        to = reorder.to,
                        "items reordered"
                    );
                    if let Some(on_reorder) = self.callbacks.on_reorder.as_ref() {
                        on_reorder(reorder, &self.items);
                    }
                } else {
                    debug!(item = %reorder.item, "reorder refused");
                    self.sync_order();
                }
            }
            _ => {}
        }

        if replay_queued(&mut self.items, &mut self.queued_items) {
            self.sync_order();
        }
        self.surface.clear_placeholder();
        cx.notify();
    }

    fn render_row(
        &self,
        ix: usize,
        item: &DndSortItem<T>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> AnyElement {
        let id = item.id.clone();
        let visual = self.surface.visual(&id);
        let row_state = DndSortRowState {
            dragging: self.controller.row_state(&id).dragging,
            ghost: false,
            disabled: item.is_disabled(),
        };
        let content = (self.render_item)(ix, item, row_state, window, cx);
        let enabled = !item.is_disabled();
        let draggable = enabled && visual.pointer_events;
        let handle = handle_area(self.controller.config(), self.drag_handle_width);
        let state = cx.entity();

        div()
            .id(ElementId::Name(id.clone()))
            .relative()
            .flex_shrink_0()
            .opacity(visual.opacity)
            .child(content)
            .child(
                canvas(
                    {
                        let id = id.clone();
                        move |bounds, _window, cx| {
                            state.update(cx, |this, _| {
                                this.surface.record_item(id, bounds, enabled)
                            });
                        }
                    },
                    |_, _, _, _| {},
                )
                .absolute()
                .top_0()
                .left_0()
                .size_full(),
            )
            .when(draggable, |this| match handle {
                Some((handle_width, marker)) => this.child(
                    div()
                        .id(("dnd-sort-handle", ix))
                        .absolute()
                        .top_0()
                        .left_0()
                        .bottom_0()
                        .w(handle_width)
                        .cursor(CursorStyle::OpenHand)
                        .on_mouse_down(
                            MouseButton::Left,
                            cx.listener({
                                let id = id.clone();
                                move |this, event, window, cx| {
                                    let target =
                                        PointerTarget::item(id.clone()).in_handle(marker.clone());
                                    this.on_item_mouse_down(target, event, window, cx);
                                    cx.stop_propagation();
                                }
                            }),
                        ),
                ),
                None => this.cursor(CursorStyle::OpenHand).on_mouse_down(
                    MouseButton::Left,
                    cx.listener(move |this, event, window, cx| {
                        this.on_item_mouse_down(PointerTarget::item(id.clone()), event, window, cx);
                    }),
                ),
            })
            .into_any_element()
    }

    fn render_placeholder(
        &self,
        placeholder: &Placeholder,
        fill: Hsla,
        border: Hsla,
        cx: &mut Context<Self>,
    ) -> AnyElement {
        let state = cx.entity();
        let margin = placeholder.margin;
        div()
            .id("dnd-sort-placeholder")
            .relative()
            .flex_shrink_0()
            .h(px(placeholder.height))
            .map(|this| match placeholder.width {
                Some(width) => this.w(px(width)),
                None => this.w_full(),
            })
            .mt(px(margin.top))
            .mr(px(margin.right))
            .mb(px(margin.bottom))
            .ml(px(margin.left))
            .rounded(px(6.))
            .when(placeholder.style.border_width > 0., |this| {
                this.border_2().border_color(border)
            })
            .bg(fill.alpha(placeholder.style.background_alpha))
            .child(
                canvas(
                    move |bounds, _window, cx| {
                        state.update(cx, |this, _| this.surface.record_placeholder(bounds));
                    },
                    |_, _, _, _| {},
                )
                .absolute()
                .top_0()
                .left_0()
                .size_full(),
            )
            .into_any_element()
    }

    fn render_ghost(
        &self,
        ghost: &Ghost<SharedString>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Option<AnyElement> {
        let item = self.items.iter().find(|item| item.id == ghost.source)?;
        let ix = self
            .controller
            .order()
            .item_index(&ghost.source)
            .unwrap_or_default();
        let row_state = DndSortRowState {
            dragging: true,
            ghost: true,
            disabled: false,
        };
        let content = (self.render_item)(ix, item, row_state, window, cx);

        let style = ghost.style;
        let origin = ghost.position();
        let size = ghost.bounds.size;
        Some(
            deferred(
                anchored().position(point(px(origin.x), px(origin.y))).child(
                    div()
                        .w(px(size.width * style.scale))
                        .h(px(size.height * style.scale))
                        .opacity(style.opacity)
                        .shadow_lg()
                        .child(content),
                ),
            )
            .with_priority(1)
            .into_any_element(),
        )
    }
}

/// Keep a caller-configured handle; a handle width without one uses the built-in marker.
fn with_handle(mut config: DndSortConfig, handle_width: Option<Pixels>) -> DndSortConfig {
    if handle_width.is_some() && config.handle.is_none() {
        config.handle = Some(HANDLE.to_string());
    }
    config
}

/// Width and marker of the grip child, if drags must start from one.
fn handle_area(config: &DndSortConfig, handle_width: Option<Pixels>) -> Option<(Pixels, String)> {
    let marker = config.handle.clone()?;
    Some((handle_width.unwrap_or(DEFAULT_HANDLE_WIDTH), marker))
}

/// Apply a committed move to `items`, or put them back if `can_drop` refuses it.
///
/// Returns whether the move was kept.
fn settle_commit<T>(
    items: &mut [DndSortItem<T>],
    order: &LiveOrder<SharedString>,
    reorder: &DndSortReorder,
    can_drop: Option<&CanDrop<T>>,
) -> bool {
    let previous = LiveOrder::new(items.iter().map(DndSortItem::slot));
    arrange(items, order);
    let allowed = can_drop.is_none_or(|can_drop| can_drop(reorder, items));
    if !allowed {
        arrange(items, &previous);
    }
    allowed
}

/// Swap in children handed over during the drag. Returns whether there were any.
fn replay_queued<T>(
    items: &mut Vec<DndSortItem<T>>,
    queued: &mut Option<Vec<DndSortItem<T>>>,
) -> bool {
    match queued.take() {
        Some(next) => {
            *items = next;
            true
        }
        None => false,
    }
}

/// Reorder `items` to follow `order`. Items missing from `order` keep their relative order.
fn arrange<T>(items: &mut [DndSortItem<T>], order: &LiveOrder<SharedString>) {
    let position = |id: &SharedString| {
        order.slots().iter().position(|slot| match slot {
            Slot::Item(key) | Slot::Fixed(key) => key == id,
            Slot::Placeholder => false,
        })
    };
    items.sort_by_key(|item| position(&item.id).unwrap_or(usize::MAX));
}

impl<T: 'static> Render for DndSortState<T> {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let items = &self.items;
        self.surface
            .retain_items(|id| items.iter().any(|item| item.id == *id));
        if self.controller.placeholder().is_none() {
            self.surface.clear_placeholder();
        }

        let fill = cx.theme().drop_target;
        let border = cx.theme().drag_border;
        let mut children = Vec::with_capacity(self.controller.order().len());
        let mut ix = 0;
        for slot in self.controller.order().slots() {
            match slot {
                Slot::Placeholder => {
                    if let Some(placeholder) = self.controller.placeholder() {
                        children.push(self.render_placeholder(placeholder, fill, border, cx));
                    }
                }
                Slot::Item(id) | Slot::Fixed(id) => {
                    let Some(item) = self.items.iter().find(|item| item.id == *id) else {
                        continue;
                    };
                    children.push(self.render_row(ix, item, window, cx));
                    ix += 1;
                }
            }
        }
        let ghost = self
            .controller
            .ghost()
            .and_then(|ghost| self.render_ghost(ghost, window, cx));

        let state = cx.entity();
        div()
            .id(self.surface.container_id.clone())
            .key_context(CONTEXT)
            .track_focus(&self.focus_handle)
            .on_key_down(cx.listener(Self::on_key_down))
            .relative()
            .w_full()
            .map(|this| match self.layout {
                DndSortLayout::Stack => this.flex().flex_col().gap_1().h_full().overflow_y_scroll(),
                DndSortLayout::Wrap => this.flex().flex_row().flex_wrap().gap_2(),
            })
            .when(self.surface.page_overrides(), |this| {
                this.cursor(CursorStyle::ClosedHand)
            })
            .child(
                canvas(
                    {
                        let state = state.clone();
                        move |bounds, _window, cx| {
                            state.update(cx, |this, _| {
                                this.surface.container = Some(crate::surface::to_bounds(bounds));
                                this.surface.is_listening()
                            })
                        }
                    },
                    move |_, listening, window, _cx| {
                        if !listening {
                            return;
                        }
                        window.on_mouse_event({
                            let state = state.clone();
                            move |event: &MouseMoveEvent, phase, window, cx| {
                                if !phase.bubble() {
                                    return;
                                }
                                state.update(cx, |this, cx| this.on_mouse_move(event, window, cx));
                            }
                        });
                        window.on_mouse_event(move |event: &MouseUpEvent, phase, window, cx| {
                            if !phase.bubble() {
                                return;
                            }
                            state.update(cx, |this, cx| this.on_mouse_up(event, window, cx));
                        });
                    },
                )
                .absolute()
                .top_0()
                .left_0()
                .size_full(),
            )
            .children(children)
            .children(ghost)
    }
}

/// A container element whose children can be reordered by dragging.
#[derive(IntoElement)]
pub struct DndSort<T: 'static> {
    id: ElementId,
    state: Entity<DndSortState<T>>,
    style: StyleRefinement,
    render_item: RenderItem<T>,
}

impl<T: 'static> DndSort<T> {
    pub fn new<R>(state: &Entity<DndSortState<T>>, render_item: R) -> Self
    where
        R: Fn(usize, &DndSortItem<T>, DndSortRowState, &mut Window, &mut App) -> AnyElement
            + 'static,
    {
        Self {
            id: ElementId::Name(format!("dnd-sort-{}", state.entity_id()).into()),
            state: state.clone(),
            style: StyleRefinement::default(),
            render_item: Rc::new(render_item),
        }
    }
}

impl<T: 'static> Styled for DndSort<T> {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl<T: 'static> RenderOnce for DndSort<T> {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        self.state
            .update(cx, |state, _| state.render_item = self.render_item);

        div()
            .id(self.id)
            .w_full()
            .child(self.state)
            .refine_style(&self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<DndSortItem<()>> {
        vec![
            DndSortItem::new("all", "All spots", ()).disabled(true),
            DndSortItem::new("food", "Food", ()),
            DndSortItem::new("parks", "Parks", ()),
            DndSortItem::new("museums", "Museums", ()),
        ]
    }

    fn ids(items: &[DndSortItem<()>]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_ref()).collect()
    }

    #[test]
    fn disabled_items_become_fixed_slots() {
        let slots = items().iter().map(DndSortItem::slot).collect::<Vec<_>>();
        assert_eq!(slots[0], Slot::Fixed("all".into()));
        assert_eq!(slots[1], Slot::Item("food".into()));
    }

    #[test]
    fn arrange_follows_the_live_order() {
        let mut items = items();
        let order = LiveOrder::new([
            Slot::Fixed("all".into()),
            Slot::Item("museums".into()),
            Slot::Placeholder,
            Slot::Item("food".into()),
            Slot::Item("parks".into()),
        ]);
        arrange(&mut items, &order);
        assert_eq!(ids(&items), ["all", "museums", "food", "parks"]);
    }

    #[test]
    fn arrange_keeps_unknown_items_at_the_end() {
        let mut items = items();
        items.push(DndSortItem::new("beaches", "Beaches", ()));
        let order = LiveOrder::new([
            Slot::Fixed("all".into()),
            Slot::Item("parks".into()),
            Slot::Item("food".into()),
            Slot::Item("museums".into()),
        ]);
        arrange(&mut items, &order);
        assert_eq!(ids(&items), ["all", "parks", "food", "museums", "beaches"]);
    }

    fn reorder(item: &str, from: usize, to: usize) -> DndSortReorder {
        Reorder {
            item: SharedString::from(item.to_string()),
            from,
            to,
        }
    }

    fn dragged_museums_first() -> LiveOrder<SharedString> {
        LiveOrder::new([
            Slot::Fixed("all".into()),
            Slot::Item("museums".into()),
            Slot::Item("food".into()),
            Slot::Item("parks".into()),
        ])
    }

    #[test]
    fn committed_move_is_kept_when_allowed() {
        let mut items = items();
        let can_drop: CanDrop<()> =
            Rc::new(|reorder: &DndSortReorder, items: &[DndSortItem<()>]| {
                reorder.to == 0 && items[1].id.as_ref() == "museums"
            });
        let kept = settle_commit(
            &mut items,
            &dragged_museums_first(),
            &reorder("museums", 2, 0),
            Some(&can_drop),
        );
        assert!(kept);
        assert_eq!(ids(&items), ["all", "museums", "food", "parks"]);
    }

    #[test]
    fn refused_move_restores_the_items() {
        let mut items = items();
        let can_drop: CanDrop<()> =
            Rc::new(|_: &DndSortReorder, items: &[DndSortItem<()>]| items[1].id.as_ref() == "food");
        let kept = settle_commit(
            &mut items,
            &dragged_museums_first(),
            &reorder("museums", 2, 0),
            Some(&can_drop),
        );
        assert!(!kept);
        assert_eq!(ids(&items), ["all", "food", "parks", "museums"]);
    }

    #[test]
    fn queued_items_replace_the_settled_ones() {
        let mut items = items();
        let order = dragged_museums_first();
        settle_commit(&mut items, &order, &reorder("museums", 2, 0), None);

        let mut queued = None;
        assert!(!replay_queued(&mut items, &mut queued));
        assert_eq!(ids(&items), ["all", "museums", "food", "parks"]);

        queued = Some(vec![DndSortItem::new("beaches", "Beaches", ())]);
        assert!(replay_queued(&mut items, &mut queued));
        assert_eq!(ids(&items), ["beaches"]);
        assert!(queued.is_none());
    }

    #[test]
    fn configured_handle_survives_a_handle_width() {
        let config = DndSortConfig::default().handle("grip");
        let config = with_handle(config, Some(px(28.)));
        assert_eq!(config.handle.as_deref(), Some("grip"));
        assert_eq!(
            handle_area(&config, Some(px(28.))),
            Some((px(28.), "grip".to_string()))
        );

        let config = DndSortConfig::from_json(r#"{ "handle": "grip" }"#).unwrap();
        let config = with_handle(config, None);
        assert_eq!(
            handle_area(&config, None),
            Some((DEFAULT_HANDLE_WIDTH, "grip".to_string()))
        );
    }

    #[test]
    fn handle_width_alone_uses_the_built_in_marker() {
        let config = with_handle(DndSortConfig::default(), Some(px(28.)));
        assert_eq!(config.handle.as_deref(), Some(HANDLE));
        let on_row = with_handle(DndSortConfig::default(), None);
        assert_eq!(handle_area(&on_row, None), None);
    }

    #[test]
    fn layouts_map_to_orientations() {
        assert!(!DndSortLayout::Stack.container_style().orientation().is_horizontal());
        assert!(DndSortLayout::Wrap.container_style().orientation().is_horizontal());
    }
}

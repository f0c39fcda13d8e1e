use std::fmt::Debug;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::config::{CancelPolicy, DndSortConfig};
use crate::engine::{slide_over, slide_to_edge};
use crate::feedback::{Ghost, ItemVisual, Placeholder};
use crate::frame::{FrameThrottle, FrameTicket};
use crate::geometry::Point;
use crate::gesture::{GestureDecision, PendingGesture, PointerEvent, PointerId, PointerTarget};
use crate::host::{DragHost, HitTarget};
use crate::layout::Orientation;
use crate::order::{LiveOrder, Slot};
use crate::reorder::{Reorder, SessionEnd};

/// One active drag, from promotion to cleanup.
#[derive(Debug)]
pub struct DragSession<K> {
    pub item: K,
    pub pointer_id: PointerId,
    pub start_index: usize,
    pub origin: Point,
    pub pointer: Point,
    pub orientation: Orientation,
    pub ghost: Ghost<K>,
    pub placeholder: Placeholder,
    saved_visual: ItemVisual,
    snapshot: LiveOrder<K>,
    frames: FrameThrottle,
    captured: bool,
}

impl<K> DragSession<K> {
    pub fn pending_frame(&self) -> Option<FrameTicket> {
        self.frames.pending()
    }

    pub fn has_pointer_capture(&self) -> bool {
        self.captured
    }
}

#[derive(Debug)]
pub enum DragPhase<K> {
    Idle,
    Pending(PendingGesture<K>),
    Dragging(DragSession<K>),
}

impl<K> Default for DragPhase<K> {
    fn default() -> Self {
        DragPhase::Idle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownResponse {
    Ignored,
    /// Watching the gesture; default behavior (scrolling) must continue.
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResponse {
    Ignored,
    Pending,
    /// The gesture turned out to be a scroll and will not become a drag.
    Scroll,
    /// This move promoted the gesture to a drag.
    DragStarted,
    /// A position update was scheduled for the next frame.
    Dragging,
}

impl MoveResponse {
    /// Whether the host must prevent the default action and stop propagation.
    pub fn prevent_default(self) -> bool {
        matches!(self, MoveResponse::DragStarted | MoveResponse::Dragging)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowState {
    pub dragging: bool,
    pub placeholder_after: bool,
}

#[derive(Clone, Copy)]
enum EndKind {
    Release,
    Cancel,
    Abort,
}

struct DragCallbacks<K> {
    can_drop: Option<Rc<dyn Fn(&Reorder<K>) -> bool>>,
    on_drop: Option<Rc<dyn Fn(&Reorder<K>)>>,
}

impl<K> Default for DragCallbacks<K> {
    fn default() -> Self {
        Self {
            can_drop: None,
            on_drop: None,
        }
    }
}

/// Pointer-driven reordering of a container's draggable children.
pub struct DragController<K> {
    config: DndSortConfig,
    order: LiveOrder<K>,
    phase: DragPhase<K>,
    callbacks: DragCallbacks<K>,
    attached: bool,
}

impl<K: Clone + PartialEq + Debug + 'static> DragController<K> {
    pub fn new(config: DndSortConfig) -> Self {
        Self {
            config,
            order: LiveOrder::default(),
            phase: DragPhase::Idle,
            callbacks: DragCallbacks::default(),
            attached: true,
        }
    }

    pub fn items(mut self, slots: impl IntoIterator<Item = Slot<K>>) -> Self {
        self.order = LiveOrder::new(slots);
        self
    }

    /// Called with `(from, to)` whenever a drag ends at a different index.
    pub fn on_drop(mut self, on_drop: impl Fn(&Reorder<K>) + 'static) -> Self {
        self.callbacks.on_drop = Some(Rc::new(on_drop));
        self
    }

    /// Veto a reorder before it is reported; a vetoed drop puts the item back.
    pub fn can_drop(mut self, can_drop: impl Fn(&Reorder<K>) -> bool + 'static) -> Self {
        self.callbacks.can_drop = Some(Rc::new(can_drop));
        self
    }

    pub fn config(&self) -> &DndSortConfig {
        &self.config
    }

    pub fn order(&self) -> &LiveOrder<K> {
        &self.order
    }

    pub fn phase(&self) -> &DragPhase<K> {
        &self.phase
    }

    pub fn session(&self) -> Option<&DragSession<K>> {
        match &self.phase {
            DragPhase::Dragging(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session().is_some()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, DragPhase::Idle)
    }

    pub fn ghost(&self) -> Option<&Ghost<K>> {
        self.session().map(|session| &session.ghost)
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.session().map(|session| &session.placeholder)
    }

    pub fn row_state(&self, key: &K) -> RowState {
        let dragging = self.session().is_some_and(|session| session.item == *key);
        RowState {
            dragging,
            placeholder_after: dragging && self.order.is_placeholder_after(key),
        }
    }

    /// Replace the children after the caller re-rendered.
    ///
    /// Ignored while a drag is active; returns whether the new children were taken.
    pub fn sync_items<H>(&mut self, slots: impl IntoIterator<Item = Slot<K>>, host: &mut H) -> bool
    where
        H: DragHost<K> + ?Sized,
    {
        if self.is_dragging() {
            trace!("children changed during a drag; keeping the live order");
            return false;
        }
        self.order = LiveOrder::new(slots);
        self.attached = true;

        let orphaned = match &self.phase {
            DragPhase::Pending(pending) => !self.order.contains_item(&pending.item),
            _ => false,
        };
        if orphaned {
            debug!("pending item removed; dropping gesture");
            self.phase = DragPhase::Idle;
            host.set_drag_listeners(false);
        }
        true
    }

    /// Swap in new options. Disabling mid-drag cancels the drag without reporting it.
    pub fn configure<H>(&mut self, config: DndSortConfig, host: &mut H) -> Option<SessionEnd<K>>
    where
        H: DragHost<K> + ?Sized,
    {
        let disable = config.disabled;
        self.config = config;
        if disable && !self.is_idle() {
            return Some(self.finish(EndKind::Abort, None, host));
        }
        None
    }

    /// Detach everything. The controller stays inert until the next `sync_items`.
    pub fn teardown<H>(&mut self, host: &mut H) -> SessionEnd<K>
    where
        H: DragHost<K> + ?Sized,
    {
        let end = self.finish(EndKind::Abort, None, host);
        self.attached = false;
        end
    }

    pub fn pointer_down<H>(
        &mut self,
        event: &PointerEvent,
        target: &PointerTarget<K>,
        host: &mut H,
    ) -> DownResponse
    where
        H: DragHost<K> + ?Sized,
    {
        if !self.attached || self.config.disabled || !self.is_idle() {
            return DownResponse::Ignored;
        }
        let Some(item) = target.candidate(self.config.handle.as_deref()) else {
            return DownResponse::Ignored;
        };
        if !self.order.contains_item(item) {
            return DownResponse::Ignored;
        }

        let scrollable = host
            .scroll_metrics(&self.config.scroll_containers)
            .is_some_and(|metrics| metrics.is_scrollable());
        trace!(item = ?item, kind = ?event.kind, scrollable, "pointer down");
        self.phase = DragPhase::Pending(PendingGesture::new(item.clone(), event, scrollable));
        host.set_drag_listeners(true);
        DownResponse::Pending
    }

    pub fn pointer_move<H>(&mut self, event: &PointerEvent, host: &mut H) -> MoveResponse
    where
        H: DragHost<K> + ?Sized,
    {
        match &mut self.phase {
            DragPhase::Idle => MoveResponse::Ignored,
            DragPhase::Pending(pending) => {
                if pending.pointer_id != event.pointer_id {
                    return MoveResponse::Ignored;
                }
                if pending.is_abandoned() {
                    return MoveResponse::Scroll;
                }
                match pending.evaluate(event, &self.config.thresholds) {
                    GestureDecision::Undecided => MoveResponse::Pending,
                    GestureDecision::Scroll => {
                        debug!(item = ?pending.item, "gesture is a scroll");
                        MoveResponse::Scroll
                    }
                    GestureDecision::Promote => self.start_drag(host),
                }
            }
            DragPhase::Dragging(session) => {
                if session.pointer_id != event.pointer_id {
                    return MoveResponse::Ignored;
                }
                session.pointer = event.position;
                let request = session.frames.request();
                if let Some(stale) = request.superseded {
                    host.cancel_frame(stale);
                }
                host.request_frame(request.ticket);
                MoveResponse::Dragging
            }
        }
    }

    /// Apply the latest pointer position. Stale tickets are ignored.
    ///
    /// Returns whether the draggable order changed.
    pub fn frame<H>(&mut self, ticket: FrameTicket, host: &mut H) -> bool
    where
        H: DragHost<K> + ?Sized,
    {
        let DragPhase::Dragging(session) = &mut self.phase else {
            return false;
        };
        if !session.frames.take(ticket) {
            return false;
        }

        let pointer = session.pointer;
        session.ghost.track(pointer);
        session.orientation = host.container_style().orientation();
        let hit = host.hit_test(pointer);

        let moved = match hit {
            Some(HitTarget::Item(hovered)) if hovered != session.item => slide_over(
                &mut self.order,
                &session.item,
                &hovered,
                pointer,
                session.orientation,
                host,
            ),
            Some(_) => false,
            None => slide_to_edge(
                &mut self.order,
                &session.item,
                pointer,
                session.orientation,
                host,
            ),
        };
        self.order.place_placeholder_after(&session.item);

        if moved {
            trace!(
                item = ?session.item,
                index = ?self.order.item_index(&session.item),
                "dragged item moved"
            );
        }
        moved
    }

    pub fn pointer_up<H>(&mut self, event: &PointerEvent, host: &mut H) -> SessionEnd<K>
    where
        H: DragHost<K> + ?Sized,
    {
        self.finish(EndKind::Release, Some(event.pointer_id), host)
    }

    pub fn pointer_cancel<H>(&mut self, event: &PointerEvent, host: &mut H) -> SessionEnd<K>
    where
        H: DragHost<K> + ?Sized,
    {
        self.finish(EndKind::Cancel, Some(event.pointer_id), host)
    }

    fn start_drag<H>(&mut self, host: &mut H) -> MoveResponse
    where
        H: DragHost<K> + ?Sized,
    {
        let DragPhase::Pending(pending) = std::mem::take(&mut self.phase) else {
            return MoveResponse::Ignored;
        };
        let item = pending.item;

        let start_index = self.order.item_index(&item);
        let (Some(start_index), Some(item_box)) = (start_index, host.item_box(&item)) else {
            warn!(item = ?item, "drag target is no longer rendered");
            host.set_drag_listeners(false);
            return MoveResponse::Ignored;
        };

        let captured = match host.capture_pointer(pending.pointer_id) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "continuing drag without pointer capture");
                false
            }
        };

        let orientation = host.container_style().orientation();
        let snapshot = self.order.clone();
        self.order.place_placeholder_after(&item);

        let saved_visual = host.item_visual(&item);
        host.set_item_visual(&item, ItemVisual::muted());
        host.set_page_overrides(true);

        debug!(item = ?item, start_index, ?orientation, "drag started");
        self.phase = DragPhase::Dragging(DragSession {
            ghost: Ghost::new(item.clone(), &item_box, pending.origin, self.config.ghost),
            placeholder: Placeholder::for_item(&item_box, orientation),
            item,
            pointer_id: pending.pointer_id,
            start_index,
            origin: pending.origin,
            pointer: pending.origin,
            orientation,
            saved_visual,
            snapshot,
            frames: FrameThrottle::default(),
            captured,
        });
        MoveResponse::DragStarted
    }

    /// The single exit of every session and pending gesture.
    fn finish<H>(
        &mut self,
        kind: EndKind,
        pointer: Option<PointerId>,
        host: &mut H,
    ) -> SessionEnd<K>
    where
        H: DragHost<K> + ?Sized,
    {
        let belongs = |id: PointerId| pointer.is_none_or(|p| p == id);
        match &self.phase {
            DragPhase::Idle => return SessionEnd::Ignored,
            DragPhase::Pending(pending) if !belongs(pending.pointer_id) => {
                return SessionEnd::Ignored;
            }
            DragPhase::Dragging(session) if !belongs(session.pointer_id) => {
                return SessionEnd::Ignored;
            }
            _ => {}
        }

        let mut session = match std::mem::take(&mut self.phase) {
            DragPhase::Idle => return SessionEnd::Ignored,
            DragPhase::Pending(_) => {
                host.set_drag_listeners(false);
                return SessionEnd::Tap;
            }
            DragPhase::Dragging(session) => session,
        };

        if let Some(ticket) = session.frames.cancel() {
            host.cancel_frame(ticket);
        }
        if session.captured {
            host.release_pointer(session.pointer_id);
        }

        let commit = match kind {
            EndKind::Release => true,
            EndKind::Cancel => self.config.cancel_policy == CancelPolicy::Commit,
            EndKind::Abort => false,
        };
        let final_index = self.order.item_index(&session.item);
        let moved = final_index.filter(|&to| to != session.start_index);

        let end = match (moved, commit) {
            (None, _) => SessionEnd::Unchanged,
            (Some(_), false) => {
                self.order = std::mem::take(&mut session.snapshot);
                SessionEnd::RolledBack
            }
            (Some(to), true) => {
                let reorder = Reorder {
                    item: session.item.clone(),
                    from: session.start_index,
                    to,
                };
                let allowed = self
                    .callbacks
                    .can_drop
                    .as_ref()
                    .is_none_or(|can_drop| can_drop(&reorder));
                if allowed {
                    SessionEnd::Committed(reorder)
                } else {
                    self.order = std::mem::take(&mut session.snapshot);
                    SessionEnd::Vetoed(reorder)
                }
            }
        };

        self.order.remove_placeholder();
        host.set_item_visual(&session.item, session.saved_visual);
        host.set_drag_listeners(false);
        host.set_page_overrides(false);
        debug!(item = ?session.item, outcome = ?end, "drag ended");

        if let (SessionEnd::Committed(reorder), Some(on_drop)) = (&end, &self.callbacks.on_drop) {
            on_drop(reorder);
        }
        end
    }
}

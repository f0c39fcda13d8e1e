//! Deciding whether a pointer-down turns into a drag, a scroll, or a tap.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PointerId(pub u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    #[default]
    Mouse,
    Pen,
    Touch,
}

impl PointerKind {
    pub fn is_touch(self) -> bool {
        self == PointerKind::Touch
    }
}

/// A pointer event as delivered by the host.
///
/// `timestamp` is measured from any fixed origin the host likes; only differences are used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: PointerId,
    pub kind: PointerKind,
    pub position: Point,
    pub timestamp: Duration,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: Point, timestamp: Duration) -> Self {
        Self {
            pointer_id: PointerId::default(),
            kind,
            position,
            timestamp,
        }
    }

    pub fn mouse(x: f32, y: f32, timestamp: Duration) -> Self {
        Self::new(PointerKind::Mouse, Point::new(x, y), timestamp)
    }

    pub fn touch(x: f32, y: f32, timestamp: Duration) -> Self {
        Self::new(PointerKind::Touch, Point::new(x, y), timestamp)
    }

    pub fn with_pointer_id(mut self, pointer_id: PointerId) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}

/// Interactive controls that keep their own click behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Button,
    Input,
    Select,
    TextArea,
    Link,
    RoleButton,
}

/// What the pointer went down on, resolved by the host from its element tree.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerTarget<K> {
    /// The nearest draggable item enclosing the target, if any.
    pub item: Option<K>,
    /// Handle markers found between the target and the item.
    pub handles: Vec<String>,
    /// Set when the target is (inside) an interactive control.
    pub control: Option<ControlKind>,
}

impl<K> PointerTarget<K> {
    pub fn item(item: K) -> Self {
        Self {
            item: Some(item),
            handles: Vec::new(),
            control: None,
        }
    }

    pub fn background() -> Self {
        Self {
            item: None,
            handles: Vec::new(),
            control: None,
        }
    }

    pub fn control(control: ControlKind, item: Option<K>) -> Self {
        Self {
            item,
            handles: Vec::new(),
            control: Some(control),
        }
    }

    pub fn in_handle(mut self, handle: impl Into<String>) -> Self {
        self.handles.push(handle.into());
        self
    }

    /// Resolve the candidate item, or `None` when this down event must be left alone.
    pub fn candidate(&self, handle: Option<&str>) -> Option<&K> {
        // Controls outside any item resolve to no item and keep their clicks.
        let item = self.item.as_ref()?;
        match handle {
            Some(handle) if !self.handles.iter().any(|h| h == handle) => None,
            _ => Some(item),
        }
    }
}

/// Content and viewport sizes of the nearest scrollable list container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub content: Size,
    pub viewport: Size,
}

impl ScrollMetrics {
    pub fn is_scrollable(&self) -> bool {
        self.content.height > self.viewport.height || self.content.width > self.viewport.width
    }
}

/// Drag-start thresholds in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    pub mouse: f32,
    pub touch: f32,
    pub touch_scrollable: f32,
    /// Fraction of `touch_scrollable` that suffices once `hold` has elapsed.
    pub hold_fraction: f32,
    #[serde(with = "millis")]
    pub hold: Duration,
    /// Vertical-over-horizontal ratio that marks a touch gesture as a scroll.
    pub scroll_ratio: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            mouse: 8.,
            touch: 20.,
            touch_scrollable: 30.,
            hold_fraction: 0.7,
            hold: Duration::from_millis(200),
            scroll_ratio: 1.5,
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureDecision {
    /// Keep watching.
    Undecided,
    /// Start a drag session.
    Promote,
    /// The gesture is a scroll; stop evaluating it.
    Scroll,
}

/// A pointer-down on an item that has not yet become a drag.
#[derive(Debug, Clone)]
pub struct PendingGesture<K> {
    pub item: K,
    pub pointer_id: PointerId,
    pub kind: PointerKind,
    pub origin: Point,
    pub started_at: Duration,
    pub scrollable: bool,
    abandoned: bool,
}

impl<K> PendingGesture<K> {
    pub fn new(item: K, down: &PointerEvent, scrollable: bool) -> Self {
        Self {
            item,
            pointer_id: down.pointer_id,
            kind: down.kind,
            origin: down.position,
            started_at: down.timestamp,
            scrollable,
            abandoned: false,
        }
    }

    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    /// Threshold that applies to this gesture's input kind and container.
    pub fn threshold(&self, thresholds: &GestureThresholds) -> f32 {
        match (self.kind.is_touch(), self.scrollable) {
            (true, true) => thresholds.touch_scrollable,
            (true, false) => thresholds.touch,
            (false, _) => thresholds.mouse,
        }
    }

    pub fn evaluate(
        &mut self,
        event: &PointerEvent,
        thresholds: &GestureThresholds,
    ) -> GestureDecision {
        if self.abandoned {
            return GestureDecision::Scroll;
        }

        let dx = (event.position.x - self.origin.x).abs();
        let dy = (event.position.y - self.origin.y).abs();
        let distance = dx.max(dy);
        let threshold = self.threshold(thresholds);

        if self.kind.is_touch() && self.scrollable {
            if dy > dx * thresholds.scroll_ratio {
                self.abandoned = true;
                return GestureDecision::Scroll;
            }
            let elapsed = event.timestamp.saturating_sub(self.started_at);
            let held =
                elapsed >= thresholds.hold && distance >= threshold * thresholds.hold_fraction;
            if distance >= threshold || held {
                return GestureDecision::Promote;
            }
            return GestureDecision::Undecided;
        }

        if distance >= threshold {
            GestureDecision::Promote
        } else {
            GestureDecision::Undecided
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn pending(kind: PointerKind, scrollable: bool) -> PendingGesture<&'static str> {
        let down = PointerEvent::new(kind, Point::new(100., 100.), ms(0));
        PendingGesture::new("a", &down, scrollable)
    }

    fn at(kind: PointerKind, x: f32, y: f32, t: u64) -> PointerEvent {
        PointerEvent::new(kind, Point::new(x, y), ms(t))
    }

    #[test]
    fn mouse_promotes_at_eight_pixels() {
        let thresholds = GestureThresholds::default();
        let mut gesture = pending(PointerKind::Mouse, true);
        assert_eq!(
            gesture.evaluate(&at(PointerKind::Mouse, 107.9, 100., 5), &thresholds),
            GestureDecision::Undecided
        );
        assert_eq!(
            gesture.evaluate(&at(PointerKind::Mouse, 100., 108., 6), &thresholds),
            GestureDecision::Promote
        );
    }

    #[test]
    fn pen_uses_the_mouse_threshold_without_time_gate() {
        let thresholds = GestureThresholds::default();
        let mut gesture = pending(PointerKind::Pen, true);
        assert_eq!(
            gesture.evaluate(&at(PointerKind::Pen, 100., 107., 10_000), &thresholds),
            GestureDecision::Undecided
        );
        assert_eq!(
            gesture.evaluate(&at(PointerKind::Pen, 100., 140., 10_001), &thresholds),
            GestureDecision::Promote
        );
    }

    #[test]
    fn touch_without_scroll_container_uses_twenty_pixels() {
        let thresholds = GestureThresholds::default();
        let mut gesture = pending(PointerKind::Touch, false);
        assert_eq!(
            gesture.evaluate(&at(PointerKind::Touch, 100., 119., 500), &thresholds),
            GestureDecision::Undecided
        );
        assert_eq!(
            gesture.evaluate(&at(PointerKind::Touch, 100., 120., 510), &thresholds),
            GestureDecision::Promote
        );
    }

    #[test]
    fn touch_on_scrollable_needs_thirty_pixels_or_a_hold() {
        let thresholds = GestureThresholds::default();
        let mut quick = pending(PointerKind::Touch, true);
        assert_eq!(
            quick.evaluate(&at(PointerKind::Touch, 125., 100., 50), &thresholds),
            GestureDecision::Undecided
        );
        assert_eq!(
            quick.evaluate(&at(PointerKind::Touch, 130., 100., 60), &thresholds),
            GestureDecision::Promote
        );

        let mut held = pending(PointerKind::Touch, true);
        assert_eq!(
            held.evaluate(&at(PointerKind::Touch, 122., 100., 199), &thresholds),
            GestureDecision::Undecided
        );
        assert_eq!(
            held.evaluate(&at(PointerKind::Touch, 122., 100., 200), &thresholds),
            GestureDecision::Promote
        );
    }

    #[test]
    fn vertical_touch_on_scrollable_is_abandoned_for_good() {
        let thresholds = GestureThresholds::default();
        let mut gesture = pending(PointerKind::Touch, true);
        assert_eq!(
            gesture.evaluate(&at(PointerKind::Touch, 104., 107., 10), &thresholds),
            GestureDecision::Scroll
        );
        assert!(gesture.is_abandoned());
        // A later sideways move does not revive it.
        assert_eq!(
            gesture.evaluate(&at(PointerKind::Touch, 200., 100., 400), &thresholds),
            GestureDecision::Scroll
        );
    }

    #[test]
    fn down_on_control_outside_items_is_not_a_candidate() {
        let target: PointerTarget<&str> = PointerTarget::control(ControlKind::Button, None);
        assert_eq!(target.candidate(None), None);

        let inside = PointerTarget::control(ControlKind::Button, Some("a"));
        assert_eq!(inside.candidate(None), Some(&"a"));
    }

    #[test]
    fn handle_must_match_when_configured() {
        let plain = PointerTarget::item("a");
        assert_eq!(plain.candidate(Some("grip")), None);
        assert_eq!(plain.candidate(None), Some(&"a"));

        let gripped = PointerTarget::item("a").in_handle("grip");
        assert_eq!(gripped.candidate(Some("grip")), Some(&"a"));
        assert_eq!(gripped.candidate(Some("other")), None);
    }

    #[test]
    fn scroll_metrics_checks_both_axes() {
        let fits = ScrollMetrics {
            content: Size::new(200., 300.),
            viewport: Size::new(200., 300.),
        };
        assert!(!fits.is_scrollable());
        let wide = ScrollMetrics {
            content: Size::new(400., 100.),
            viewport: Size::new(200., 300.),
        };
        assert!(wide.is_scrollable());
    }
}

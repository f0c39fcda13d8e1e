//! Ghost proxy, placeholder and the muted look of the dragged item.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Edges, ItemBox, Point};
use crate::layout::Orientation;

/// Inline visual state the controller may override on an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemVisual {
    pub opacity: f32,
    pub pointer_events: bool,
    pub dragging: bool,
}

impl Default for ItemVisual {
    fn default() -> Self {
        Self {
            opacity: 1.,
            pointer_events: true,
            dragging: false,
        }
    }
}

impl ItemVisual {
    pub const MUTED_OPACITY: f32 = 0.4;

    /// The look of the item left in flow while its ghost floats.
    pub fn muted() -> Self {
        Self {
            opacity: Self::MUTED_OPACITY,
            pointer_events: false,
            dragging: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostStyle {
    pub opacity: f32,
    pub rotation_deg: f32,
    pub scale: f32,
    pub shadow_blur: f32,
    pub shadow_offset_y: f32,
    pub z_index: u32,
}

impl Default for GhostStyle {
    fn default() -> Self {
        Self {
            opacity: 0.8,
            rotation_deg: 2.,
            scale: 1.02,
            shadow_blur: 24.,
            shadow_offset_y: 8.,
            z_index: u32::MAX,
        }
    }
}

/// Floating proxy of the dragged item, mounted on the root layer.
///
/// The ghost never intercepts the pointer and its nested controls are inert.
#[derive(Debug, Clone, PartialEq)]
pub struct Ghost<K> {
    pub source: K,
    pub bounds: Bounds,
    pub grab_offset: Point,
    pub style: GhostStyle,
}

impl<K> Ghost<K> {
    /// Place the ghost exactly over the item it replaces.
    pub fn new(source: K, item: &ItemBox, pointer: Point, style: GhostStyle) -> Self {
        Self {
            source,
            bounds: item.bounds,
            grab_offset: pointer.offset_from(item.bounds.origin),
            style,
        }
    }

    pub fn position(&self) -> Point {
        self.bounds.origin
    }

    /// Keep the original grab point under the pointer.
    pub fn track(&mut self, pointer: Point) {
        self.bounds.origin = pointer.offset_from(self.grab_offset);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderDisplay {
    /// Fixed width, does not shrink, flows inline with wrapped chips.
    Inline,
    /// Full available width.
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderStyle {
    pub border_width: f32,
    pub dashed: bool,
    pub background_alpha: f32,
    pub transition_ms: u32,
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        Self {
            border_width: 2.,
            dashed: true,
            background_alpha: 0.12,
            transition_ms: 150,
        }
    }
}

/// Marker of the would-be drop slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placeholder {
    pub display: PlaceholderDisplay,
    /// `None` means fill the available width.
    pub width: Option<f32>,
    pub height: f32,
    pub margin: Edges,
    pub style: PlaceholderStyle,
}

impl Placeholder {
    pub fn for_item(item: &ItemBox, orientation: Orientation) -> Self {
        let height = item.bounds.size.height;
        match orientation {
            Orientation::Horizontal => Self {
                display: PlaceholderDisplay::Inline,
                width: Some(item.bounds.size.width),
                height,
                margin: item.margin,
                style: PlaceholderStyle::default(),
            },
            Orientation::Vertical => Self {
                display: PlaceholderDisplay::Block,
                width: None,
                height,
                margin: Edges::default(),
                style: PlaceholderStyle::default(),
            },
        }
    }
}

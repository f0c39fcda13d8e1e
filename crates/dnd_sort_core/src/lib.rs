//! Headless drag-to-reorder for lists and wrapping tag clouds.
//!
//! [`DragController`] owns the live order of a container's children and turns pointer events
//! into a reorder. Geometry and platform effects come from a [`DragHost`].

mod config;
mod controller;
mod engine;
mod error;
mod feedback;
mod frame;
mod geometry;
mod gesture;
mod host;
mod layout;
mod order;
mod reorder;
pub mod sort_keys;

pub use config::{CancelPolicy, DndSortConfig};
pub use controller::{DownResponse, DragController, DragPhase, DragSession, MoveResponse, RowState};
pub use error::DndSortError;
pub use feedback::{
    Ghost, GhostStyle, ItemVisual, Placeholder, PlaceholderDisplay, PlaceholderStyle,
};
pub use frame::{FrameRequest, FrameThrottle, FrameTicket};
pub use geometry::{Bounds, Edges, ItemBox, Point, Size};
pub use gesture::{
    ControlKind, GestureDecision, GestureThresholds, PendingGesture, PointerEvent, PointerId,
    PointerKind, PointerTarget, ScrollMetrics,
};
pub use host::{DragHost, HitTarget};
pub use layout::{ContainerStyle, Display, FlexDirection, FlexWrap, InsertSide, Orientation};
pub use order::{LiveOrder, Slot, move_index};
pub use reorder::{Reorder, SessionEnd};

use thiserror::Error;

use crate::gesture::PointerId;

#[derive(Debug, Error)]
pub enum DndSortError {
    #[error("pointer {pointer:?} could not be captured: {reason}")]
    PointerCapture { pointer: PointerId, reason: String },
    #[error("invalid drag config: {0}")]
    Config(#[from] serde_json::Error),
}

use serde::{Deserialize, Serialize};

use crate::error::DndSortError;
use crate::feedback::GhostStyle;
use crate::gesture::GestureThresholds;

/// What a pointer-cancel does with the order reached so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Treat cancel like a release and report the reorder if the index changed.
    #[default]
    Commit,
    /// Put the item back where it started and report nothing.
    Rollback,
}

/// Options of a sortable container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DndSortConfig {
    pub disabled: bool,
    /// When set, drags only start from inside a handle with this marker.
    pub handle: Option<String>,
    pub thresholds: GestureThresholds,
    /// Classes of list containers whose scrollability affects touch gestures.
    pub scroll_containers: Vec<String>,
    pub cancel_policy: CancelPolicy,
    pub ghost: GhostStyle,
}

impl Default for DndSortConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            handle: None,
            thresholds: GestureThresholds::default(),
            scroll_containers: ["category-list", "spot-list", "tag-list"]
                .into_iter()
                .map(String::from)
                .collect(),
            cancel_policy: CancelPolicy::default(),
            ghost: GhostStyle::default(),
        }
    }
}

impl DndSortConfig {
    pub fn from_json(json: &str) -> Result<Self, DndSortError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    pub fn cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.cancel_policy = policy;
        self
    }
}
